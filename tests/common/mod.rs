#![allow(dead_code)]

use serde_json::json;
use std::path::{Path, PathBuf};

pub fn scaler_json() -> serde_json::Value {
    json!({
        "format_version": 1,
        "mean": [0.5, 300.0, 310.0, 1538.8, 40.0, 108.0],
        "scale": [0.67, 2.0, 1.5, 179.3, 10.0, 63.6],
        "feature_names": [
            "Type",
            "Air temperature [K]",
            "Process temperature [K]",
            "Rotational speed [rpm]",
            "Torque [Nm]",
            "Tool wear [min]"
        ]
    })
}

/// Torque above 60 Nm (scaled 2.0) and tool wear above ~203 min (scaled 1.5) drive failure.
pub fn model_json() -> serde_json::Value {
    json!({
        "format_version": 1,
        "base_score": 0.034,
        "trees": [
            {"nodes": [
                {"type": "split", "feature": 4, "threshold": 2.0, "left": 1, "right": 2, "gain": 40.0},
                {"type": "leaf", "value": -0.1},
                {"type": "leaf", "value": 2.6}
            ]},
            {"nodes": [
                {"type": "split", "feature": 5, "threshold": 1.5, "left": 1, "right": 2, "gain": 25.0},
                {"type": "leaf", "value": -0.1},
                {"type": "split", "feature": 3, "threshold": -1.2, "left": 3, "right": 4, "gain": 5.0},
                {"type": "leaf", "value": 2.2},
                {"type": "leaf", "value": 1.8}
            ]},
            {"nodes": [
                {"type": "split", "feature": 2, "threshold": 1.5, "left": 1, "right": 2, "gain": 3.0},
                {"type": "leaf", "value": -0.05},
                {"type": "leaf", "value": 0.3}
            ]}
        ]
    })
}

pub fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

/// Write both artifacts into `dir`; returns (scaler_path, model_path)
pub fn write_artifacts(dir: &Path) -> (PathBuf, PathBuf) {
    (
        write_json(dir, "scaler.json", &scaler_json()),
        write_json(dir, "model.json", &model_json()),
    )
}
