//! Predictor configuration: artifact locations, decision thresholds, explanation reference row.

use crate::error::{PredictorError, Result};
use crate::features::{Feature, FeatureVector, TypeEncoding, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Serialized scaler and classifier
    pub artifacts: ArtifactsConfig,
    /// Label, explanation and severity cut-offs
    pub thresholds: ThresholdsConfig,
    /// Integer code assigned to the machine type
    pub type_encoding: TypeEncoding,
    /// Sensitivity explainer reference values
    pub explain: ExplainConfig,
    /// Logging
    pub log: LogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Probability at or above this is labelled a failure
    pub label: f64,
    /// Probability strictly above this triggers the sensitivity explainer
    pub explain: f64,
    /// Probability strictly above this is at least Elevated
    pub elevated: f64,
    /// Probability strictly above this is Critical
    pub critical: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanSource {
    /// Use `explain.means` as configured
    #[default]
    Config,
    /// Use the scaler's fitted per-feature means
    Scaler,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    pub mean_source: MeanSource,
    pub means: MeanTable,
}

/// Reference value per feature, substituted one at a time by the explainer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanTable {
    /// Encoded machine type
    pub machine_type: f64,
    pub air_temperature: f64,
    pub process_temperature: f64,
    pub rotational_speed: f64,
    pub torque: f64,
    pub tool_wear: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            thresholds: ThresholdsConfig::default(),
            type_encoding: TypeEncoding::default(),
            explain: ExplainConfig::default(),
            log: LogConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("scaler.json"),
            model_path: PathBuf::from("model.json"),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            label: 0.4,
            explain: 0.4,
            elevated: 0.4,
            critical: 0.7,
        }
    }
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            mean_source: MeanSource::Config,
            means: MeanTable::default(),
        }
    }
}

impl Default for MeanTable {
    fn default() -> Self {
        Self {
            machine_type: 1.0,
            air_temperature: 295.0,
            process_temperature: 305.0,
            rotational_speed: 1650.0,
            torque: 40.0,
            tool_wear: 15.0,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl MeanTable {
    pub fn from_vector(v: FeatureVector) -> Self {
        let [machine_type, air_temperature, process_temperature, rotational_speed, torque, tool_wear] =
            v.0;
        Self {
            machine_type,
            air_temperature,
            process_temperature,
            rotational_speed,
            torque,
            tool_wear,
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Type => self.machine_type,
            Feature::AirTemperature => self.air_temperature,
            Feature::ProcessTemperature => self.process_temperature,
            Feature::RotationalSpeed => self.rotational_speed,
            Feature::Torque => self.torque,
            Feature::ToolWear => self.tool_wear,
        }
    }

    pub fn as_vector(&self) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for f in Feature::ALL {
            out[f.index()] = self.get(f);
        }
        FeatureVector(out)
    }
}

impl ThresholdsConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("label", self.label),
            ("explain", self.explain),
            ("elevated", self.elevated),
            ("critical", self.critical),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(PredictorError::Config(format!(
                    "thresholds.{} must be within [0, 1], got {}",
                    name, v
                )));
            }
        }
        if self.elevated > self.critical {
            return Err(PredictorError::Config(format!(
                "thresholds.elevated ({}) exceeds thresholds.critical ({})",
                self.elevated, self.critical
            )));
        }
        Ok(())
    }
}

impl PredictorConfig {
    /// Load from JSON file if present; otherwise return default. A file that exists but
    /// does not parse or validate is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| PredictorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PredictorConfig =
            serde_json::from_str(&data).map_err(|source| PredictorError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if let Some(f) = Feature::ALL
            .into_iter()
            .find(|f| !self.explain.means.get(*f).is_finite())
        {
            return Err(PredictorError::Config(format!(
                "explain.means has a non-finite value for {}",
                f
            )));
        }
        Ok(())
    }
}
