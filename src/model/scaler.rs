//! Standard scaler: per-feature centering and scaling fitted at training time.

use crate::features::{Feature, FeatureVector, FEATURE_COUNT};
use ndarray::{arr1, Array1};
use serde::{Deserialize, Serialize};

/// On-disk form of a fitted scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub format_version: u32,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Zero scale entries (constant training columns) are replaced by 1.0.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} means and scales, got {} and {}",
                FEATURE_COUNT,
                mean.len(),
                scale.len()
            ));
        }
        if let Some(i) = mean.iter().chain(&scale).position(|v| !v.is_finite()) {
            return Err(format!("non-finite scaler parameter at position {}", i));
        }
        if let Some(i) = scale.iter().position(|s| *s < 0.0) {
            return Err(format!("negative scale for {}", Feature::ALL[i]));
        }
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();
        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    pub fn from_artifact(artifact: ScalerArtifact) -> Result<Self, String> {
        if let Some(names) = &artifact.feature_names {
            let expected: Vec<&str> = Feature::ALL.iter().map(|f| f.column_name()).collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(format!(
                    "feature names {:?} do not match training order {:?}",
                    names, expected
                ));
            }
        }
        Self::new(artifact.mean, artifact.scale)
    }

    pub fn transform(&self, x: &FeatureVector) -> Array1<f64> {
        (arr1(x.as_slice()) - &self.mean) / &self.scale
    }

    /// Fitted per-feature means, in unscaled units
    pub fn means(&self) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (o, m) in out.iter_mut().zip(self.mean.iter()) {
            *o = *m;
        }
        FeatureVector(out)
    }
}
