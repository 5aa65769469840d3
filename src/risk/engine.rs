//! Scales a feature vector, scores it with the classifier, and derives label and severity.

use crate::config::ThresholdsConfig;
use crate::error::Result;
use crate::features::{FeatureVector, SensorReadings, TypeEncoding};
use crate::model::Artifacts;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Healthy,
    Failure,
}

impl Label {
    pub fn from_probability(probability: f64, thresholds: &ThresholdsConfig) -> Self {
        if probability >= thresholds.label {
            Label::Failure
        } else {
            Label::Healthy
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Healthy => f.write_str("Healthy"),
            Label::Failure => f.write_str("Failure"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Healthy,
    Elevated,
    Critical,
}

impl Severity {
    pub fn from_probability(probability: f64, thresholds: &ThresholdsConfig) -> Self {
        if probability > thresholds.critical {
            Severity::Critical
        } else if probability > thresholds.elevated {
            Severity::Elevated
        } else {
            Severity::Healthy
        }
    }

    pub fn banner(self) -> &'static str {
        match self {
            Severity::Critical => "Very high failure risk! Immediate action required.",
            Severity::Elevated => "Elevated risk: plan maintenance soon.",
            Severity::Healthy => "Low risk: machine is likely healthy.",
        }
    }
}

/// Outcome of one inference call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub ts: i64,
    pub features: FeatureVector,
    pub probability: f64,
    pub label: Label,
    pub severity: Severity,
}

/// Holds the loaded artifacts and decision thresholds; cheap to clone.
#[derive(Clone)]
pub struct Predictor {
    artifacts: Arc<Artifacts>,
    thresholds: ThresholdsConfig,
    encoding: TypeEncoding,
}

impl Predictor {
    pub fn new(artifacts: Arc<Artifacts>, thresholds: ThresholdsConfig, encoding: TypeEncoding) -> Self {
        Self {
            artifacts,
            thresholds,
            encoding,
        }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn thresholds(&self) -> &ThresholdsConfig {
        &self.thresholds
    }

    pub fn encoding(&self) -> TypeEncoding {
        self.encoding
    }

    /// Failure probability in [0, 1] for an unscaled vector
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let scaled = self.artifacts.scaler.transform(features);
        self.artifacts.classifier.predict_positive(scaled.view())
    }

    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        let probability = self.probability(features);
        let prediction = Prediction {
            id: Uuid::new_v4().to_string(),
            ts: Utc::now().timestamp_millis(),
            features: *features,
            probability,
            label: Label::from_probability(probability, &self.thresholds),
            severity: Severity::from_probability(probability, &self.thresholds),
        };
        info!(
            id = %prediction.id,
            probability,
            label = ?prediction.label,
            severity = ?prediction.severity,
            "prediction"
        );
        prediction
    }

    /// Validate operator readings, encode them, and predict
    pub fn predict_readings(&self, readings: &SensorReadings) -> Result<Prediction> {
        readings.validate()?;
        let features = readings.to_feature_vector(self.encoding);
        debug!(?features, "assembled feature vector");
        Ok(self.predict(&features))
    }

    /// Whether the probability is high enough to warrant a sensitivity explanation
    pub fn should_explain(&self, probability: f64) -> bool {
        probability > self.thresholds.explain
    }
}
