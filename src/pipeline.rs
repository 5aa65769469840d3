//! Prediction pipeline: readings → prediction → optional explanations → report.

use crate::config::MeanTable;
use crate::error::Result;
use crate::explain::{explain, global_importance};
use crate::features::{FeatureVector, SensorReadings};
use crate::model::ArtifactFingerprints;
use crate::report::Report;
use crate::risk::{Prediction, Predictor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When to run the sensitivity explainer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExplainMode {
    /// Only when the probability exceeds the explain threshold
    #[default]
    Gated,
    Always,
    Never,
}

pub struct PredictionPipeline {
    predictor: Predictor,
    means: MeanTable,
    explain: ExplainMode,
    importance: bool,
}

impl PredictionPipeline {
    pub fn new(predictor: Predictor, means: MeanTable) -> Self {
        Self {
            predictor,
            means,
            explain: ExplainMode::Gated,
            importance: false,
        }
    }

    pub fn with_explain(mut self, mode: ExplainMode) -> Self {
        self.explain = mode;
        self
    }

    /// Attach the global importance chart to every report
    pub fn with_importance(mut self, enabled: bool) -> Self {
        self.importance = enabled;
        self
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn run(&self, readings: &SensorReadings) -> Result<Report> {
        let prediction = self.predictor.predict_readings(readings)?;
        Ok(self.report(prediction))
    }

    pub fn run_vector(&self, features: &FeatureVector) -> Report {
        self.report(self.predictor.predict(features))
    }

    fn report(&self, prediction: Prediction) -> Report {
        let features = &prediction.features;
        let wants_explanation = match self.explain {
            ExplainMode::Gated => self.predictor.should_explain(prediction.probability),
            ExplainMode::Always => true,
            ExplainMode::Never => false,
        };
        let sensitivity = if wants_explanation {
            Some(explain(
                &self.predictor,
                features,
                prediction.probability,
                &self.means,
            ))
        } else {
            debug!(
                probability = prediction.probability,
                mode = ?self.explain,
                "sensitivity explanation skipped"
            );
            None
        };

        Report {
            prediction: Some(prediction),
            sensitivity,
            importance: self.importance.then(|| self.importance_only()),
            artifacts: self.fingerprints(),
        }
    }

    /// Global importance without a prediction
    pub fn importance_report(&self) -> Report {
        Report {
            importance: Some(self.importance_only()),
            artifacts: self.fingerprints(),
            ..Default::default()
        }
    }

    fn importance_only(&self) -> Vec<crate::explain::FeatureImportance> {
        global_importance(&self.predictor.artifacts().classifier)
    }

    fn fingerprints(&self) -> Option<ArtifactFingerprints> {
        let fp = &self.predictor.artifacts().fingerprints;
        (*fp != ArtifactFingerprints::default()).then(|| fp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdsConfig;
    use crate::features::TypeEncoding;
    use crate::model::{Artifacts, GradientBoostedClassifier, Node, StandardScaler, Tree};
    use std::sync::Arc;

    /// Probability is exactly `base_score` everywhere.
    fn constant_pipeline(base_score: f64) -> PredictionPipeline {
        let scaler = StandardScaler::new(vec![0.0; 6], vec![1.0; 6]).unwrap();
        let classifier = GradientBoostedClassifier::new(base_score, vec![]).unwrap();
        let predictor = Predictor::new(
            Arc::new(Artifacts::from_parts(scaler, classifier)),
            ThresholdsConfig::default(),
            TypeEncoding::Ordinal,
        );
        PredictionPipeline::new(predictor, MeanTable::default())
    }

    #[test]
    fn gate_uses_strict_comparison() {
        let thresholds = ThresholdsConfig::default();
        let p = constant_pipeline(0.5);
        assert!(!p.predictor().should_explain(thresholds.explain));
        assert!(p.predictor().should_explain(0.400_000_1));
    }

    #[test]
    fn low_probability_skips_explanation_unless_forced() {
        let p = constant_pipeline(0.2);
        let report = p.run(&SensorReadings::default()).unwrap();
        assert!(report.sensitivity.is_none());
        assert!(report.importance.is_none());

        let p = constant_pipeline(0.2).with_explain(ExplainMode::Always);
        let report = p.run(&SensorReadings::default()).unwrap();
        assert_eq!(report.sensitivity.unwrap().impacts.len(), 6);
    }

    #[test]
    fn high_probability_explains_unless_suppressed() {
        let p = constant_pipeline(0.9);
        assert!(p.run(&SensorReadings::default()).unwrap().sensitivity.is_some());

        let p = constant_pipeline(0.9).with_explain(ExplainMode::Never);
        assert!(p.run(&SensorReadings::default()).unwrap().sensitivity.is_none());
    }

    #[test]
    fn importance_attached_on_request() {
        let scaler = StandardScaler::new(vec![0.0; 6], vec![1.0; 6]).unwrap();
        let tree = Tree::new(vec![Node::split(4, 0.0, 1, 2), Node::leaf(0.0), Node::leaf(0.0)]);
        let classifier = GradientBoostedClassifier::new(0.5, vec![tree]).unwrap();
        let predictor = Predictor::new(
            Arc::new(Artifacts::from_parts(scaler, classifier)),
            ThresholdsConfig::default(),
            TypeEncoding::Ordinal,
        );
        let p = PredictionPipeline::new(predictor, MeanTable::default()).with_importance(true);
        let report = p.run(&SensorReadings::default()).unwrap();
        let fi = report.importance.unwrap();
        assert_eq!(fi[4].importance, 1.0);
        assert!(report.artifacts.is_none());

        let only = p.importance_report();
        assert!(only.prediction.is_none());
        assert!(only.importance.is_some());
    }

    #[test]
    fn invalid_readings_are_rejected() {
        let p = constant_pipeline(0.5);
        let bad = SensorReadings {
            torque: 701.0,
            ..Default::default()
        };
        assert!(matches!(
            p.run(&bad),
            Err(crate::PredictorError::InvalidReading { field: "torque [Nm]", .. })
        ));
    }

    #[test]
    fn readings_and_vector_paths_agree() {
        let p = constant_pipeline(0.9).with_explain(ExplainMode::Always);
        let readings = SensorReadings {
            machine_type: crate::features::MachineType::H,
            ..Default::default()
        };
        let from_readings = p.run(&readings).unwrap();
        let direct = p.predictor().predict_readings(&readings).unwrap();
        let from_vector = p.run_vector(&direct.features);

        let a = from_readings.prediction.unwrap();
        let b = from_vector.prediction.unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.features, direct.features);
        assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        assert_eq!(
            from_readings.sensitivity.unwrap().original_probability,
            a.probability
        );
    }
}
