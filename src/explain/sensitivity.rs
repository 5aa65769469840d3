//! Instance-level "set-to-mean" sensitivity.
//!
//! Each feature is replaced, one at a time, by its reference value while the
//! other five keep their entered values. The vector is re-scaled and re-scored,
//! and the impact is `original - altered`. This is a local perturbation
//! measure, not an additive attribution: impacts need not sum to anything and
//! interactions between correlated features are not captured.

use crate::config::{ExplainConfig, MeanSource, MeanTable};
use crate::features::{Feature, FeatureVector};
use crate::model::Artifacts;
use crate::risk::Predictor;
use serde::Serialize;

pub const METHOD_NOTE: &str = "Single-feature set-to-mean perturbation. Ignores feature \
interactions and can mislead when features are correlated.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub feature: Feature,
    /// Value substituted for this feature
    pub reference_value: f64,
    pub altered_probability: f64,
    /// `original_probability - altered_probability`
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sensitivity {
    pub original_probability: f64,
    /// Sorted by descending absolute delta; ties keep training order
    pub impacts: Vec<Impact>,
    pub method: &'static str,
}

impl Sensitivity {
    pub fn top(&self) -> Option<&Impact> {
        self.impacts.first()
    }
}

/// Reference row the explainer substitutes from
pub fn reference_means(config: &ExplainConfig, artifacts: &Artifacts) -> MeanTable {
    match config.mean_source {
        MeanSource::Config => config.means,
        MeanSource::Scaler => MeanTable::from_vector(artifacts.scaler.means()),
    }
}

pub fn explain(
    predictor: &Predictor,
    features: &FeatureVector,
    original_probability: f64,
    means: &MeanTable,
) -> Sensitivity {
    let mut impacts: Vec<Impact> = Feature::ALL
        .iter()
        .map(|&feature| {
            let reference_value = means.get(feature);
            let altered = features.with(feature, reference_value);
            let altered_probability = predictor.probability(&altered);
            Impact {
                feature,
                reference_value,
                altered_probability,
                delta: original_probability - altered_probability,
            }
        })
        .collect();
    impacts.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));

    Sensitivity {
        original_probability,
        impacts,
        method: METHOD_NOTE,
    }
}
