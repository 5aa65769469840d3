//! Model-level feature importance as exposed by the classifier.

use crate::features::Feature;
use crate::model::GradientBoostedClassifier;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: Feature,
    pub importance: f64,
}

/// Importances in training order
pub fn global_importance(classifier: &GradientBoostedClassifier) -> Vec<FeatureImportance> {
    let values = classifier.feature_importances();
    Feature::ALL
        .iter()
        .map(|&feature| FeatureImportance {
            feature,
            importance: values[feature.index()],
        })
        .collect()
}

/// Copy sorted by descending importance
pub fn ranked(items: &[FeatureImportance]) -> Vec<FeatureImportance> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    out
}
