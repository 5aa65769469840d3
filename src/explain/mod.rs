//! Explanations: global importance from the model, and per-prediction sensitivity.

mod importance;
mod sensitivity;

pub use importance::{global_importance, ranked, FeatureImportance};
pub use sensitivity::{explain, reference_means, Impact, Sensitivity, METHOD_NOTE};
