//! Fitted model state: feature scaler, tree-ensemble classifier, and their loader.

mod artifacts;
mod gbdt;
mod scaler;

pub use artifacts::{ArtifactFingerprints, Artifacts, FORMAT_VERSION};
pub use gbdt::{GradientBoostedClassifier, ModelArtifact, Node, Tree};
pub use scaler::{ScalerArtifact, StandardScaler};
