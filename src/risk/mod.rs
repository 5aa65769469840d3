//! Inference engine: failure probability, binary label, severity tier.

mod engine;

pub use engine::{Label, Prediction, Predictor, Severity};
