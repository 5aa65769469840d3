//! Mining equipment failure predictor.
//!
//! Modular structure:
//! - [`features`] — Sensor readings, input bounds, and the six-feature model vector
//! - [`model`] — Scaler and gradient-boosted classifier artifacts, and their loader
//! - [`risk`] — Inference engine: failure probability, label, severity tier
//! - [`explain`] — Global feature importance and per-prediction sensitivity
//! - [`pipeline`] — Readings to report, with explanation gating
//! - [`report`] — Text and JSON rendering
//! - [`prompt`] — Interactive prompt session
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod risk;

pub use config::PredictorConfig;
pub use error::{PredictorError, Result};
pub use features::{FeatureVector, MachineType, SensorReadings};
pub use logging::StructuredLogger;
pub use model::Artifacts;
pub use pipeline::{ExplainMode, PredictionPipeline};
pub use report::Report;
pub use risk::{Predictor, Severity};
