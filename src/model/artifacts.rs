//! Loads the fitted scaler and classifier from disk. Loading happens once at startup;
//! any failure here is fatal for the caller.

use super::gbdt::{GradientBoostedClassifier, ModelArtifact};
use super::scaler::{ScalerArtifact, StandardScaler};
use crate::error::{PredictorError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

/// Artifact format version this build understands
pub const FORMAT_VERSION: u32 = 1;

/// SHA-256 of each artifact file, hex encoded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFingerprints {
    pub scaler_sha256: String,
    pub model_sha256: String,
}

/// Immutable model state shared by every prediction in the process
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub scaler: StandardScaler,
    pub classifier: GradientBoostedClassifier,
    pub fingerprints: ArtifactFingerprints,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<(T, String)> {
    let bytes = std::fs::read(path).map_err(|source| PredictorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = format!("{:x}", Sha256::digest(&bytes));
    let value = serde_json::from_slice(&bytes).map_err(|source| PredictorError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((value, digest))
}

fn check_version(path: &Path, version: u32) -> Result<()> {
    if version != FORMAT_VERSION {
        return Err(PredictorError::invalid_artifact(
            path,
            format!(
                "unsupported format_version {} (expected {})",
                version, FORMAT_VERSION
            ),
        ));
    }
    Ok(())
}

impl Artifacts {
    /// Read and validate both artifacts. Has no side effects, so repeated calls are safe.
    pub fn load(scaler_path: &Path, model_path: &Path) -> Result<Self> {
        let (scaler_file, scaler_sha256): (ScalerArtifact, _) = read_json(scaler_path)?;
        check_version(scaler_path, scaler_file.format_version)?;
        let scaler = StandardScaler::from_artifact(scaler_file)
            .map_err(|reason| PredictorError::invalid_artifact(scaler_path, reason))?;

        let (model_file, model_sha256): (ModelArtifact, _) = read_json(model_path)?;
        check_version(model_path, model_file.format_version)?;
        let classifier = GradientBoostedClassifier::from_artifact(model_file)
            .map_err(|reason| PredictorError::invalid_artifact(model_path, reason))?;

        info!(
            scaler = %scaler_path.display(),
            model = %model_path.display(),
            scaler_sha256 = %scaler_sha256,
            model_sha256 = %model_sha256,
            trees = classifier.num_trees(),
            "artifacts loaded"
        );

        Ok(Self {
            scaler,
            classifier,
            fingerprints: ArtifactFingerprints {
                scaler_sha256,
                model_sha256,
            },
        })
    }

    /// Assemble from already-built parts (no files, empty fingerprints)
    pub fn from_parts(scaler: StandardScaler, classifier: GradientBoostedClassifier) -> Self {
        Self {
            scaler,
            classifier,
            fingerprints: ArtifactFingerprints::default(),
        }
    }
}
