//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictorError>;

#[derive(Error, Debug)]
pub enum PredictorError {
    /// Artifact or config file could not be read
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File was readable but not valid JSON for the expected shape
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but is structurally unusable
    #[error("Invalid artifact {path}: {reason}")]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Sensor reading outside its declared range
    #[error("Invalid reading for {field}: {reason}")]
    InvalidReading { field: &'static str, reason: String },

    /// Reading answers from the console or writing the report failed
    #[error("Console I/O error: {0}")]
    Console(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PredictorError {
    pub(crate) fn invalid_artifact(path: &std::path::Path, reason: impl Into<String>) -> Self {
        PredictorError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_failures_become_console_errors() {
        fn write_report() -> Result<()> {
            let written: std::io::Result<()> =
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            written?;
            Ok(())
        }
        let err = write_report().unwrap_err();
        assert!(matches!(err, PredictorError::Console(_)));
        assert_eq!(err.to_string(), "Console I/O error: closed");
    }
}
