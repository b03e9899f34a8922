//! Error types for dataset acquisition and parsing.
//!
//! None of these reach callers of the ingestion pipeline: they are logged and
//! decide which parsing strategy runs next.

use std::path::PathBuf;

use thiserror::Error;

use crate::parse::DataOrigin;

/// Errors raised by a raw acquisition adapter.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Raw file for the dataset does not exist.
    #[error("raw data for {dataset} not found at {path}")]
    NotFound { dataset: String, path: PathBuf },

    /// Failed to read the raw file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller abandoned the acquisition.
    #[error("acquisition of {dataset} was cancelled")]
    Cancelled { dataset: String },

    /// Source reachable but unable to serve the dataset (timeout, bad status).
    #[error("{dataset} is unavailable: {reason}")]
    Unavailable { dataset: String, reason: String },
}

impl AcquisitionError {
    /// Returns true if the failure came from the caller abandoning the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Errors raised by a parsing strategy.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Delimited-text reader rejected the input.
    #[error("structured parse failed: {message}")]
    Structured { message: String },

    /// No non-empty header line was found.
    #[error("no header line found")]
    NoHeader,

    /// The strategy ran but produced no usable record.
    #[error("{strategy:?} parse produced no usable records")]
    InsufficientData { strategy: DataOrigin },

    /// Acquisition failed, so there is no text to parse.
    #[error("no raw text available")]
    NoInput,
}

/// Result type for parsing strategies.
pub type Result<T> = std::result::Result<T, ParseError>;

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        Self::Structured {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AcquisitionError::NotFound {
            dataset: "anxiety-treatment-gap".to_string(),
            path: PathBuf::from("/data/anxiety-treatment-gap.csv"),
        };
        assert_eq!(
            err.to_string(),
            "raw data for anxiety-treatment-gap not found at /data/anxiety-treatment-gap.csv"
        );
    }

    #[test]
    fn test_cancelled_is_detected() {
        let err = AcquisitionError::Cancelled {
            dataset: "x".to_string(),
        };
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = ParseError::InsufficientData {
            strategy: DataOrigin::Recovered,
        };
        assert_eq!(err.to_string(), "Recovered parse produced no usable records");
    }
}
