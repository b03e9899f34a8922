//! Error types for parsing model-level identifiers.

use thiserror::Error;

/// Errors raised when text cannot be turned into a model value.
///
/// These only surface from `FromStr` implementations; record construction
/// and field lookup never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Disorder key is not one of the five fixed disorders or their aliases.
    #[error("unknown disorder: {0}")]
    UnknownDisorder(String),

    /// Region name is not in the region table.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// Sensitivity level is not low, medium or high.
    #[error("unknown sensitivity: {0}")]
    UnknownSensitivity(String),

    /// Period name is not all, recent or decade.
    #[error("unknown period: {0}")]
    UnknownPeriod(String),

    /// Year text does not start with a 4-digit year.
    #[error("invalid year: {0}")]
    InvalidYear(String),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnknownRegion("atlantis".to_string());
        assert_eq!(err.to_string(), "unknown region: atlantis");
    }
}
