//! Disorder keys and field-name resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The five disorders tracked by the prevalence dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Disorder {
    Depression,
    Anxiety,
    Bipolar,
    Schizophrenia,
    EatingDisorders,
}

impl Disorder {
    /// Fixed order used for correlation pairs.
    pub const ALL: [Self; 5] = [
        Self::Depression,
        Self::Anxiety,
        Self::Bipolar,
        Self::Schizophrenia,
        Self::EatingDisorders,
    ];

    /// Field name on prevalence records.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Depression => "Depression",
            Self::Anxiety => "Anxiety",
            Self::Bipolar => "Bipolar",
            Self::Schizophrenia => "Schizophrenia",
            Self::EatingDisorders => "EatingDisorders",
        }
    }

    /// Short alias accepted from callers.
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Depression => "depression",
            Self::Anxiety => "anxiety",
            Self::Bipolar => "bipolar",
            Self::Schizophrenia => "schizophrenia",
            Self::EatingDisorders => "eating",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Depression => "Depression",
            Self::Anxiety => "Anxiety",
            Self::Bipolar => "Bipolar Disorder",
            Self::Schizophrenia => "Schizophrenia",
            Self::EatingDisorders => "Eating Disorders",
        }
    }
}

impl fmt::Display for Disorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Disorder {
    type Err = ModelError;

    /// Accepts the alias or the field name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| {
                d.alias().eq_ignore_ascii_case(trimmed) || d.field().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ModelError::UnknownDisorder(s.to_string()))
    }
}

/// Maps a caller-supplied key to a record field name.
///
/// Disorder aliases resolve to their field names; any other key is returned
/// unchanged so that records can answer it or report it absent.
pub fn resolve_field(key: &str) -> &str {
    match key.parse::<Disorder>() {
        Ok(disorder) => disorder.field(),
        Err(_) => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(resolve_field("depression"), "Depression");
        assert_eq!(resolve_field("eating"), "EatingDisorders");
        assert_eq!(resolve_field("EatingDisorders"), "EatingDisorders");
        assert_eq!(resolve_field("DepressionDALYs"), "DepressionDALYs");
    }

    #[test]
    fn test_unknown_disorder() {
        assert!(matches!(
            "insomnia".parse::<Disorder>(),
            Err(ModelError::UnknownDisorder(_))
        ));
    }
}
