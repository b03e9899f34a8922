//! Multi-strategy parsing of raw delimited text.
//!
//! Strategies are tried in order and the first one producing usable records
//! wins:
//!
//! 1. [`StructuredParser`]: strict delimited-text reader
//! 2. [`RecoveryParser`]: line-oriented, quote-aware fallback
//! 3. [`SyntheticGenerator`]: deterministic placeholder data, never fails
//!
//! A strategy's output is usable when at least one record names an entity.
//! Failures are logged and never returned; [`StrategyChain::run`] always
//! yields records.

mod recovery;
mod structured;
mod synthetic;

use std::fmt;

use mhd_model::{DatasetId, RawRecord};
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

pub use recovery::{RecoveryParser, parse_recovered, split_fields};
pub use structured::{StructuredParser, parse_structured};
pub use synthetic::{SYNTHETIC_ENTITIES, SYNTHETIC_YEARS, SyntheticGenerator, generate_synthetic};

/// Which strategy produced a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    /// Strict delimited-text parse.
    Structured,
    /// Line-oriented recovery parse.
    Recovered,
    /// Generated placeholder data.
    Synthetic,
}

impl DataOrigin {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Recovered => "recovered",
            Self::Synthetic => "synthetic",
        }
    }

    /// Returns true if the records came from the raw source.
    pub const fn is_genuine(self) -> bool {
        !matches!(self, Self::Synthetic)
    }
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input handed to every strategy.
#[derive(Debug, Clone, Copy)]
pub struct ParseInput<'a> {
    pub dataset: &'a DatasetId,
    /// Raw text, or `None` when acquisition failed.
    pub text: Option<&'a str>,
}

impl<'a> ParseInput<'a> {
    pub fn new(dataset: &'a DatasetId, text: Option<&'a str>) -> Self {
        Self { dataset, text }
    }

    /// Raw text, or [`ParseError::NoInput`].
    pub fn require_text(&self) -> Result<&'a str> {
        self.text.ok_or(ParseError::NoInput)
    }
}

/// A way of turning raw text into records.
pub trait ParseStrategy: Send + Sync {
    /// Origin tag attached to records this strategy produces.
    fn origin(&self) -> DataOrigin;

    /// Parses the input.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is missing or cannot be read by this
    /// strategy. An `Ok` with no usable record is treated like an error.
    fn parse(&self, input: &ParseInput<'_>) -> Result<Vec<RawRecord>>;
}

/// Records produced by the chain together with their origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecords {
    pub origin: DataOrigin,
    pub records: Vec<RawRecord>,
}

/// Ordered strategies ending in the synthetic generator.
pub struct StrategyChain {
    strategies: Vec<Box<dyn ParseStrategy>>,
    terminal: SyntheticGenerator,
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::new(vec![Box::new(StructuredParser), Box::new(RecoveryParser)])
    }
}

impl StrategyChain {
    /// Creates a chain trying `strategies` in order before synthesis.
    pub fn new(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self {
            strategies,
            terminal: SyntheticGenerator,
        }
    }

    /// Origins of the fallible strategies, in order.
    pub fn origins(&self) -> Vec<DataOrigin> {
        self.strategies.iter().map(|s| s.origin()).collect()
    }

    /// Runs the strategies in order, falling back to synthesis.
    pub fn run(&self, input: &ParseInput<'_>) -> ParsedRecords {
        for strategy in &self.strategies {
            let origin = strategy.origin();
            match strategy.parse(input) {
                Ok(records) if has_usable_record(&records) => {
                    tracing::debug!(
                        dataset = %input.dataset,
                        strategy = %origin,
                        records = records.len(),
                        "strategy succeeded"
                    );
                    return ParsedRecords { origin, records };
                }
                Ok(records) => {
                    tracing::warn!(
                        dataset = %input.dataset,
                        strategy = %origin,
                        records = records.len(),
                        "strategy produced no usable records, falling back"
                    );
                }
                Err(ParseError::NoInput) => {
                    tracing::debug!(dataset = %input.dataset, strategy = %origin, "no raw text");
                }
                Err(error) => {
                    tracing::warn!(
                        dataset = %input.dataset,
                        strategy = %origin,
                        %error,
                        "strategy failed, falling back"
                    );
                }
            }
        }
        tracing::warn!(dataset = %input.dataset, "using synthetic data");
        ParsedRecords {
            origin: self.terminal.origin(),
            records: generate_synthetic(input.dataset),
        }
    }
}

/// Runs the default chain.
pub fn parse_dataset(dataset: &DatasetId, text: Option<&str>) -> ParsedRecords {
    StrategyChain::default().run(&ParseInput::new(dataset, text))
}

fn has_usable_record(records: &[RawRecord]) -> bool {
    records.iter().any(|record| record.entity().is_some())
}
