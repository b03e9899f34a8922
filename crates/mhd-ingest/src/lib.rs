//! Resilient ingestion of delimited mental-health datasets.
//!
//! Raw text flows through four stages:
//!
//! - **Acquisition**: a [`RawSource`] supplies text by dataset identifier
//! - **Parsing**: [`StrategyChain`] tries a strict reader, then line recovery,
//!   then synthesises placeholder data, so ingestion never fails
//! - **Normalisation**: [`normalize_records`] maps raw records onto the typed
//!   shape selected by the dataset identifier
//! - **Caching**: [`DatasetCache`] keeps one result per identifier and lets
//!   concurrent callers share a single in-flight ingestion
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mhd_ingest::{DatasetCache, DirectorySource, IngestPipeline};
//!
//! let pipeline = IngestPipeline::new(DirectorySource::new("data"), Arc::new(DatasetCache::new()));
//! let prevalence = pipeline.ingest("mental-illnesses-prevalence");
//! println!("{} records ({})", prevalence.len(), prevalence.origin());
//! ```

mod cache;
mod error;
mod header;
mod parse;
mod pipeline;
mod schema;
mod source;

// === Error Types ===
pub use error::{AcquisitionError, ParseError, Result};

// === Header Normalisation ===
pub use header::{ColumnLayout, compact_header, normalize_header};

// === Parsing ===
pub use parse::{
    DataOrigin, ParseInput, ParseStrategy, ParsedRecords, RecoveryParser, SYNTHETIC_ENTITIES,
    SYNTHETIC_YEARS, StrategyChain, StructuredParser, SyntheticGenerator, generate_synthetic,
    parse_dataset, parse_recovered, parse_structured, split_fields,
};

// === Schema Normalisation ===
pub use schema::{normalize_record, normalize_records};

// === Acquisition ===
pub use source::{DirectorySource, RawSource};

// === Pipeline ===
pub use cache::{CacheFill, DatasetCache};
pub use pipeline::{IngestPipeline, IngestedDataset};
