//! Data model for the mental-health dataset pipeline.
//!
//! This crate holds the types shared by ingestion and analysis:
//!
//! - **Dataset catalog**: [`DatasetId`], [`KnownDataset`] and the record shape
//!   each identifier selects
//! - **Raw records**: [`RawRecord`] / [`RawValue`] produced by the parser
//! - **Typed records**: one struct per schema plus [`TypedRecord`], all
//!   answering the [`Record`] capability trait
//! - **Field keys**: the five fixed [`Disorder`]s and alias resolution
//! - **Region table**: [`Region`] and its static country-code sets

mod dataset;
mod error;
mod fields;
pub mod numeric;
mod raw;
mod records;
mod region;

// === Error Types ===
pub use error::{ModelError, Result};

// === Dataset Catalog ===
pub use dataset::{DatasetId, KnownDataset, RecordKind};

// === Records ===
pub use raw::{RawRecord, RawValue, compact_key};
pub use records::{
    BurdenRecord, CountriesWithDataRecord, PopulationCoverageRecord, PrevalenceRecord, Record,
    TreatmentGapRecord, TypedRecord, UsDepressiveSymptomsRecord,
};

// === Field Keys ===
pub use fields::{Disorder, resolve_field};

// === Regions ===
pub use region::Region;
