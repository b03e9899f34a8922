//! Ingestion pipeline: acquisition, parsing, normalisation and caching.

use std::sync::Arc;
use std::time::Instant;

use mhd_model::{
    BurdenRecord, DatasetId, PrevalenceRecord, RecordKind, TreatmentGapRecord, TypedRecord,
};
use serde::Serialize;

use crate::cache::{CacheFill, DatasetCache};
use crate::parse::{DataOrigin, ParseInput, StrategyChain, generate_synthetic};
use crate::schema::normalize_records;
use crate::source::RawSource;

/// A dataset after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestedDataset {
    dataset: DatasetId,
    origin: DataOrigin,
    records: Vec<TypedRecord>,
}

impl IngestedDataset {
    pub fn new(dataset: DatasetId, origin: DataOrigin, records: Vec<TypedRecord>) -> Self {
        Self {
            dataset,
            origin,
            records,
        }
    }

    pub fn dataset(&self) -> &DatasetId {
        &self.dataset
    }

    /// Strategy that produced the records.
    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    /// Returns true if the records are synthetic placeholders.
    pub fn is_synthetic(&self) -> bool {
        !self.origin.is_genuine()
    }

    pub fn kind(&self) -> RecordKind {
        self.dataset.record_kind()
    }

    /// Records in source order.
    pub fn records(&self) -> &[TypedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn prevalence(&self) -> Vec<&PrevalenceRecord> {
        self.records.iter().filter_map(TypedRecord::as_prevalence).collect()
    }

    pub fn burden(&self) -> Vec<&BurdenRecord> {
        self.records.iter().filter_map(TypedRecord::as_burden).collect()
    }

    pub fn treatment_gap(&self) -> Vec<&TreatmentGapRecord> {
        self.records
            .iter()
            .filter_map(TypedRecord::as_treatment_gap)
            .collect()
    }
}

/// Turns dataset identifiers into typed records, at most once per identifier.
pub struct IngestPipeline<S> {
    source: S,
    cache: Arc<DatasetCache>,
    chain: StrategyChain,
}

impl<S: RawSource> IngestPipeline<S> {
    /// Creates a pipeline reading from `source` and storing into `cache`.
    pub fn new(source: S, cache: Arc<DatasetCache>) -> Self {
        Self {
            source,
            cache,
            chain: StrategyChain::default(),
        }
    }

    /// Replaces the parsing strategies tried before synthesis.
    #[must_use]
    pub fn with_chain(mut self, chain: StrategyChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &Arc<DatasetCache> {
        &self.cache
    }

    /// Ingests a dataset.
    ///
    /// Never fails: acquisition and parse failures fall back to synthetic
    /// records, which are always non-empty. A cancelled acquisition is not
    /// cached.
    pub fn ingest(&self, dataset: impl Into<DatasetId>) -> Arc<IngestedDataset> {
        let dataset = dataset.into();
        let span = tracing::info_span!("ingest", dataset = %dataset);
        let _guard = span.enter();
        self.cache.get_or_fill(&dataset, || self.load(&dataset))
    }

    fn load(&self, dataset: &DatasetId) -> CacheFill {
        let start = Instant::now();
        let mut cacheable = true;

        let text = match self.source.fetch(dataset) {
            Ok(text) => Some(text),
            Err(error) => {
                cacheable = !error.is_cancelled();
                tracing::warn!(%error, "acquisition failed");
                None
            }
        };

        let parsed = self
            .chain
            .run(&ParseInput::new(dataset, text.as_deref()));
        let kind = dataset.record_kind();
        let mut origin = parsed.origin;
        let mut records = normalize_records(kind, parsed.records);
        if records.is_empty() {
            tracing::warn!(strategy = %origin, "no typed records, using synthetic data");
            origin = DataOrigin::Synthetic;
            records = normalize_records(kind, generate_synthetic(dataset));
        }

        tracing::info!(
            origin = %origin,
            records = records.len(),
            duration_ms = start.elapsed().as_millis(),
            "dataset ingested"
        );

        let ingested = Arc::new(IngestedDataset::new(dataset.clone(), origin, records));
        if cacheable {
            CacheFill::Store(ingested)
        } else {
            CacheFill::Transient(ingested)
        }
    }
}
