//! Integration tests for the ingestion pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use mhd_ingest::{
    AcquisitionError, DataOrigin, DatasetCache, DirectorySource, IngestPipeline, RawSource,
    RecoveryParser, StrategyChain,
};
use mhd_model::{DatasetId, KnownDataset, Record, TypedRecord};

fn fixed(text: &'static str) -> impl RawSource {
    move |_: &DatasetId| Ok::<_, AcquisitionError>(text.to_string())
}

fn failing(id: &DatasetId) -> Result<String, AcquisitionError> {
    Err(AcquisitionError::Unavailable {
        dataset: id.to_string(),
        reason: "connection refused".to_string(),
    })
}

#[test]
fn test_scenario_depression_header() {
    let pipeline = IngestPipeline::new(
        fixed("Entity,Year,Depression(%)\nBrazil,2015,4.2\nGlobal,2015,3.9\n"),
        Arc::new(DatasetCache::new()),
    );
    let ingested = pipeline.ingest(KnownDataset::MentalIllnessesPrevalence);

    assert_eq!(ingested.origin(), DataOrigin::Structured);
    let depression: Vec<f64> = ingested
        .records()
        .iter()
        .filter_map(|r| r.field_value("Depression"))
        .collect();
    assert_eq!(depression, vec![4.2, 3.9]);
}

#[test]
fn test_unterminated_quote_still_yields_records() {
    let pipeline = IngestPipeline::new(
        fixed("Entity,Year,Depression\n\"Brazil,2015,4.2\n"),
        Arc::new(DatasetCache::new()),
    );
    let ingested = pipeline.ingest(KnownDataset::MentalIllnessesPrevalence);

    assert!(!ingested.is_empty());
    assert!(ingested.records().iter().all(|r| !r.entity().is_empty()));
}

#[test]
fn test_ragged_rows_are_recovered() {
    let text = "Entity,Code,Year,\"Potentially adequate treatment, conditional\",\
                \"Other treatments, conditional\",\"Untreated, conditional\"\n\
                Chile,CHL,2017,9.5,12.1,78.4,\n\
                Peru,PER,2017,8.0,10.0\n";
    let pipeline = IngestPipeline::new(fixed(text), Arc::new(DatasetCache::new()));
    let ingested = pipeline.ingest(KnownDataset::AnxietyTreatmentGap);

    let gap = ingested.treatment_gap();
    assert_eq!(ingested.origin(), DataOrigin::Recovered);
    assert_eq!(gap.len(), 2);
    assert_eq!(gap[0].code.as_deref(), Some("CHL"));
    assert_eq!(gap[0].adequate_treatment, 9.5);
    assert_eq!(gap[0].untreated, 78.4);
    assert_eq!(gap[1].untreated, 0.0);
}

#[test]
fn test_every_catalog_dataset_survives_failing_source() {
    let pipeline = IngestPipeline::new(failing, Arc::new(DatasetCache::new()));
    for known in KnownDataset::ALL {
        let ingested = pipeline.ingest(known);
        assert!(!ingested.is_empty(), "{known}");
        assert_eq!(ingested.origin(), DataOrigin::Synthetic);
        assert!(ingested.records().iter().all(|r| r.kind() == known.record_kind()));
    }
    let unknown = pipeline.ingest("not-in-catalog");
    assert!(matches!(unknown.records()[0], TypedRecord::Raw(_)));
}

#[test]
fn test_concurrent_requests_share_one_fetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);
    let source = move |_: &DatasetId| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        Ok::<_, AcquisitionError>("Entity,Year,Depression\nBrazil,2015,4.2\n".to_string())
    };
    let pipeline = IngestPipeline::new(source, Arc::new(DatasetCache::new()));

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| pipeline.ingest("mental-illnesses-prevalence")))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(pipeline.cache().len(), 1);
}

#[test]
fn test_distinct_datasets_are_cached_separately() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);
    let source = move |id: &DatasetId| {
        counter.fetch_add(1, Ordering::SeqCst);
        failing(id)
    };
    let pipeline = IngestPipeline::new(source, Arc::new(DatasetCache::new()));

    pipeline.ingest("mental-illnesses-prevalence");
    pipeline.ingest("mental-illnesses-prevalence");
    pipeline.ingest("anxiety-treatment-gap");

    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(pipeline.cache().len(), 2);
}

#[test]
fn test_cancelled_acquisition_is_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = move |id: &DatasetId| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(AcquisitionError::Cancelled {
                dataset: id.to_string(),
            })
        } else {
            Ok("Entity,Year,Depression\nBrazil,2015,4.2\n".to_string())
        }
    };
    let pipeline = IngestPipeline::new(source, Arc::new(DatasetCache::new()));

    let first = pipeline.ingest("mental-illnesses-prevalence");
    assert_eq!(first.origin(), DataOrigin::Synthetic);
    assert!(pipeline.cache().is_empty());

    let second = pipeline.ingest("mental-illnesses-prevalence");
    assert_eq!(second.origin(), DataOrigin::Structured);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(pipeline.cache().contains(&DatasetId::new("mental-illnesses-prevalence")));
}

#[test]
fn test_shared_cache_across_pipelines() {
    let cache = Arc::new(DatasetCache::new());
    let first = IngestPipeline::new(
        fixed("Entity,Year,Depression\nBrazil,2015,4.2\n"),
        Arc::clone(&cache),
    );
    let second = IngestPipeline::new(failing, Arc::clone(&cache));

    first.ingest("mental-illnesses-prevalence");
    let reused = second.ingest("mental-illnesses-prevalence");
    assert_eq!(reused.origin(), DataOrigin::Structured);
}

#[test]
fn test_custom_chain_replaces_default_strategies() {
    let recovery_only = IngestPipeline::new(
        fixed("Entity,Year,Depression\nBrazil,2015,4.2\n"),
        Arc::new(DatasetCache::new()),
    )
    .with_chain(StrategyChain::new(vec![Box::new(RecoveryParser)]));
    let recovered = recovery_only.ingest(KnownDataset::MentalIllnessesPrevalence);
    assert_eq!(recovered.origin(), DataOrigin::Recovered);
    assert_eq!(recovered.records()[0].field_value("Depression"), Some(4.2));

    let synthesis_only = IngestPipeline::new(
        fixed("Entity,Year,Depression\nBrazil,2015,4.2\n"),
        Arc::new(DatasetCache::new()),
    )
    .with_chain(StrategyChain::new(Vec::new()));
    let synthetic = synthesis_only.ingest(KnownDataset::MentalIllnessesPrevalence);
    assert!(synthetic.is_synthetic());
}

#[test]
fn test_directory_source_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("burden-disease-mental-illness.csv"),
        "Entity,Code,Year,\
         DALYs (rate) - Sex: Both - Age: Age-standardized - Cause: Depressive disorders,\
         DALYs (rate) - Sex: Both - Age: Age-standardized - Cause: Schizophrenia\n\
         Brazil,BRA,2019,690.1,180.4\n",
    )
    .unwrap();

    let pipeline = IngestPipeline::new(
        DirectorySource::new(dir.path()),
        Arc::new(DatasetCache::new()),
    );
    let ingested = pipeline.ingest(KnownDataset::BurdenDiseaseMentalIllness);
    let burden = ingested.burden();

    assert_eq!(ingested.origin(), DataOrigin::Structured);
    assert_eq!(burden[0].depression_dalys, 690.1);
    assert_eq!(burden[0].schizophrenia_dalys, 180.4);
    assert_eq!(burden[0].bipolar_dalys, 0.0);

    let missing = pipeline.ingest(KnownDataset::CountriesWithData);
    assert!(missing.is_synthetic());
}
