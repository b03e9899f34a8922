//! End-to-end scenarios from raw text to derived data.

use std::sync::Arc;

use mhd_analysis::{
    ForecastOptions, Sensitivity, cluster_points, correlation_matrix, detect_anomalies,
    filter_by_year, forecast, regression_factors, time_series, treatment_gap_summary,
};
use mhd_ingest::{AcquisitionError, DataOrigin, DatasetCache, IngestPipeline};
use mhd_model::{DatasetId, KnownDataset, PrevalenceRecord, Record, Region};

fn ingest(dataset: KnownDataset, text: &'static str) -> Arc<mhd_ingest::IngestedDataset> {
    let source = move |_: &DatasetId| Ok::<_, AcquisitionError>(text.to_string());
    IngestPipeline::new(source, Arc::new(DatasetCache::new())).ingest(dataset)
}

#[test]
fn test_depression_mean_for_2015() {
    let ingested = ingest(
        KnownDataset::MentalIllnessesPrevalence,
        "Entity,Year,Depression(%)\nBrazil,2015,4.2\nGlobal,2015,3.9\n",
    );
    let points = time_series(ingested.records(), "depression", "global");

    assert_eq!(points.len(), 1);
    assert_eq!(points[0].year, 2015);
    assert!((points[0].value - 4.05).abs() < 1e-12);
}

#[test]
fn test_blank_year_stays_out_of_series_and_forecast() {
    let ingested = ingest(
        KnownDataset::MentalIllnessesPrevalence,
        "Entity,Code,Year,Depression\nBrazil,BRA,,9.0\nBrazil,BRA,2015,3.0\nBrazil,BRA,2016,4.0\n",
    );
    assert_eq!(ingested.origin(), DataOrigin::Structured);
    assert_eq!(ingested.records()[0].year(), None);
    assert!(filter_by_year(ingested.records(), 0).is_empty());

    let points = time_series(ingested.records(), "depression", "global");
    let years: Vec<i32> = points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2015, 2016]);
    assert!((points[0].value - 3.0).abs() < 1e-12);
    assert!((points[1].value - 4.0).abs() < 1e-12);

    let report = forecast(
        &points,
        ForecastOptions {
            periods: 1,
            interval_width: 0.8,
        },
    );
    assert!((report.trend - 1.0).abs() < 1e-12);
    assert_eq!(report.projected[0].year, 2017);
    assert!((report.projected[0].predicted - 5.0).abs() < 1e-12);
}

#[test]
fn test_year_filter_picks_one_record() {
    let records = vec![
        PrevalenceRecord {
            entity: "A".to_string(),
            code: None,
            year: Some(2015),
            schizophrenia: 0.0,
            depression: 0.0,
            anxiety: 0.0,
            bipolar: 0.0,
            eating_disorders: 0.0,
        },
        PrevalenceRecord {
            entity: "B".to_string(),
            code: None,
            year: Some(2019),
            schizophrenia: 0.0,
            depression: 0.0,
            anxiety: 0.0,
            bipolar: 0.0,
            eating_disorders: 0.0,
        },
    ];
    let filtered = filter_by_year(&records, 2019);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].entity, "B");
}

#[test]
fn test_synthetic_data_supports_every_analysis() {
    let source = |id: &DatasetId| {
        Err::<String, _>(AcquisitionError::NotFound {
            dataset: id.to_string(),
            path: "missing.csv".into(),
        })
    };
    let pipeline = IngestPipeline::new(source, Arc::new(DatasetCache::new()));
    let prevalence = pipeline.ingest(KnownDataset::MentalIllnessesPrevalence);
    let records = prevalence.records();

    let europe = time_series(records, "anxiety", Region::Europe.name());
    assert_eq!(europe.len(), 5);

    let report = forecast(&europe, ForecastOptions::default());
    assert_eq!(report.projected.len(), 5);
    assert_eq!(report.projected[0].year, 2020);

    let matrix = correlation_matrix(records);
    assert!(matrix.iter().all(|p| (-1.0..=1.0).contains(&p.coefficient)));

    let anomalies = detect_anomalies(records, "depression", 2019, Sensitivity::High);
    assert_eq!(anomalies.points.len(), 10);

    let points = cluster_points(records, &[], 2018);
    assert_eq!(points.len(), 10);
    assert_eq!(points[0].id, "GLOBAL");

    assert_eq!(regression_factors("bipolar")[0].factor, "Genetic factors");

    let gap = pipeline.ingest(KnownDataset::AnxietyTreatmentGap);
    let shares = treatment_gap_summary(gap.records(), 2017);
    let total = shares.adequate_treatment + shares.other_treatments + shares.untreated;
    assert!((total - 100.0).abs() < 0.05, "{total}");
}

#[test]
fn test_derived_data_serializes_with_contract_names() {
    let ingested = ingest(
        KnownDataset::MentalIllnessesPrevalence,
        "Entity,Code,Year,Depression,Anxiety\nBrazil,BRA,2019,4.2,6.1\nChile,CHL,2019,5.0,6.5\n",
    );
    let anomaly = &detect_anomalies(ingested.records(), "depression", 2019, Sensitivity::Low)
        .points[0];
    let json = serde_json::to_value(anomaly).unwrap();
    assert_eq!(json["id"], "BRA");
    assert_eq!(json["isAnomaly"], false);

    let pair = &correlation_matrix(ingested.records())[0];
    let json = serde_json::to_value(pair).unwrap();
    assert_eq!(json["factorA"], "Depression");
    assert_eq!(json["factorB"], "Anxiety");
    let coefficient = json["coefficient"].as_f64().unwrap();
    assert!((coefficient - 1.0).abs() < 1e-9);
}
