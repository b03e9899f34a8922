use mhd_model::{
    DatasetId, Disorder, KnownDataset, PrevalenceRecord, RawRecord, RawValue, Record, RecordKind,
    Region, TreatmentGapRecord, TypedRecord,
};

fn treatment_gap(entity: &str, code: &str, year: i32) -> TreatmentGapRecord {
    TreatmentGapRecord {
        entity: entity.to_string(),
        code: Some(code.to_string()),
        year: Some(year),
        adequate_treatment: 7.0,
        other_treatments: 13.0,
        untreated: 80.0,
    }
}

#[test]
fn catalog_selects_record_shapes() {
    let cases = [
        ("mental-illnesses-prevalence", RecordKind::Prevalence),
        ("burden-disease-mental-illness", RecordKind::Burden),
        ("anxiety-treatment-gap", RecordKind::TreatmentGap),
        ("us-depressive-symptoms", RecordKind::UsDepressiveSymptoms),
        ("something-else", RecordKind::Raw),
    ];
    for (id, kind) in cases {
        assert_eq!(DatasetId::new(id).record_kind(), kind, "{id}");
    }
    assert_eq!(
        DatasetId::from(KnownDataset::AnxietyTreatmentGap).file_name(),
        "anxiety-treatment-gap.csv"
    );
}

#[test]
fn typed_record_serializes_with_source_field_names() {
    let record = TypedRecord::TreatmentGap(treatment_gap("Brazil", "BRA", 2017));
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["Entity"], "Brazil");
    assert_eq!(json["AdequateTreatment"], 7.0);
    assert_eq!(json["Year"], 2017);
}

#[test]
fn unknown_field_is_absent_for_every_shape() {
    let records = vec![
        TypedRecord::TreatmentGap(treatment_gap("Brazil", "BRA", 2017)),
        TypedRecord::Prevalence(PrevalenceRecord {
            entity: "Brazil".to_string(),
            code: Some("BRA".to_string()),
            year: Some(2017),
            schizophrenia: 0.0,
            depression: 0.0,
            anxiety: 0.0,
            bipolar: 0.0,
            eating_disorders: 0.0,
        }),
        TypedRecord::Raw(RawRecord::new().with("Entity", RawValue::Text("Brazil".into()))),
    ];
    for record in &records {
        assert_eq!(record.field_value("NotAField"), None);
    }
    // An all-zero record still answers its fields.
    assert_eq!(records[1].field_value("depression"), Some(0.0));
}

#[test]
fn disorder_labels_are_distinct() {
    let mut labels: Vec<_> = Disorder::ALL.iter().map(|d| d.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), 5);
}

#[test]
fn region_admits_only_its_codes() {
    let record = treatment_gap("Germany", "DEU", 2017);
    assert!(Region::Europe.admits(record.code()));
    assert!(!Region::Asia.admits(record.code()));
    assert!(Region::Global.admits(record.code()));
}
