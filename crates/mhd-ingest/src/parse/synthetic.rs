//! Deterministic placeholder data for datasets that could not be parsed.
//!
//! Values are drawn from a PCG stream seeded by the dataset identifier, so
//! the same dataset always synthesises the same records.

use mhd_model::{DatasetId, RawRecord, RawValue, RecordKind};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::error::Result;

use super::{DataOrigin, ParseInput, ParseStrategy};

/// Entities used for synthetic data as `(name, code)`.
pub const SYNTHETIC_ENTITIES: [(&str, &str); 10] = [
    ("Global", "GLOBAL"),
    ("United States", "USA"),
    ("Brazil", "BRA"),
    ("United Kingdom", "GBR"),
    ("Germany", "DEU"),
    ("India", "IND"),
    ("China", "CHN"),
    ("Japan", "JPN"),
    ("Australia", "AUS"),
    ("South Africa", "ZAF"),
];

/// Years covered by synthetic data.
pub const SYNTHETIC_YEARS: [i32; 5] = [2015, 2016, 2017, 2018, 2019];

/// Terminal strategy. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl ParseStrategy for SyntheticGenerator {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Synthetic
    }

    fn parse(&self, input: &ParseInput<'_>) -> Result<Vec<RawRecord>> {
        Ok(generate_synthetic(input.dataset))
    }
}

/// Generates one record per entity and year, shaped for the dataset.
pub fn generate_synthetic(dataset: &DatasetId) -> Vec<RawRecord> {
    let mut rng = Pcg32::seed_from_u64(seed_for(dataset));
    let kind = dataset.record_kind();
    let mut records = Vec::with_capacity(SYNTHETIC_ENTITIES.len() * SYNTHETIC_YEARS.len());

    for (entity, code) in SYNTHETIC_ENTITIES {
        for year in SYNTHETIC_YEARS {
            let mut record = RawRecord::new()
                .with("Entity", RawValue::Text(entity.to_string()))
                .with("Year", RawValue::Number(f64::from(year)));
            if has_code(kind) {
                record.insert("Code", RawValue::Text(code.to_string()));
            }
            for (key, value) in measures(kind, &mut rng) {
                record.insert(key, RawValue::Number(value));
            }
            records.push(record);
        }
    }

    tracing::debug!(dataset = %dataset, records = records.len(), "generated synthetic records");
    records
}

fn has_code(kind: RecordKind) -> bool {
    !matches!(
        kind,
        RecordKind::UsDepressiveSymptoms | RecordKind::CountriesWithData
    )
}

fn measures(kind: RecordKind, rng: &mut Pcg32) -> Vec<(&'static str, f64)> {
    match kind {
        RecordKind::Prevalence => vec![
            ("Schizophrenia", draw(rng, 0.2, 0.4)),
            ("Depression", draw(rng, 2.5, 6.0)),
            ("Anxiety", draw(rng, 2.5, 7.5)),
            ("Bipolar", draw(rng, 0.3, 1.2)),
            ("EatingDisorders", draw(rng, 0.1, 0.8)),
        ],
        RecordKind::Burden => vec![
            ("DepressionDALYs", draw(rng, 400.0, 900.0)),
            ("SchizophreniaDALYs", draw(rng, 150.0, 300.0)),
            ("BipolarDALYs", draw(rng, 80.0, 200.0)),
            ("EatingDisordersDALYs", draw(rng, 20.0, 80.0)),
            ("AnxietyDALYs", draw(rng, 250.0, 600.0)),
        ],
        RecordKind::TreatmentGap => {
            let adequate = draw(rng, 2.0, 20.0);
            let other = draw(rng, 5.0, 25.0);
            vec![
                ("AdequateTreatment", adequate),
                ("OtherTreatments", other),
                ("Untreated", round2(100.0 - adequate - other)),
            ]
        }
        RecordKind::PopulationCoverage => vec![
            ("MajorDepression", draw(rng, 0.0, 100.0)),
            ("BipolarDisorder", draw(rng, 0.0, 100.0)),
            ("EatingDisorders", draw(rng, 0.0, 100.0)),
            ("Dysthymia", draw(rng, 0.0, 100.0)),
            ("Schizophrenia", draw(rng, 0.0, 100.0)),
            ("AnxietyDisorders", draw(rng, 0.0, 100.0)),
        ],
        RecordKind::UsDepressiveSymptoms => vec![
            ("NearlyEveryDay", draw(rng, 0.0, 100.0)),
            ("MoreThanHalfDays", draw(rng, 0.0, 100.0)),
            ("SeveralDays", draw(rng, 0.0, 100.0)),
            ("NotAtAll", draw(rng, 0.0, 100.0)),
        ],
        RecordKind::CountriesWithData => vec![("NumberOfCountries", draw(rng, 1.0, 60.0).round())],
        RecordKind::Raw => vec![("Value", draw(rng, 0.0, 100.0))],
    }
}

fn draw(rng: &mut Pcg32, low: f64, high: f64) -> f64 {
    round2(rng.random_range(low..=high))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// FNV-1a hash of the dataset identifier.
fn seed_for(dataset: &DatasetId) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    dataset
        .as_str()
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}
