//! Mapping of raw records onto typed record shapes.
//!
//! Every field is looked up through a list of candidate keys because the
//! header text differs between releases of the same dataset. Numeric fields
//! use `parseFloat` semantics and default to 0; records without an entity
//! are dropped. A record keeps no year unless its Year cell holds a 4-digit
//! year.

use mhd_model::numeric::is_year;
use mhd_model::{
    BurdenRecord, CountriesWithDataRecord, PopulationCoverageRecord, PrevalenceRecord, RawRecord,
    RawValue, RecordKind, TreatmentGapRecord, TypedRecord, UsDepressiveSymptomsRecord,
};

// === Prevalence ===

const SCHIZOPHRENIA: &[&str] = &[
    "Schizophrenia",
    "Schizophreniadisorders",
    "Schizophreniadisorderssharepopulation",
];
const DEPRESSION: &[&str] = &[
    "Depression",
    "Depressivedisorders",
    "Depressivedisorderssharepopulation",
];
const ANXIETY: &[&str] = &[
    "Anxiety",
    "Anxietydisorders",
    "Anxietydisorderssharepopulation",
];
const BIPOLAR: &[&str] = &[
    "Bipolar",
    "Bipolardisorders",
    "Bipolardisorderssharepopulation",
];
const EATING: &[&str] = &[
    "EatingDisorders",
    "Eatingdisorders",
    "Eatingdisorderssharepopulation",
];

// === Burden (DALYs) ===

const DEPRESSION_DALYS: &[&str] = &[
    "DepressionDALYs",
    "DALYsrateSexBothAgeAgestandardizedCauseDepressivedisorders",
];
const SCHIZOPHRENIA_DALYS: &[&str] = &[
    "SchizophreniaDALYs",
    "DALYsrateSexBothAgeAgestandardizedCauseSchizophrenia",
];
const BIPOLAR_DALYS: &[&str] = &[
    "BipolarDALYs",
    "DALYsrateSexBothAgeAgestandardizedCauseBipolardisorder",
];
const EATING_DALYS: &[&str] = &[
    "EatingDisordersDALYs",
    "DALYsrateSexBothAgeAgestandardizedCauseEatingdisorders",
];
const ANXIETY_DALYS: &[&str] = &[
    "AnxietyDALYs",
    "DALYsrateSexBothAgeAgestandardizedCauseAnxietydisorders",
];

// === Treatment gap ===

const ADEQUATE: &[&str] = &[
    "AdequateTreatment",
    "Potentiallyadequatetreatmentconditional",
    "Potentiallyadequatetreatment",
];
const OTHER: &[&str] = &[
    "OtherTreatments",
    "Othertreatmentsconditional",
    "Othertreatments",
];
const UNTREATED: &[&str] = &["Untreated", "Untreatedconditional"];

// === Coverage ===

const MAJOR_DEPRESSION: &[&str] = &["MajorDepression", "Majordepression"];
const BIPOLAR_DISORDER: &[&str] = &["BipolarDisorder", "Bipolardisorder"];
const EATING_COVERAGE: &[&str] = &["EatingDisorders", "Eatingdisorders"];
const DYSTHYMIA: &[&str] = &["Dysthymia"];
const SCHIZOPHRENIA_COVERAGE: &[&str] = &["Schizophrenia"];
const ANXIETY_COVERAGE: &[&str] = &["AnxietyDisorders", "Anxietydisorders"];

// === Symptoms and country counts ===

const NEARLY_EVERY_DAY: &[&str] = &["NearlyEveryDay", "Nearlyeveryday"];
const MORE_THAN_HALF: &[&str] = &["MoreThanHalfDays", "Morethanhalfthedays"];
const SEVERAL_DAYS: &[&str] = &["SeveralDays", "Severaldays"];
const NOT_AT_ALL: &[&str] = &["NotAtAll", "Notatall"];
const NUMBER_OF_COUNTRIES: &[&str] = &["NumberOfCountries", "Numberofcountries"];

/// Maps raw records to the typed shape of `kind`.
///
/// Records without an entity are dropped; everything else is emitted, even
/// when all numeric fields fall back to 0.
pub fn normalize_records(kind: RecordKind, records: Vec<RawRecord>) -> Vec<TypedRecord> {
    let total = records.len();
    let typed: Vec<TypedRecord> = records
        .into_iter()
        .filter_map(|record| normalize_record(kind, record))
        .collect();
    if typed.len() < total {
        tracing::debug!(
            kind = ?kind,
            dropped = total - typed.len(),
            "dropped records without entity"
        );
    }
    typed
}

/// Maps a single raw record; `None` if it has no entity.
pub fn normalize_record(kind: RecordKind, record: RawRecord) -> Option<TypedRecord> {
    let entity = record.entity()?;
    let typed = match kind {
        RecordKind::Prevalence => TypedRecord::Prevalence(PrevalenceRecord {
            entity,
            code: code(&record),
            year: year(&record),
            schizophrenia: number(&record, SCHIZOPHRENIA),
            depression: number(&record, DEPRESSION),
            anxiety: number(&record, ANXIETY),
            bipolar: number(&record, BIPOLAR),
            eating_disorders: number(&record, EATING),
        }),
        RecordKind::Burden => TypedRecord::Burden(BurdenRecord {
            entity,
            code: code(&record),
            year: year(&record),
            depression_dalys: number(&record, DEPRESSION_DALYS),
            schizophrenia_dalys: number(&record, SCHIZOPHRENIA_DALYS),
            bipolar_dalys: number(&record, BIPOLAR_DALYS),
            eating_disorders_dalys: number(&record, EATING_DALYS),
            anxiety_dalys: number(&record, ANXIETY_DALYS),
        }),
        RecordKind::TreatmentGap => TypedRecord::TreatmentGap(TreatmentGapRecord {
            entity,
            code: code(&record),
            year: year(&record),
            adequate_treatment: number(&record, ADEQUATE),
            other_treatments: number(&record, OTHER),
            untreated: number(&record, UNTREATED),
        }),
        RecordKind::PopulationCoverage => {
            TypedRecord::PopulationCoverage(PopulationCoverageRecord {
                entity,
                code: code(&record),
                year: year(&record),
                major_depression: number(&record, MAJOR_DEPRESSION),
                bipolar_disorder: optional(&record, BIPOLAR_DISORDER),
                eating_disorders: optional(&record, EATING_COVERAGE),
                dysthymia: optional(&record, DYSTHYMIA),
                schizophrenia: optional(&record, SCHIZOPHRENIA_COVERAGE),
                anxiety_disorders: optional(&record, ANXIETY_COVERAGE),
            })
        }
        RecordKind::UsDepressiveSymptoms => {
            TypedRecord::UsDepressiveSymptoms(UsDepressiveSymptomsRecord {
                entity,
                year: year(&record),
                nearly_every_day: number(&record, NEARLY_EVERY_DAY),
                more_than_half_days: number(&record, MORE_THAN_HALF),
                several_days: number(&record, SEVERAL_DAYS),
                not_at_all: number(&record, NOT_AT_ALL),
            })
        }
        RecordKind::CountriesWithData => TypedRecord::CountriesWithData(CountriesWithDataRecord {
            entity,
            year: year(&record),
            number_of_countries: number(&record, NUMBER_OF_COUNTRIES),
        }),
        RecordKind::Raw => TypedRecord::Raw(record),
    };
    Some(typed)
}

fn code(record: &RawRecord) -> Option<String> {
    record
        .get("Code")
        .and_then(RawValue::as_text)
        .filter(|text| !text.trim().is_empty())
}

fn year(record: &RawRecord) -> Option<i32> {
    record
        .get("Year")
        .and_then(RawValue::as_i32)
        .filter(|year| is_year(*year))
}

fn number(record: &RawRecord, candidates: &[&str]) -> f64 {
    optional(record, candidates).unwrap_or(0.0)
}

fn optional(record: &RawRecord, candidates: &[&str]) -> Option<f64> {
    record.lookup(candidates).and_then(RawValue::as_f64)
}
