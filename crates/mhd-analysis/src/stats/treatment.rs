//! Treatment-gap shares for a year.

use mhd_model::Record;
use serde::{Deserialize, Serialize};

use crate::filter::{YearSelector, filter_by_year};

/// Mean treatment shares, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentShares {
    pub adequate_treatment: f64,
    pub other_treatments: f64,
    pub untreated: f64,
}

impl TreatmentShares {
    /// Shares reported when no record matches.
    pub const REFERENCE: Self = Self {
        adequate_treatment: 7.1,
        other_treatments: 13.3,
        untreated: 79.6,
    };
}

/// Averages the three shares over records of `year`.
///
/// Each share is averaged over the records that carry it. When no record
/// matches the year, [`TreatmentShares::REFERENCE`] is returned.
pub fn treatment_gap_summary<R: Record>(
    records: &[R],
    year: impl Into<YearSelector>,
) -> TreatmentShares {
    let matching = filter_by_year(records, year);
    if matching.is_empty() {
        return TreatmentShares::REFERENCE;
    }
    TreatmentShares {
        adequate_treatment: mean_of(&matching, "AdequateTreatment"),
        other_treatments: mean_of(&matching, "OtherTreatments"),
        untreated: mean_of(&matching, "Untreated"),
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_of<R: Record>(records: &[R], field: &str) -> f64 {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.field_value(field))
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
