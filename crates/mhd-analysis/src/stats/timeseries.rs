//! Per-year aggregation of a single field.

use std::collections::BTreeMap;

use mhd_model::Record;
use serde::{Deserialize, Serialize};

use crate::filter::filter_by_region;

/// Mean value of a field for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub year: i32,
    pub value: f64,
}

/// Averages `field` per year, ascending by year.
///
/// Non-finite and missing values are ignored. A year whose records carry no
/// valid value still gets a point, with mean 0. Records without a year are
/// skipped.
pub fn aggregate_by_year<R: Record>(records: &[R], field: &str) -> Vec<TimePoint> {
    let mut groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for record in records {
        let Some(year) = record.year() else {
            continue;
        };
        let group = groups.entry(year).or_insert((0.0, 0));
        if let Some(value) = record.field_value(field).filter(|v| v.is_finite()) {
            group.0 += value;
            group.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(year, (sum, count))| TimePoint {
            year,
            value: mean_or_zero(sum, count),
        })
        .collect()
}

/// Region-filtered [`aggregate_by_year`].
pub fn time_series<R: Record>(records: &[R], field: &str, region: &str) -> Vec<TimePoint> {
    let regional = filter_by_region(records, region);
    aggregate_by_year(&regional, field)
}

#[allow(clippy::cast_precision_loss)]
fn mean_or_zero(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}
