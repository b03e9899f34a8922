//! Two-feature projection for external clustering.

use mhd_model::{Disorder, Record};
use serde::{Deserialize, Serialize};

use crate::filter::{YearSelector, filter_by_year};

/// Features used when fewer than two are requested.
pub const DEFAULT_FEATURES: [&str; 2] = [Disorder::Depression.field(), Disorder::Anxiety.field()];

/// A record projected onto two features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPoint {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Projects records of `year` onto the first two `features`.
///
/// Falls back to [`DEFAULT_FEATURES`] when fewer than two features are given.
/// Records missing either value are excluded. Cluster assignment is left to
/// the consumer.
pub fn cluster_points<R: Record>(
    records: &[R],
    features: &[&str],
    year: impl Into<YearSelector>,
) -> Vec<ClusterPoint> {
    let (x_field, y_field) = match features {
        [x, y, ..] => (*x, *y),
        _ => (DEFAULT_FEATURES[0], DEFAULT_FEATURES[1]),
    };

    filter_by_year(records, year)
        .into_iter()
        .filter_map(|record| {
            let x = record.field_value(x_field).filter(|v| v.is_finite())?;
            let y = record.field_value(y_field).filter(|v| v.is_finite())?;
            Some(ClusterPoint {
                id: record.id().to_string(),
                name: record.entity().to_string(),
                x,
                y,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhd_model::{RawRecord, RawValue};

    fn raw(entity: &str, year: f64, depression: Option<f64>, anxiety: f64) -> RawRecord {
        let mut record = RawRecord::new()
            .with("Entity", RawValue::Text(entity.to_string()))
            .with("Code", RawValue::Text(entity[..3].to_ascii_uppercase()))
            .with("Year", RawValue::Number(year))
            .with("Anxiety", RawValue::Number(anxiety));
        if let Some(value) = depression {
            record.insert("Depression", RawValue::Number(value));
        }
        record
    }

    #[test]
    fn test_default_features_and_exclusion() {
        let records = vec![
            raw("Brazil", 2019.0, Some(5.0), 6.0),
            raw("Chile", 2019.0, None, 5.5),
            raw("Peru", 2018.0, Some(4.0), 4.5),
        ];
        let points = cluster_points(&records, &["depression"], 2019);
        assert_eq!(
            points,
            vec![ClusterPoint {
                id: "BRA".to_string(),
                name: "Brazil".to_string(),
                x: 5.0,
                y: 6.0,
            }]
        );
    }

    #[test]
    fn test_explicit_features() {
        let records = vec![raw("Brazil", 2019.0, Some(5.0), 6.0)];
        let points = cluster_points(&records, &["anxiety", "depression"], "2019");
        assert_eq!((points[0].x, points[0].y), (6.0, 5.0));
        assert!(cluster_points(&records, &["anxiety", "Bogus"], 2019).is_empty());
    }
}
