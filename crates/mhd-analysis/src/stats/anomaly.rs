//! Z-score anomaly detection.

use std::fmt;
use std::str::FromStr;

use mhd_model::{ModelError, Record};
use serde::{Deserialize, Serialize};

use crate::filter::{YearSelector, filter_by_year};

/// How far from the mean a value must be to count as anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    /// Flag beyond 3 standard deviations.
    Low,
    /// Flag beyond 2 standard deviations.
    #[default]
    Medium,
    /// Flag beyond 1.5 standard deviations.
    High,
}

impl Sensitivity {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Z-score a value must exceed.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Low => 3.0,
            Self::Medium => 2.0,
            Self::High => 1.5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sensitivity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownSensitivity(s.to_string()))
    }
}

/// A record's value and whether it is anomalous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPoint {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub is_anomaly: bool,
}

/// Anomaly points plus the statistics they were judged against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub points: Vec<AnomalyPoint>,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// `factor × std_dev`: the distance from the mean that is flagged.
    pub threshold: f64,
    pub count: usize,
    /// Share of points flagged, in percent.
    pub percentage: f64,
    /// Names of the flagged entities.
    pub entities: Vec<String>,
}

impl AnomalyReport {
    pub fn anomalies(&self) -> impl Iterator<Item = &AnomalyPoint> {
        self.points.iter().filter(|p| p.is_anomaly)
    }
}

/// Flags records of `year` whose `field` lies more than
/// `sensitivity.factor()` population standard deviations from the mean.
///
/// Records without a finite value are left out. Nothing is flagged when the
/// standard deviation is 0, and empty input yields an empty report.
#[allow(clippy::cast_precision_loss)]
pub fn detect_anomalies<R: Record>(
    records: &[R],
    field: &str,
    year: impl Into<YearSelector>,
    sensitivity: Sensitivity,
) -> AnomalyReport {
    let observed: Vec<(&R, f64)> = filter_by_year(records, year)
        .into_iter()
        .filter_map(|r| r.field_value(field).filter(|v| v.is_finite()).map(|v| (r, v)))
        .collect();
    if observed.is_empty() {
        return AnomalyReport::default();
    }

    let n = observed.len() as f64;
    let mean = observed.iter().map(|(_, v)| v).sum::<f64>() / n;
    let variance = observed.iter().map(|(_, v)| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let factor = sensitivity.factor();

    let points: Vec<AnomalyPoint> = observed
        .iter()
        .map(|(record, value)| AnomalyPoint {
            id: record.id().to_string(),
            name: record.entity().to_string(),
            value: *value,
            is_anomaly: std_dev > 0.0 && (value - mean).abs() / std_dev > factor,
        })
        .collect();

    let entities: Vec<String> = points
        .iter()
        .filter(|p| p.is_anomaly)
        .map(|p| p.name.clone())
        .collect();
    let count = entities.len();
    tracing::debug!(field, points = points.len(), count, %sensitivity, "anomaly scan");

    AnomalyReport {
        mean,
        std_dev,
        threshold: factor * std_dev,
        count,
        percentage: count as f64 / points.len() as f64 * 100.0,
        entities,
        points,
    }
}

/// The points of [`detect_anomalies`].
pub fn anomalies<R: Record>(
    records: &[R],
    field: &str,
    year: impl Into<YearSelector>,
    sensitivity: Sensitivity,
) -> Vec<AnomalyPoint> {
    detect_anomalies(records, field, year, sensitivity).points
}
