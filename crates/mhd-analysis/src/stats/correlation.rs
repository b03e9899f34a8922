//! Pearson correlation between disorder fields.

use mhd_model::{Disorder, Record};
use serde::{Deserialize, Serialize};

/// Correlation between two labelled fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPair {
    pub factor_a: String,
    pub factor_b: String,
    pub coefficient: f64,
}

/// Extremes and mean of a set of coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

impl CorrelationSummary {
    /// Summarises the coefficients; all zero for an empty set.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_pairs(pairs: &[CorrelationPair]) -> Self {
        if pairs.is_empty() {
            return Self::default();
        }
        let coefficients = pairs.iter().map(|p| p.coefficient);
        Self {
            max: coefficients.clone().fold(f64::NEG_INFINITY, f64::max),
            min: coefficients.clone().fold(f64::INFINITY, f64::min),
            mean: coefficients.sum::<f64>() / pairs.len() as f64,
        }
    }
}

/// Pearson coefficient of two fields over records where both are finite.
///
/// Returns 0 with fewer than two pairs or when either field is constant.
/// The result is clamped to `[-1, 1]`.
#[allow(clippy::cast_precision_loss)]
pub fn pearson<R: Record>(records: &[R], field_a: &str, field_b: &str) -> f64 {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| {
            let x = r.field_value(field_a).filter(|v| v.is_finite())?;
            let y = r.field_value(field_b).filter(|v| v.is_finite())?;
            Some((x, y))
        })
        .collect();
    if pairs.len() < 2 {
        return 0.0;
    }
    let constant = |pick: fn(&(f64, f64)) -> f64| {
        let first = pick(&pairs[0]);
        pairs.iter().all(|pair| pick(pair) == first)
    };
    if constant(|p| p.0) || constant(|p| p.1) {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    (sxy / denominator).clamp(-1.0, 1.0)
}

/// Coefficients for every unordered pair of the five disorders.
///
/// Pairs follow [`Disorder::ALL`] order: (Depression, Anxiety),
/// (Depression, Bipolar Disorder), and so on.
pub fn correlation_matrix<R: Record>(records: &[R]) -> Vec<CorrelationPair> {
    let mut pairs = Vec::with_capacity(10);
    for (i, a) in Disorder::ALL.iter().enumerate() {
        for b in &Disorder::ALL[i + 1..] {
            pairs.push(CorrelationPair {
                factor_a: a.label().to_string(),
                factor_b: b.label().to_string(),
                coefficient: pearson(records, a.field(), b.field()),
            });
        }
    }
    pairs
}
