//! Linear trend projection beyond the last observed year.
//!
//! This is a plain extrapolation: the trend is the mean first difference of
//! the last few points, and the interval is a fixed fraction of the
//! projected value. No model is fitted.

use serde::{Deserialize, Serialize};

use super::timeseries::TimePoint;

/// Number of trailing points the trend is measured over.
pub const TREND_WINDOW: usize = 5;

/// Projection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastOptions {
    /// Number of future years to project.
    pub periods: usize,
    /// Interval width in `[0, 1]`; 1 collapses the interval to the point.
    pub interval_width: f64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            periods: 5,
            interval_width: 0.8,
        }
    }
}

/// A projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub year: i32,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// In-sample fit of one-step-ahead predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub rmse: f64,
    pub mae: f64,
    /// Mean absolute percentage error over non-zero actuals.
    pub mape: f64,
    pub r2: f64,
}

/// Observed series, projection and fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub observed: Vec<TimePoint>,
    pub projected: Vec<ProjectedPoint>,
    /// Mean first difference over the trend window.
    pub trend: f64,
    pub metrics: FitMetrics,
}

/// Mean of consecutive differences of the last [`TREND_WINDOW`] points.
///
/// Returns 0 with fewer than two points.
#[allow(clippy::cast_precision_loss)]
pub fn linear_trend(points: &[TimePoint]) -> f64 {
    let window = &points[points.len().saturating_sub(TREND_WINDOW)..];
    if window.len() < 2 {
        return 0.0;
    }
    let total: f64 = window.windows(2).map(|w| w[1].value - w[0].value).sum();
    total / (window.len() - 1) as f64
}

/// Projects `options.periods` years past the last point.
///
/// Empty input gives an empty report.
pub fn forecast(points: &[TimePoint], options: ForecastOptions) -> ForecastReport {
    let Some(last) = points.last() else {
        return ForecastReport::default();
    };
    let trend = linear_trend(points);
    let width = options.interval_width.clamp(0.0, 1.0);

    let projected = (1..=options.periods)
        .map(|step| {
            let steps = i32::try_from(step).unwrap_or(i32::MAX);
            #[allow(clippy::cast_precision_loss)]
            let predicted = last.value + trend * step as f64;
            let half = (predicted * (1.0 - width) / 2.0).abs();
            ProjectedPoint {
                year: last.year.saturating_add(steps),
                predicted,
                lower: predicted - half,
                upper: predicted + half,
            }
        })
        .collect();

    ForecastReport {
        observed: points.to_vec(),
        projected,
        trend,
        metrics: fit_metrics(points, trend),
    }
}

#[allow(clippy::cast_precision_loss)]
fn fit_metrics(points: &[TimePoint], trend: f64) -> FitMetrics {
    if points.len() < 2 {
        return FitMetrics::default();
    }
    let pairs: Vec<(f64, f64)> = points
        .windows(2)
        .map(|w| (w[1].value, w[0].value + trend))
        .collect();
    let n = pairs.len() as f64;

    let squared: f64 = pairs.iter().map(|(a, p)| (a - p).powi(2)).sum();
    let absolute: f64 = pairs.iter().map(|(a, p)| (a - p).abs()).sum();

    let relative: Vec<f64> = pairs
        .iter()
        .filter(|(actual, _)| *actual != 0.0)
        .map(|(actual, predicted)| ((actual - predicted) / actual).abs())
        .collect();
    let mape = if relative.is_empty() {
        0.0
    } else {
        relative.iter().sum::<f64>() / relative.len() as f64 * 100.0
    };

    let mean_actual = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let total: f64 = pairs.iter().map(|(a, _)| (a - mean_actual).powi(2)).sum();
    let r2 = if total == 0.0 { 0.0 } else { 1.0 - squared / total };

    FitMetrics {
        rmse: (squared / n).sqrt(),
        mae: absolute / n,
        mape,
        r2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<TimePoint> {
        values
            .iter()
            .zip(2010..)
            .map(|(&value, year)| TimePoint { year, value })
            .collect()
    }

    #[test]
    fn test_trend_uses_last_five_points() {
        let points = series(&[100.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(linear_trend(&points), 1.0);
        assert_eq!(linear_trend(&series(&[7.0])), 0.0);
        assert_eq!(linear_trend(&[]), 0.0);
    }

    #[test]
    fn test_projection_and_interval() {
        let report = forecast(
            &series(&[2.0, 4.0]),
            ForecastOptions {
                periods: 2,
                interval_width: 0.8,
            },
        );
        assert_eq!(report.projected.len(), 2);
        let first = report.projected[0];
        assert_eq!(first.year, 2012);
        assert_eq!(first.predicted, 6.0);
        assert!((first.lower - 5.4).abs() < 1e-9);
        assert!((first.upper - 6.6).abs() < 1e-9);
        assert_eq!(report.projected[1].predicted, 8.0);
    }

    #[test]
    fn test_perfect_line_fits_exactly() {
        let report = forecast(&series(&[1.0, 2.0, 3.0, 4.0]), ForecastOptions::default());
        assert_eq!(report.metrics.rmse, 0.0);
        assert_eq!(report.metrics.mae, 0.0);
        assert_eq!(report.metrics.mape, 0.0);
        assert_eq!(report.metrics.r2, 1.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = forecast(&[], ForecastOptions::default());
        assert!(empty.projected.is_empty());
        assert_eq!(empty.metrics, FitMetrics::default());

        let flat = forecast(&series(&[3.0, 3.0, 3.0]), ForecastOptions::default());
        assert_eq!(flat.trend, 0.0);
        assert_eq!(flat.metrics.r2, 0.0);
        assert!(flat.projected.iter().all(|p| p.predicted == 3.0));
    }
}
