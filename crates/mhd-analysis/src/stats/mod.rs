//! Statistical routines over filtered records.
//!
//! Every function here is total: empty or degenerate input yields a defined
//! zero or empty result, never a panic or an error.

mod anomaly;
mod cluster;
mod correlation;
mod forecast;
mod regression;
mod timeseries;
mod treatment;

pub use anomaly::{AnomalyPoint, AnomalyReport, Sensitivity, anomalies, detect_anomalies};
pub use cluster::{ClusterPoint, DEFAULT_FEATURES, cluster_points};
pub use correlation::{CorrelationPair, CorrelationSummary, correlation_matrix, pearson};
pub use forecast::{
    FitMetrics, ForecastOptions, ForecastReport, ProjectedPoint, TREND_WINDOW, forecast,
    linear_trend,
};
pub use regression::{
    RegressionFactor, factor_categories, regression_factors, regression_factors_for,
};
pub use timeseries::{TimePoint, aggregate_by_year, time_series};
pub use treatment::{TreatmentShares, treatment_gap_summary};
