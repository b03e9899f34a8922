//! Filters and statistics over mental-health records.
//!
//! All routines are generic over [`mhd_model::Record`], so they accept typed
//! records, untyped raw records, or borrowed slices produced by the filters.
//!
//! - **Filters**: region, year and period selection
//! - **Statistics**: per-year series with linear projection, Pearson
//!   correlation, z-score anomalies, two-feature projection, factor tables
//!   and treatment-gap shares

mod filter;
pub mod stats;

// === Filters ===
pub use filter::{
    Period, REFERENCE_YEAR, YearSelector, filter_by_period, filter_by_region, filter_by_year,
    filter_region,
};

// === Statistics ===
pub use stats::{
    AnomalyPoint, AnomalyReport, ClusterPoint, CorrelationPair, CorrelationSummary, FitMetrics,
    ForecastOptions, ForecastReport, ProjectedPoint, RegressionFactor, Sensitivity, TimePoint,
    TreatmentShares, aggregate_by_year, anomalies, cluster_points, correlation_matrix,
    detect_anomalies, forecast, pearson, regression_factors, regression_factors_for, time_series,
    treatment_gap_summary,
};
