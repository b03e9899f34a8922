//! CLI argument definitions for `mhd`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mhd_analysis::{Period, Sensitivity};

#[derive(Parser)]
#[command(
    name = "mhd",
    version,
    about = "Mental-health dataset explorer - ingest prevalence data and derive statistics",
    long_about = "Ingest mental-health epidemiology datasets and derive statistics from them.\n\n\
                  Raw files are read from the data directory as <dataset>.csv. Unreadable\n\
                  or missing files fall back to synthetic data, flagged in every output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: ./mhd.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the raw dataset files (overrides the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the known datasets.
    Datasets,

    /// Ingest a dataset and show its records.
    Ingest(IngestArgs),

    /// Per-year mean of a field, optionally projected forward.
    TimeSeries(TimeSeriesArgs),

    /// Pearson correlation between the five disorders.
    Correlation(CorrelationArgs),

    /// Z-score anomalies of a field in one year.
    Anomalies(AnomaliesArgs),

    /// Two-feature projection of one year's records.
    Clusters(ClustersArgs),

    /// Contributing-factor table for a disorder.
    Regression(RegressionArgs),

    /// Mean treatment-gap shares for a year.
    TreatmentGap(TreatmentGapArgs),
}

/// Dataset and region selection shared by the analysis commands.
#[derive(Args)]
pub struct SourceArgs {
    /// Dataset identifier.
    #[arg(long = "dataset", default_value = "mental-illnesses-prevalence")]
    pub dataset: String,

    /// Region filter: global, americas, europe, asia, africa or oceania.
    #[arg(long = "region")]
    pub region: Option<String>,

    /// Keep only recent years (recent: 2018 on, decade: 2013 on).
    #[arg(long = "period", value_enum, default_value = "all")]
    pub period: PeriodArg,
}

#[derive(Args)]
pub struct IngestArgs {
    /// Dataset identifier (see `mhd datasets`).
    #[arg(value_name = "DATASET")]
    pub dataset: String,

    /// Maximum number of records to print in table mode.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args)]
pub struct TimeSeriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Field or disorder alias (depression, anxiety, bipolar, schizophrenia, eating).
    #[arg(long = "field", default_value = "depression")]
    pub field: String,

    /// Project the series forward with a linear trend.
    #[arg(long = "forecast")]
    pub forecast: bool,

    /// Number of projected years (overrides the settings file).
    #[arg(long = "periods")]
    pub periods: Option<usize>,

    /// Interval width in [0, 1] (overrides the settings file).
    #[arg(long = "interval-width")]
    pub interval_width: Option<f64>,
}

#[derive(Args)]
pub struct CorrelationArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Restrict to one year (number or text such as "2019").
    #[arg(long = "year")]
    pub year: Option<String>,
}

#[derive(Args)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Field or disorder alias.
    #[arg(long = "field", default_value = "depression")]
    pub field: String,

    /// Year to scan.
    #[arg(long = "year")]
    pub year: String,

    /// Detection sensitivity (overrides the settings file).
    #[arg(long = "sensitivity", value_enum)]
    pub sensitivity: Option<SensitivityArg>,
}

#[derive(Args)]
pub struct ClustersArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Two features, comma separated (default: depression,anxiety).
    #[arg(long = "features", value_delimiter = ',')]
    pub features: Vec<String>,

    /// Year to project.
    #[arg(long = "year")]
    pub year: String,
}

#[derive(Args)]
pub struct RegressionArgs {
    /// Target disorder.
    #[arg(value_name = "TARGET", default_value = "depression")]
    pub target: String,

    /// Restrict to factor categories (socioeconomic, healthcare, demographic,
    /// cultural, genetic, stress, substances); impacts are then normalised.
    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<String>,
}

#[derive(Args)]
pub struct TreatmentGapArgs {
    /// Year to summarise.
    #[arg(long = "year", default_value = "2017")]
    pub year: String,

    /// Dataset identifier.
    #[arg(long = "dataset", default_value = "anxiety-treatment-gap")]
    pub dataset: String,
}

/// CLI sensitivity choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SensitivityArg {
    Low,
    Medium,
    High,
}

impl From<SensitivityArg> for Sensitivity {
    fn from(arg: SensitivityArg) -> Self {
        match arg {
            SensitivityArg::Low => Self::Low,
            SensitivityArg::Medium => Self::Medium,
            SensitivityArg::High => Self::High,
        }
    }
}

/// CLI period choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    All,
    Recent,
    Decade,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::All => Self::All,
            PeriodArg::Recent => Self::Recent,
            PeriodArg::Decade => Self::Decade,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
