//! Mental-health dataset explorer CLI.

use clap::{ColorChoice, Parser};
use mhd_cli::config::Settings;
use mhd_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    AppContext, run_anomalies, run_clusters, run_correlation, run_datasets, run_ingest,
    run_regression, run_time_series, run_treatment_gap,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = &cli.data_dir {
        settings.data_dir.clone_from(data_dir);
    }
    let ctx = AppContext::new(settings, cli.json);
    match &cli.command {
        Command::Datasets => run_datasets(&ctx),
        Command::Ingest(args) => run_ingest(&ctx, args),
        Command::TimeSeries(args) => run_time_series(&ctx, args),
        Command::Correlation(args) => run_correlation(&ctx, args),
        Command::Anomalies(args) => run_anomalies(&ctx, args),
        Command::Clusters(args) => run_clusters(&ctx, args),
        Command::Regression(args) => run_regression(&ctx, args),
        Command::TreatmentGap(args) => run_treatment_gap(&ctx, args),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_explicit_level_disables_env_filter() {
        let cli = Cli::parse_from(["mhd", "--log-level", "debug", "datasets"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_default_level_is_warn() {
        let cli = Cli::parse_from(["mhd", "regression", "bipolar"]);
        let config = log_config_from_cli(&cli);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
    }

    #[test]
    fn test_features_are_comma_separated() {
        let cli = Cli::parse_from([
            "mhd",
            "clusters",
            "--year",
            "2019",
            "--features",
            "bipolar,eating",
            "--region",
            "asia",
        ]);
        let Command::Clusters(args) = cli.command else {
            panic!("expected clusters");
        };
        assert_eq!(args.features, vec!["bipolar", "eating"]);
        assert_eq!(args.source.region.as_deref(), Some("asia"));
    }
}
