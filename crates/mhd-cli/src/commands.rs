use std::sync::Arc;

use anyhow::{Result, bail};
use mhd_analysis::{
    CorrelationSummary, Period, YearSelector, cluster_points, correlation_matrix,
    detect_anomalies, filter_by_period, filter_by_region, filter_by_year, forecast,
    regression_factors, regression_factors_for, time_series, treatment_gap_summary,
};
use mhd_cli::config::Settings;
use mhd_ingest::{DatasetCache, DirectorySource, IngestPipeline, IngestedDataset};
use mhd_model::{DatasetId, KnownDataset, Region, TypedRecord, numeric};
use serde_json::json;
use tracing::{debug, info_span};

use crate::cli::{
    AnomaliesArgs, ClustersArgs, CorrelationArgs, IngestArgs, RegressionArgs, SourceArgs,
    TimeSeriesArgs, TreatmentGapArgs,
};
use crate::summary::{
    DatasetRow, print_anomalies, print_clusters, print_correlation, print_datasets,
    print_ingested, print_json, print_regression, print_time_series, print_treatment_gap,
    report_origin,
};

/// Resolved settings plus the pipeline every command ingests through.
pub struct AppContext {
    pub settings: Settings,
    pub json: bool,
    pipeline: IngestPipeline<DirectorySource>,
}

impl AppContext {
    pub fn new(settings: Settings, json: bool) -> Self {
        let source = DirectorySource::new(settings.data_dir.clone());
        Self {
            pipeline: IngestPipeline::new(source, Arc::new(DatasetCache::new())),
            settings,
            json,
        }
    }

    fn ingest(&self, dataset: &str) -> Arc<IngestedDataset> {
        let ingested = self.pipeline.ingest(DatasetId::new(dataset));
        report_origin(&ingested);
        ingested
    }

    /// Applies the period and then the region filter.
    fn select<'a>(
        &self,
        ingested: &'a IngestedDataset,
        source: &SourceArgs,
    ) -> Result<Vec<&'a TypedRecord>> {
        let region = self.region(source)?;
        let in_period = filter_by_period(ingested.records(), Period::from(source.period));
        Ok(filter_by_region(&in_period, &region)
            .into_iter()
            .copied()
            .collect())
    }

    fn region(&self, source: &SourceArgs) -> Result<String> {
        let region = source
            .region
            .clone()
            .unwrap_or_else(|| self.settings.region.clone());
        region.parse::<Region>()?;
        Ok(region)
    }
}

pub fn run_datasets(ctx: &AppContext) -> Result<()> {
    let rows: Vec<DatasetRow> = KnownDataset::ALL
        .into_iter()
        .map(|known| DatasetRow {
            id: known.id(),
            file: known.file_name(),
            kind: known.record_kind(),
            description: known.description(),
            available: ctx
                .settings
                .data_dir
                .join(known.file_name())
                .is_file(),
        })
        .collect();
    if ctx.json {
        print_json(&rows)
    } else {
        print_datasets(&ctx.settings.data_dir, &rows);
        Ok(())
    }
}

pub fn run_ingest(ctx: &AppContext, args: &IngestArgs) -> Result<()> {
    let ingested = ctx.ingest(&args.dataset);
    if ctx.json {
        print_json(&*ingested)
    } else {
        print_ingested(&ingested, args.limit);
        Ok(())
    }
}

pub fn run_time_series(ctx: &AppContext, args: &TimeSeriesArgs) -> Result<()> {
    let region = ctx.region(&args.source)?;
    let span = info_span!("time_series", field = %args.field, region = %region);
    let _guard = span.enter();

    let ingested = ctx.ingest(&args.source.dataset);
    let in_period = filter_by_period(ingested.records(), Period::from(args.source.period));
    let points = time_series(&in_period, &args.field, &region);
    debug!(points = points.len(), "aggregated series");

    let report = if args.forecast {
        let mut options = ctx.settings.forecast_options();
        if let Some(periods) = args.periods {
            options.periods = periods;
        }
        if let Some(width) = args.interval_width {
            if !(0.0..=1.0).contains(&width) {
                bail!("--interval-width must be between 0 and 1, got {width}");
            }
            options.interval_width = width;
        }
        Some(forecast(&points, options))
    } else {
        None
    };

    if ctx.json {
        print_json(&json!({
            "dataset": ingested.dataset(),
            "origin": ingested.origin(),
            "field": args.field,
            "region": region,
            "points": points,
            "forecast": report,
        }))
    } else {
        print_time_series(&args.field, &region, &points, report.as_ref());
        Ok(())
    }
}

pub fn run_correlation(ctx: &AppContext, args: &CorrelationArgs) -> Result<()> {
    let ingested = ctx.ingest(&args.source.dataset);
    let regional = ctx.select(&ingested, &args.source)?;
    let selected: Vec<&TypedRecord> = match &args.year {
        Some(year) => filter_by_year(&regional, year.as_str())
            .into_iter()
            .copied()
            .collect(),
        None => regional,
    };

    let pairs = correlation_matrix(&selected);
    let summary = CorrelationSummary::from_pairs(&pairs);
    if ctx.json {
        print_json(&json!({
            "dataset": ingested.dataset(),
            "origin": ingested.origin(),
            "records": selected.len(),
            "pairs": pairs,
            "summary": summary,
        }))
    } else {
        print_correlation(selected.len(), &pairs, &summary);
        Ok(())
    }
}

pub fn run_anomalies(ctx: &AppContext, args: &AnomaliesArgs) -> Result<()> {
    let year = parse_year(&args.year)?;
    let sensitivity = args
        .sensitivity
        .map_or(ctx.settings.sensitivity, Into::into);

    let ingested = ctx.ingest(&args.source.dataset);
    let regional = ctx.select(&ingested, &args.source)?;
    let report = detect_anomalies(&regional, &args.field, year, sensitivity);

    if ctx.json {
        print_json(&json!({
            "dataset": ingested.dataset(),
            "origin": ingested.origin(),
            "field": args.field,
            "sensitivity": sensitivity,
            "report": report,
        }))
    } else {
        print_anomalies(&args.field, sensitivity, &report);
        Ok(())
    }
}

pub fn run_clusters(ctx: &AppContext, args: &ClustersArgs) -> Result<()> {
    let year = parse_year(&args.year)?;
    let features: Vec<&str> = args.features.iter().map(|f| f.trim()).collect();

    let ingested = ctx.ingest(&args.source.dataset);
    let regional = ctx.select(&ingested, &args.source)?;
    let points = cluster_points(&regional, &features, year);

    if ctx.json {
        print_json(&json!({
            "dataset": ingested.dataset(),
            "origin": ingested.origin(),
            "points": points,
        }))
    } else {
        print_clusters(&features, &points);
        Ok(())
    }
}

pub fn run_regression(ctx: &AppContext, args: &RegressionArgs) -> Result<()> {
    let factors = if args.categories.is_empty() {
        regression_factors(&args.target)
    } else {
        let categories: Vec<&str> = args.categories.iter().map(String::as_str).collect();
        regression_factors_for(&args.target, &categories)
    };
    if ctx.json {
        print_json(&factors)
    } else {
        print_regression(&args.target, &factors);
        Ok(())
    }
}

pub fn run_treatment_gap(ctx: &AppContext, args: &TreatmentGapArgs) -> Result<()> {
    let year = parse_year(&args.year)?;
    let ingested = ctx.ingest(&args.dataset);
    let shares = treatment_gap_summary(ingested.records(), year);
    if ctx.json {
        print_json(&json!({
            "dataset": ingested.dataset(),
            "origin": ingested.origin(),
            "year": year.year(),
            "shares": shares,
        }))
    } else {
        print_treatment_gap(&args.year, &shares);
        Ok(())
    }
}

/// Reads a year argument, rejecting text that does not start with a
/// 4-digit year.
fn parse_year(text: &str) -> Result<YearSelector> {
    Ok(YearSelector::from(numeric::parse_year(text)?))
}
