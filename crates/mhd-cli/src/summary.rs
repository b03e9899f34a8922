use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

use mhd_analysis::stats::DEFAULT_FEATURES;
use mhd_analysis::{
    AnomalyReport, ClusterPoint, CorrelationPair, CorrelationSummary, ForecastReport,
    RegressionFactor, Sensitivity, TimePoint, TreatmentShares,
};
use mhd_ingest::{DataOrigin, IngestedDataset};
use mhd_model::{RawValue, RecordKind, TypedRecord};

/// Columns shown before the measures of a typed record.
const LEADING_COLUMNS: [&str; 3] = ["Entity", "Code", "Year"];

/// One catalog entry as listed by `mhd datasets`.
#[derive(Debug, Serialize)]
pub struct DatasetRow {
    pub id: &'static str,
    pub file: &'static str,
    pub kind: RecordKind,
    pub description: &'static str,
    /// Whether the raw file exists in the data directory.
    pub available: bool,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

/// Tells the user when the records shown are not real data.
pub fn report_origin(ingested: &IngestedDataset) {
    if ingested.is_synthetic() {
        eprintln!(
            "warning: no usable raw data for {}; results below are synthetic",
            ingested.dataset()
        );
    }
}

pub fn print_datasets(data_dir: &Path, rows: &[DatasetRow]) {
    println!("Data directory: {}", data_dir.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Description"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in rows {
        let file = if row.available {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell("missing")
        };
        table.add_row(vec![
            Cell::new(row.id).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(row.description),
            file,
        ]);
    }
    println!("{table}");
}

pub fn print_ingested(ingested: &IngestedDataset, limit: usize) {
    println!("Dataset: {}", ingested.dataset());
    println!(
        "Origin: {} ({} records)",
        origin_label(ingested.origin()),
        ingested.len()
    );
    let shown: Vec<Vec<(String, Value)>> = ingested
        .records()
        .iter()
        .take(limit)
        .map(record_columns)
        .collect();
    let Some(first) = shown.first() else {
        return;
    };

    let mut table = Table::new();
    table.set_header(first.iter().map(|(name, _)| header_cell(name)));
    apply_table_style(&mut table);
    for (index, (_, value)) in first.iter().enumerate() {
        if value.is_number() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for columns in &shown {
        table.add_row(columns.iter().map(|(_, value)| value_cell(value)));
    }
    println!("{table}");
    if ingested.len() > shown.len() {
        println!("... {} more records", ingested.len() - shown.len());
    }
}

pub fn print_time_series(
    field: &str,
    region: &str,
    points: &[TimePoint],
    report: Option<&ForecastReport>,
) {
    println!("Series: {field} ({region})");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Year"), header_cell("Mean")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for point in points {
        table.add_row(vec![Cell::new(point.year), Cell::new(format!("{:.3}", point.value))]);
    }
    println!("{table}");

    let Some(report) = report else {
        return;
    };
    if report.projected.is_empty() {
        println!("No projection: the series is empty.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Predicted"),
        header_cell("Lower"),
        header_cell("Upper"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for point in &report.projected {
        table.add_row(vec![
            Cell::new(point.year),
            Cell::new(format!("{:.3}", point.predicted)).add_attribute(Attribute::Bold),
            dim_cell(format!("{:.3}", point.lower)),
            dim_cell(format!("{:.3}", point.upper)),
        ]);
    }
    println!();
    println!("Projection (linear trend {:+.4} per year):", report.trend);
    println!("{table}");
    let metrics = report.metrics;
    println!(
        "Fit: RMSE {:.4}  MAE {:.4}  MAPE {:.2}%  R² {:.4}",
        metrics.rmse, metrics.mae, metrics.mape, metrics.r2
    );
}

pub fn print_correlation(records: usize, pairs: &[CorrelationPair], summary: &CorrelationSummary) {
    println!("Records: {records}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Factor A"),
        header_cell("Factor B"),
        header_cell("Coefficient"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for pair in pairs {
        table.add_row(vec![
            Cell::new(&pair.factor_a),
            Cell::new(&pair.factor_b),
            coefficient_cell(pair.coefficient),
        ]);
    }
    println!("{table}");
    println!(
        "Max {:.3}  Min {:.3}  Mean {:.3}",
        summary.max, summary.min, summary.mean
    );
}

pub fn print_anomalies(field: &str, sensitivity: Sensitivity, report: &AnomalyReport) {
    println!("Field: {field} (sensitivity {sensitivity})");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Value"),
        header_cell("Anomaly"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for point in &report.points {
        let flag = if point.is_anomaly {
            Cell::new("✓").fg(Color::Red).add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&point.id),
            Cell::new(&point.name),
            Cell::new(format!("{:.3}", point.value)),
            flag,
        ]);
    }
    println!("{table}");
    println!(
        "Mean {:.3}  Std dev {:.3}  Threshold ±{:.3}  Flagged {} ({:.1}%)",
        report.mean, report.std_dev, report.threshold, report.count, report.percentage
    );
}

pub fn print_clusters(features: &[&str], points: &[ClusterPoint]) {
    let (x_label, y_label) = match features {
        [x, y, ..] => (*x, *y),
        _ => (DEFAULT_FEATURES[0], DEFAULT_FEATURES[1]),
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell(x_label),
        header_cell(y_label),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for point in points {
        table.add_row(vec![
            Cell::new(&point.id),
            Cell::new(&point.name),
            Cell::new(format!("{:.3}", point.x)),
            Cell::new(format!("{:.3}", point.y)),
        ]);
    }
    println!("{table}");
}

pub fn print_regression(target: &str, factors: &[RegressionFactor]) {
    println!("Contributing factors: {target}");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Factor"), header_cell("Impact")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for factor in factors {
        table.add_row(vec![
            Cell::new(&factor.factor),
            Cell::new(format!("{:.3}", factor.impact)),
        ]);
    }
    println!("{table}");
}

pub fn print_treatment_gap(year: &str, shares: &TreatmentShares) {
    println!("Treatment gap: {year}");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Share"), header_cell("Percent")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Adequate treatment").fg(Color::Green),
        Cell::new(format!("{:.1}", shares.adequate_treatment)),
    ]);
    table.add_row(vec![
        Cell::new("Other treatments").fg(Color::Yellow),
        Cell::new(format!("{:.1}", shares.other_treatments)),
    ]);
    table.add_row(vec![
        Cell::new("Untreated").fg(Color::Red),
        Cell::new(format!("{:.1}", shares.untreated)),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn origin_label(origin: DataOrigin) -> String {
    if origin.is_genuine() {
        origin.to_string()
    } else {
        format!("{origin} (placeholder data)")
    }
}

/// Flattens a record into display columns, identity columns first.
fn record_columns(record: &TypedRecord) -> Vec<(String, Value)> {
    if let TypedRecord::Raw(raw) = record {
        return raw
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    RawValue::Number(number) => Value::from(*number),
                    RawValue::Text(text) => Value::from(text.as_str()),
                    RawValue::Null => Value::Null,
                };
                (key.to_string(), value)
            })
            .collect();
    }
    let Ok(Value::Object(mut map)) = serde_json::to_value(record) else {
        return Vec::new();
    };
    let mut columns: Vec<(String, Value)> = LEADING_COLUMNS
        .iter()
        .filter_map(|name| map.remove(*name).map(|value| ((*name).to_string(), value)))
        .collect();
    columns.extend(map);
    columns
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Null => dim_cell("-"),
        Value::String(text) => Cell::new(text),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => Cell::new(format!("{float:.3}")),
            _ => Cell::new(number),
        },
        other => Cell::new(other),
    }
}

fn coefficient_cell(coefficient: f64) -> Cell {
    let cell = Cell::new(format!("{coefficient:+.3}"));
    if coefficient >= 0.5 {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else if coefficient <= -0.5 {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
