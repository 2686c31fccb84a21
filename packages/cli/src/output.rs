//! Plain-text rendering of reports.

use std::fmt::Write as _;

use maup_analytics_models::{Correlation, CorrelationSummary, MetricGroup, ScaleRow};
use maup_geography_models::Indicator;

use crate::report::{AnalysisReport, GridReport};

/// Renders a statistics and correlation report.
#[must_use]
pub fn analysis(report: &AnalysisReport) -> String {
    let summary = &report.statistics;
    let mut out = String::new();

    writeln!(
        out,
        "{} on a {n}x{n} grid ({} warehouses, {} outside the box)",
        summary.indicator.label(),
        report.total_points,
        report.dropped_points,
        n = report.grid_size,
    )
    .unwrap();
    out.push('\n');
    metric_group(&mut out, "Grid", &summary.grid);
    out.push('\n');
    metric_group(&mut out, "Regions", &summary.region);
    out.push('\n');
    correlations(&mut out, &report.correlations);

    out
}

fn metric_group(out: &mut String, title: &str, group: &MetricGroup) {
    writeln!(out, "{title}").unwrap();
    let width = group
        .metrics
        .iter()
        .map(|m| m.label.len())
        .max()
        .unwrap_or(0);

    for metric in &group.metrics {
        writeln!(out, "  {:<width$}  {}", metric.label, metric.formatted).unwrap();
    }
}

fn correlations(out: &mut String, summary: &CorrelationSummary) {
    writeln!(out, "Correlations (n = {})", summary.sample_size).unwrap();
    let labels: Vec<String> = summary.entries.iter().map(Correlation::label).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);

    for (label, correlation) in labels.iter().zip(&summary.entries) {
        writeln!(out, "  {label:<width$}  {correlation}").unwrap();
    }
}

/// Renders the cell matrix with the northernmost row first. Each row is
/// prefixed with its southern latitude edge.
#[must_use]
pub fn grid(report: &GridReport) -> String {
    // density grids hold raw point counts
    let decimals = match report.indicator {
        Indicator::WarehouseDensity => 0,
        indicator => indicator.format().decimals,
    };
    let mut out = String::new();

    writeln!(
        out,
        "{} ({n}x{n}), lat {:.4}..{:.4}, lon {:.4}..{:.4}",
        report.indicator.label(),
        report.bbox.min_lat,
        report.bbox.max_lat,
        report.bbox.min_lon,
        report.bbox.max_lon,
        n = report.values.size(),
    )
    .unwrap();

    let rows: Vec<Vec<String>> = report
        .values
        .rows()
        .map(|row| row.iter().map(|v| format_cell(*v, decimals)).collect())
        .collect();
    let width = rows.iter().flatten().map(String::len).max().unwrap_or(1);

    for (cells, lat) in rows.iter().zip(&report.lat_edges).rev() {
        write!(out, "{lat:>9.4} |").unwrap();
        for cell in cells {
            write!(out, " {cell:>width$}").unwrap();
        }
        out.push('\n');
    }

    out
}

fn format_cell(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "n/a".to_string()
    }
}

/// Renders the multi-scale comparison table.
#[must_use]
pub fn sweep(rows: &[ScaleRow]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:>6} {:>6} {:>9} {:>10} {:>8} {:>6} {:>8}",
        "Grid", "Cells", "Occupied", "Occupancy", "Mean", "Max", "CV"
    )
    .unwrap();

    for row in rows {
        writeln!(
            out,
            "{:>6} {:>6} {:>9} {:>9.1}% {:>8.2} {:>6.0} {:>7.1}%",
            format!("{n}x{n}", n = row.grid_size),
            row.total_cells,
            row.occupied_cells,
            row.occupancy_pct,
            row.stats.mean,
            row.stats.max,
            row.stats.cv,
        )
        .unwrap();
    }

    out
}
