#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for grid/region statistics and correlation analysis.
//!
//! Raw values are kept alongside their rendered strings so a presentation
//! layer can either show the formatted metric directly or re-derive its
//! own display from the number.

use std::collections::BTreeMap;

use maup_geography_models::{Indicator, IndicatorFormat};
use serde::Serialize;

/// Marker for a statistic whose denominator is zero (e.g. the correlation
/// of a constant variable). Renders as `n/a`.
pub const UNDEFINED: f64 = f64::NAN;

/// A single labelled metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Human-readable label (e.g. "Occupied Cells").
    pub label: String,
    /// Raw value.
    pub value: f64,
    /// Value rendered with the metric's static format.
    pub formatted: String,
}

impl Metric {
    /// Creates a metric, rendering `value` with `format`.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, format: IndicatorFormat) -> Self {
        Self {
            label: label.into(),
            value,
            formatted: format.format(value),
        }
    }
}

/// An ordered, named group of metrics (e.g. "grid" or "region").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricGroup {
    /// Group name.
    pub name: String,
    /// Metrics in display order.
    pub metrics: Vec<Metric>,
}

impl MetricGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
        }
    }

    /// Appends a metric.
    pub fn push(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Looks up a metric by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.label == label)
    }

    /// Label → formatted value.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.metrics
            .iter()
            .map(|m| (m.label.clone(), m.formatted.clone()))
            .collect()
    }
}

/// Descriptive statistics over a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Coefficient of variation in percent (`0` when the mean is `0`).
    pub cv: f64,
}

/// Grid-level and region-level statistics for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Indicator the statistics describe.
    pub indicator: Indicator,
    /// Cells in the grid (N²).
    pub total_cells: usize,
    /// Cells with a nonzero value.
    pub occupied_cells: usize,
    /// Statistics over occupied cells.
    pub grid_stats: DescriptiveStats,
    /// Statistics over all regions.
    pub region_stats: DescriptiveStats,
    /// Sum of `warehouse_count` over all regions.
    pub total_warehouses: u64,
    /// Rendered grid metrics.
    pub grid: MetricGroup,
    /// Rendered region metrics.
    pub region: MetricGroup,
}

/// Pearson correlation between warehouse density and one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    /// Indicator paired with warehouse density.
    pub indicator: Indicator,
    /// Coefficient in `[-1, 1]`, or [`UNDEFINED`].
    pub coefficient: f64,
}

impl Correlation {
    /// Pair label, e.g. "Warehouse Density vs Median Income".
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} vs {}",
            Indicator::WarehouseDensity.label(),
            self.indicator.label()
        )
    }

    /// Returns `false` when the coefficient is the [`UNDEFINED`] marker.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        !self.coefficient.is_nan()
    }
}

impl std::fmt::Display for Correlation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            write!(f, "{:+.3}", self.coefficient)
        } else {
            write!(f, "n/a")
        }
    }
}

/// Correlations between warehouse density and each socioeconomic indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSummary {
    /// Number of regions the coefficients were computed over.
    pub sample_size: usize,
    /// One entry per paired indicator.
    pub entries: Vec<Correlation>,
}

impl CorrelationSummary {
    /// Looks up the correlation for `indicator`.
    #[must_use]
    pub fn get(&self, indicator: Indicator) -> Option<&Correlation> {
        self.entries.iter().find(|c| c.indicator == indicator)
    }

    /// Pair label → signed, 3-decimal coefficient.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|c| (c.label(), c.to_string()))
            .collect()
    }
}

/// Grid statistics of point counts at one grid size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleRow {
    /// Cells per side.
    pub grid_size: usize,
    /// Cells in the grid (N²).
    pub total_cells: usize,
    /// Cells holding at least one point.
    pub occupied_cells: usize,
    /// Occupied share of all cells, in percent.
    pub occupancy_pct: f64,
    /// Count statistics over occupied cells.
    pub stats: DescriptiveStats,
}
