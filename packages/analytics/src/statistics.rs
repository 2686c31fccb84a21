//! Descriptive statistics at grid and region granularity.
//!
//! Grid statistics only consider occupied (nonzero) cells so that empty
//! cells do not drag the mean towards zero. Region statistics use every
//! region.

use maup_analytics_models::{DescriptiveStats, Metric, MetricGroup, StatisticsSummary};
use maup_geography_models::{Indicator, IndicatorFormat, Region};
use maup_spatial::CellMatrix;

use crate::AnalyticsError;

/// Coefficient of variation in percent: `std_dev / mean × 100`.
///
/// Returns `0` when `mean` is zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> f64 {
    if mean == 0.0 {
        0.0
    } else {
        std_dev / mean * 100.0
    }
}

/// Computes count, mean, min, max, population standard deviation and CV.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] if `values` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn describe(values: &[f64]) -> Result<DescriptiveStats, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            message: "no values to describe".to_string(),
        });
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(DescriptiveStats {
        count: values.len(),
        mean,
        min,
        max,
        std_dev,
        cv: coefficient_of_variation(mean, std_dev),
    })
}

/// Summarizes `values` (one per grid cell) and `regions` for `indicator`.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] if no cell is occupied or
/// `regions` is empty.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn summarize(
    values: &CellMatrix<f64>,
    regions: &[Region],
    indicator: Indicator,
) -> Result<StatisticsSummary, AnalyticsError> {
    let occupied: Vec<f64> = values
        .values()
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v != 0.0)
        .collect();

    if occupied.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            message: format!("no occupied cells in {0}x{0} grid", values.size()),
        });
    }
    if regions.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            message: "no regions to summarize".to_string(),
        });
    }

    let grid_stats = describe(&occupied)?;
    let region_values: Vec<f64> = regions.iter().map(|r| r.value(indicator)).collect();
    let region_stats = describe(&region_values)?;
    let total_warehouses: u64 = regions
        .iter()
        .map(|r| u64::from(r.indicators.warehouse_count))
        .sum();

    let format = indicator.format();

    let mut grid = MetricGroup::new("grid");
    grid.push(Metric::new(
        "Total Cells",
        values.len() as f64,
        IndicatorFormat::COUNT,
    ));
    grid.push(Metric::new(
        "Occupied Cells",
        occupied.len() as f64,
        IndicatorFormat::COUNT,
    ));
    push_descriptive(&mut grid, &grid_stats, format);

    let mut region = MetricGroup::new("region");
    region.push(Metric::new(
        "Regions",
        regions.len() as f64,
        IndicatorFormat::COUNT,
    ));
    push_descriptive(&mut region, &region_stats, format);
    region.push(Metric::new(
        "Total Warehouses",
        total_warehouses as f64,
        IndicatorFormat::COUNT,
    ));

    log::debug!(
        "{indicator}: {}/{} cells occupied, grid CV {:.1}%, region CV {:.1}%",
        occupied.len(),
        values.len(),
        grid_stats.cv,
        region_stats.cv
    );

    Ok(StatisticsSummary {
        indicator,
        total_cells: values.len(),
        occupied_cells: occupied.len(),
        grid_stats,
        region_stats,
        total_warehouses,
        grid,
        region,
    })
}

/// [`summarize`] with the indicator given by name.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownIndicator`] for an unrecognized name,
/// otherwise the errors of [`summarize`].
pub fn summarize_by_name(
    values: &CellMatrix<f64>,
    regions: &[Region],
    indicator: &str,
) -> Result<StatisticsSummary, AnalyticsError> {
    let indicator = Indicator::parse(indicator)?;
    summarize(values, regions, indicator)
}

fn push_descriptive(group: &mut MetricGroup, stats: &DescriptiveStats, format: IndicatorFormat) {
    group.push(Metric::new("Mean", stats.mean, format));
    group.push(Metric::new("Min", stats.min, format));
    group.push(Metric::new("Max", stats.max, format));
    group.push(Metric::new("Standard Deviation", stats.std_dev, format));
    group.push(Metric::new(
        "Coefficient of Variation",
        stats.cv,
        IndicatorFormat::PERCENT,
    ));
}
