//! Runs the analyses behind each subcommand.

use maup_analytics::{AnalyticsError, correlate, scale_sweep, summarize};
use maup_analytics_models::{CorrelationSummary, ScaleRow, StatisticsSummary};
use maup_generate::Dataset;
use maup_geography_models::{BoundingBox, Indicator};
use maup_spatial::{CellMatrix, indicator_values};
use serde::Serialize;

use crate::config::AnalysisConfig;

/// Grid and region statistics plus correlations for one indicator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Cells per grid side.
    pub grid_size: usize,
    /// Generated warehouses.
    pub total_points: usize,
    /// Warehouses outside the bounding box.
    pub dropped_points: usize,
    /// Grid and region statistics.
    pub statistics: StatisticsSummary,
    /// Density vs socioeconomic correlations across regions.
    pub correlations: CorrelationSummary,
}

/// Per-cell values of one indicator and the grid edges.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReport {
    /// Indicator the values belong to.
    pub indicator: Indicator,
    /// Box the grid covers.
    pub bbox: BoundingBox,
    /// N + 1 latitude edges.
    pub lat_edges: Vec<f64>,
    /// N + 1 longitude edges.
    pub lon_edges: Vec<f64>,
    /// Per-cell values (point counts for warehouse density).
    pub values: CellMatrix<f64>,
}

/// Builds the full statistics and correlation report.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if binning, statistics or correlation fail.
pub fn analyze(
    config: &AnalysisConfig,
    dataset: &Dataset,
) -> Result<AnalysisReport, AnalyticsError> {
    let grid = maup_spatial::bin(&dataset.points, &config.bbox, config.grid_size)?;
    let values = indicator_values(&grid, config.indicator, &config.surface_options())?;
    let statistics = summarize(&values, &dataset.regions, config.indicator)?;
    let correlations = correlate(&dataset.regions)?;

    Ok(AnalysisReport {
        grid_size: config.grid_size,
        total_points: dataset.points.len(),
        dropped_points: grid.dropped,
        statistics,
        correlations,
    })
}

/// Builds the per-cell grid report.
///
/// # Errors
///
/// Returns [`AnalyticsError::Spatial`] for an invalid grid or surface.
pub fn grid(config: &AnalysisConfig, dataset: &Dataset) -> Result<GridReport, AnalyticsError> {
    let grid = maup_spatial::bin(&dataset.points, &config.bbox, config.grid_size)?;
    let values = indicator_values(&grid, config.indicator, &config.surface_options())?;

    Ok(GridReport {
        indicator: config.indicator,
        bbox: grid.bbox,
        lat_edges: grid.lat_edges,
        lon_edges: grid.lon_edges,
        values,
    })
}

/// Compares point-count statistics across the configured sweep sizes.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if any size is invalid or no point is in
/// the box.
pub fn sweep(config: &AnalysisConfig, dataset: &Dataset) -> Result<Vec<ScaleRow>, AnalyticsError> {
    scale_sweep(&dataset.points, &config.bbox, &config.sweep_sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(config: &AnalysisConfig) -> Dataset {
        Dataset::generate(&config.generate_options()).unwrap()
    }

    #[test]
    fn analyze_reports_every_warehouse() {
        let config = AnalysisConfig::default();
        let report = analyze(&config, &dataset(&config)).unwrap();
        let binned = report.total_points - report.dropped_points;

        assert_eq!(report.statistics.total_cells, 100);
        assert_eq!(report.statistics.total_warehouses, report.total_points as u64);
        assert_eq!(report.correlations.sample_size, 8);
        assert!(report.statistics.occupied_cells <= binned);
    }

    #[test]
    fn analyze_is_idempotent() {
        let config = AnalysisConfig {
            indicator: Indicator::LogisticsAccessibility,
            ..AnalysisConfig::default()
        };
        let data = dataset(&config);
        let a = analyze(&config, &data).unwrap();
        let b = analyze(&config, &data).unwrap();
        assert_eq!(a.statistics, b.statistics);
    }

    #[test]
    fn surface_indicators_fill_every_cell() {
        let config = AnalysisConfig {
            grid_size: 6,
            indicator: Indicator::EmploymentRate,
            ..AnalysisConfig::default()
        };
        let report = grid(&config, &dataset(&config)).unwrap();
        assert_eq!(report.values.size(), 6);
        assert_eq!(report.lat_edges.len(), 7);
        assert!(report.values.values().iter().all(|v| *v > 0.0));
    }

    #[test]
    fn invalid_grid_size_is_reported() {
        let config = AnalysisConfig {
            grid_size: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze(&config, &dataset(&config)),
            Err(AnalyticsError::Spatial(_))
        ));
    }

    #[test]
    fn sweep_follows_configured_sizes() {
        let config = AnalysisConfig {
            sweep_sizes: vec![1, 4],
            ..AnalysisConfig::default()
        };
        let rows = sweep(&config, &dataset(&config)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].occupied_cells, 1);
    }
}
