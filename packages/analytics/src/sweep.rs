//! Grid statistics across several grid sizes.
//!
//! Binning the same points at 5×5, 10×10 and 20×20 shows the scale effect
//! directly: finer grids leave more cells empty and raise the dispersion of
//! the occupied ones.

use maup_analytics_models::ScaleRow;
use maup_geography_models::{BoundingBox, Point};

use crate::{AnalyticsError, describe};

/// Grid sizes compared by default.
pub const DEFAULT_SIZES: &[usize] = &[5, 10, 20];

/// Bins `points` at each size in `sizes` and describes the occupied cells.
///
/// # Errors
///
/// Returns [`AnalyticsError::Spatial`] for an invalid size or bounding box
/// and [`AnalyticsError::InsufficientData`] if `sizes` is empty or no point
/// falls inside `bbox`.
#[allow(clippy::cast_precision_loss)]
pub fn scale_sweep(
    points: &[Point],
    bbox: &BoundingBox,
    sizes: &[usize],
) -> Result<Vec<ScaleRow>, AnalyticsError> {
    if sizes.is_empty() {
        return Err(AnalyticsError::InsufficientData {
            message: "no grid sizes to compare".to_string(),
        });
    }

    sizes
        .iter()
        .map(|&size| {
            let grid = maup_spatial::bin(points, bbox, size)?;
            let occupied: Vec<f64> = grid
                .counts
                .values()
                .iter()
                .filter(|&&c| c > 0)
                .map(|&c| f64::from(c))
                .collect();

            if occupied.is_empty() {
                return Err(AnalyticsError::InsufficientData {
                    message: format!("no points inside the bounding box at {size}x{size}"),
                });
            }

            let total_cells = grid.counts.len();
            let stats = describe(&occupied)?;
            log::debug!(
                "{size}x{size}: {}/{total_cells} occupied, CV {:.1}%",
                occupied.len(),
                stats.cv
            );

            Ok(ScaleRow {
                grid_size: size,
                total_cells,
                occupied_cells: occupied.len(),
                occupancy_pct: occupied.len() as f64 / total_cells as f64 * 100.0,
                stats,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maup_spatial::SpatialError;

    #[allow(clippy::cast_precision_loss)]
    fn cluster() -> Vec<Point> {
        (0..40)
            .map(|i| Point {
                id: format!("WH{i:03}"),
                latitude: 0.2 + (i % 8) as f64 * 0.01,
                longitude: 0.3 + (i / 8) as f64 * 0.02,
                region_code: "75".to_string(),
            })
            .collect()
    }

    fn unit_box() -> BoundingBox {
        BoundingBox::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn one_row_per_size() {
        let rows = scale_sweep(&cluster(), &unit_box(), DEFAULT_SIZES).unwrap();
        let sizes: Vec<usize> = rows.iter().map(|r| r.grid_size).collect();
        assert_eq!(sizes, vec![5, 10, 20]);
        assert_eq!(rows[2].total_cells, 400);
    }

    #[test]
    fn coarse_grid_concentrates_points() {
        let rows = scale_sweep(&cluster(), &unit_box(), &[1, 20]).unwrap();
        assert_eq!(rows[0].occupied_cells, 1);
        assert!((rows[0].stats.mean - 40.0).abs() < f64::EPSILON);
        assert!(rows[0].stats.cv.abs() < f64::EPSILON);
        assert!(rows[1].occupied_cells > 1);
        assert!(rows[1].occupancy_pct < rows[0].occupancy_pct);
    }

    #[test]
    fn rejects_zero_size() {
        assert!(matches!(
            scale_sweep(&cluster(), &unit_box(), &[5, 0]),
            Err(AnalyticsError::Spatial(SpatialError::InvalidGrid { .. }))
        ));
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(matches!(
            scale_sweep(&cluster(), &unit_box(), &[]),
            Err(AnalyticsError::InsufficientData { .. })
        ));
        assert!(matches!(
            scale_sweep(&[], &unit_box(), &[5]),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }
}
