//! Point-count binning on a uniform latitude/longitude grid.
//!
//! Cell `(i, j)` covers `[lat_edges[i], lat_edges[i + 1])` ×
//! `[lon_edges[j], lon_edges[j + 1])`. The last row and column are closed
//! on their upper edge, so a point sitting exactly on `max_lat` or
//! `max_lon` lands in the outermost cell instead of being dropped.

use maup_geography_models::{BoundingBox, Point};
use serde::Serialize;

use crate::{CellMatrix, SpatialError};

/// Point counts over an N×N grid together with its edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Box the grid was laid over.
    pub bbox: BoundingBox,
    /// N + 1 latitude edges, ascending.
    pub lat_edges: Vec<f64>,
    /// N + 1 longitude edges, ascending.
    pub lon_edges: Vec<f64>,
    /// Points per cell.
    pub counts: CellMatrix<u32>,
    /// Points that fell outside the box or had non-finite coordinates.
    pub dropped: usize,
}

impl Grid {
    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.counts.size()
    }

    /// Number of cells holding at least one point.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.counts.values().iter().filter(|&&c| c > 0).count()
    }

    /// Bounds of cell `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn cell_bounds(&self, row: usize, col: usize) -> Option<BoundingBox> {
        Some(BoundingBox::new(
            *self.lat_edges.get(row)?,
            *self.lat_edges.get(row + 1)?,
            *self.lon_edges.get(col)?,
            *self.lon_edges.get(col + 1)?,
        ))
    }
}

/// Checks that a grid of `grid_size` cells per side can be laid over `bbox`.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGrid`] if `grid_size` is zero or the box
/// is degenerate (`min >= max` on an axis, or a non-finite edge).
pub fn validate(bbox: &BoundingBox, grid_size: usize) -> Result<(), SpatialError> {
    if grid_size < 1 {
        return Err(SpatialError::InvalidGrid {
            message: "grid size must be at least 1".to_string(),
        });
    }

    if !bbox.is_valid() {
        return Err(SpatialError::InvalidGrid {
            message: format!(
                "degenerate bounding box: lat [{}, {}], lon [{}, {}]",
                bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
            ),
        });
    }

    Ok(())
}

/// Returns `intervals + 1` evenly spaced values from `min` to `max`.
///
/// `edge[k] = min + k * (max - min) / intervals`, with the last edge pinned
/// to exactly `max`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(min: f64, max: f64, intervals: usize) -> Vec<f64> {
    if intervals == 0 {
        return vec![min];
    }

    let step = (max - min) / intervals as f64;
    let mut edges: Vec<f64> = (0..intervals).map(|k| min + k as f64 * step).collect();
    edges.push(max);
    edges
}

/// Locates the interval of `edges` containing `value`.
///
/// Computes a direct index guess from the uniform step, then nudges it so
/// the result agrees exactly with the edge comparisons.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn interval_index(value: f64, edges: &[f64]) -> Option<usize> {
    let intervals = edges.len().checked_sub(1)?;
    let (&first, &last) = (edges.first()?, edges.last()?);

    if intervals == 0 || !(first..=last).contains(&value) {
        return None;
    }

    let step = (last - first) / intervals as f64;
    let mut idx = (((value - first) / step).floor() as usize).min(intervals - 1);

    while idx > 0 && value < edges[idx] {
        idx -= 1;
    }
    while idx < intervals - 1 && value >= edges[idx + 1] {
        idx += 1;
    }

    Some(idx)
}

/// Counts `points` per cell of a `grid_size`×`grid_size` grid over `bbox`.
///
/// Points outside the box, or with non-finite coordinates, are not counted
/// and are reported in [`Grid::dropped`]. The sum of all counts therefore
/// equals the number of in-box points.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGrid`] if `grid_size` is zero or `bbox`
/// is degenerate.
pub fn bin(points: &[Point], bbox: &BoundingBox, grid_size: usize) -> Result<Grid, SpatialError> {
    validate(bbox, grid_size)?;

    let lat_edges = linspace(bbox.min_lat, bbox.max_lat, grid_size);
    let lon_edges = linspace(bbox.min_lon, bbox.max_lon, grid_size);
    let mut counts = CellMatrix::<u32>::new(grid_size);
    let mut dropped = 0;

    for point in points {
        let cell = if point.is_finite() {
            interval_index(point.latitude, &lat_edges)
                .zip(interval_index(point.longitude, &lon_edges))
        } else {
            None
        };

        match cell.and_then(|(row, col)| counts.get_mut(row, col)) {
            Some(count) => *count += 1,
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!(
            "{dropped} of {} points fell outside the {grid_size}x{grid_size} grid",
            points.len()
        );
    }

    Ok(Grid {
        bbox: *bbox,
        lat_edges,
        lon_edges,
        counts,
        dropped,
    })
}
