#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Regular grid binning over a fixed bounding box.
//!
//! Partitions a latitude/longitude box into an N×N grid of equal angular
//! size, counts points per cell, and produces seeded, Gaussian-smoothed
//! synthetic indicator surfaces on the same grid. Everything here is a
//! pure function of its inputs.

pub mod grid;
pub mod matrix;
pub mod surface;

use thiserror::Error;

pub use grid::{Grid, bin, linspace};
pub use matrix::CellMatrix;
pub use surface::{SurfaceOptions, indicator_values, synthetic_surface};

/// Errors that can occur while building grids or surfaces.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Grid size below 1 or a degenerate bounding box.
    #[error("Invalid grid: {message}")]
    InvalidGrid {
        /// Description of what went wrong.
        message: String,
    },

    /// Rows of a matrix do not form an N×N square.
    #[error("Matrix is not square: {rows} rows, row {row} has {len} cells")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },

    /// Smoothing kernel width is negative or not finite.
    #[error("Invalid smoothing sigma: {sigma}")]
    InvalidSigma {
        /// The rejected sigma.
        sigma: f64,
    },

    /// Distribution parameters were rejected by the sampler.
    #[error("Distribution error: {message}")]
    Distribution {
        /// Description of what went wrong.
        message: String,
    },
}
