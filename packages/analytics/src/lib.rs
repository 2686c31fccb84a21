#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Grid and region statistics for comparing areal aggregations.
//!
//! [`statistics`] summarizes one indicator at grid granularity (occupied
//! cells only) and at region granularity, [`correlation`] relates warehouse
//! density to the socioeconomic indicators across regions, and [`sweep`]
//! repeats the grid summary over several grid sizes to expose the scale
//! effect.

pub mod correlation;
pub mod statistics;
pub mod sweep;

use maup_geography_models::UnknownIndicatorError;
use maup_spatial::SpatialError;
use thiserror::Error;

pub use correlation::{correlate, pearson};
pub use statistics::{coefficient_of_variation, describe, summarize, summarize_by_name};
pub use sweep::scale_sweep;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Grid construction failed.
    #[error("Spatial error: {0}")]
    Spatial(#[from] SpatialError),

    /// Indicator name outside the recognized set.
    #[error(transparent)]
    UnknownIndicator(#[from] UnknownIndicatorError),

    /// Not enough values for the requested statistic.
    #[error("Insufficient data: {message}")]
    InsufficientData {
        /// Description of what was missing.
        message: String,
    },

    /// Paired series of different lengths.
    #[error("Length mismatch: {left} vs {right} values")]
    LengthMismatch {
        /// Length of the first series.
        left: usize,
        /// Length of the second series.
        right: usize,
    },
}
