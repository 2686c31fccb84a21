//! Synthetic per-cell indicator surfaces.
//!
//! Each socioeconomic indicator gets an N×N field drawn from its normal
//! distribution with a seeded `ChaCha8Rng`, then blurred with a separable
//! Gaussian so neighbouring cells are correlated. The field is not derived
//! from points or regions: grid-level values of these indicators cannot be
//! compared one-to-one with region-level values.

use maup_geography_models::{Indicator, NormalParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::{CellMatrix, Grid, SpatialError};

/// Default seed for synthetic surfaces.
pub const DEFAULT_SEED: u64 = 42;

/// Default Gaussian kernel width, in cells.
pub const DEFAULT_SIGMA: f64 = 1.0;

/// Controls synthetic surface generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOptions {
    /// RNG seed. Each indicator draws from its own stream of this seed.
    pub seed: u64,
    /// Gaussian kernel width in cells. `0.0` disables smoothing.
    pub sigma: f64,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// Generates the smoothed synthetic surface for `indicator`.
///
/// Returns `Ok(None)` for indicators without a synthetic distribution
/// (warehouse density, whose grid values are point counts). Identical
/// `(indicator, grid_size, options)` always produce identical matrices.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidGrid`] if `grid_size` is zero,
/// [`SpatialError::InvalidSigma`] for a negative or non-finite sigma, and
/// [`SpatialError::Distribution`] if the sampler rejects the parameters.
pub fn synthetic_surface(
    indicator: Indicator,
    grid_size: usize,
    options: &SurfaceOptions,
) -> Result<Option<CellMatrix<f64>>, SpatialError> {
    let Some(params) = indicator.surface_distribution() else {
        return Ok(None);
    };

    if grid_size < 1 {
        return Err(SpatialError::InvalidGrid {
            message: "grid size must be at least 1".to_string(),
        });
    }

    if !options.sigma.is_finite() || options.sigma < 0.0 {
        return Err(SpatialError::InvalidSigma {
            sigma: options.sigma,
        });
    }

    let base = sample_normal(params, grid_size, options.seed, indicator.stream())?;
    let surface = if options.sigma > 0.0 {
        gaussian_smooth(&base, options.sigma)
    } else {
        base
    };

    log::debug!(
        "Generated {grid_size}x{grid_size} {indicator} surface (seed {}, sigma {})",
        options.seed,
        options.sigma
    );

    Ok(Some(surface))
}

/// Per-cell values of `indicator` on `grid`.
///
/// Warehouse density uses the grid's point counts; every other indicator
/// uses its synthetic surface.
///
/// # Errors
///
/// Propagates errors from [`synthetic_surface`].
pub fn indicator_values(
    grid: &Grid,
    indicator: Indicator,
    options: &SurfaceOptions,
) -> Result<CellMatrix<f64>, SpatialError> {
    Ok(synthetic_surface(indicator, grid.size(), options)?
        .unwrap_or_else(|| grid.counts.to_f64()))
}

fn sample_normal(
    params: NormalParams,
    grid_size: usize,
    seed: u64,
    stream: u64,
) -> Result<CellMatrix<f64>, SpatialError> {
    let normal = Normal::new(params.mean, params.std_dev).map_err(|e| {
        SpatialError::Distribution {
            message: format!(
                "N({}, {}) rejected: {e}",
                params.mean, params.std_dev
            ),
        }
    })?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);

    let mut matrix = CellMatrix::new(grid_size);
    for row in 0..grid_size {
        for col in 0..grid_size {
            if let Some(cell) = matrix.get_mut(row, col) {
                *cell = normal.sample(&mut rng);
            }
        }
    }

    Ok(matrix)
}

/// 1D Gaussian kernel truncated at 3σ, normalized to sum to 1.
///
/// The half-width is capped at `size - 1`: taps beyond that never land
/// inside an N×N matrix.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn gaussian_kernel(sigma: f64, size: usize) -> Vec<f64> {
    let half = ((3.0 * sigma).ceil() as usize).min(size.saturating_sub(1));
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..=2 * half)
        .map(|i| {
            if i == half {
                return 1.0;
            }
            let x = i as f64 - half as f64;
            (-x * x / denom).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }

    kernel
}

/// Separable Gaussian blur. Kernel taps falling outside the matrix are
/// skipped and the remaining weights renormalized.
fn gaussian_smooth(matrix: &CellMatrix<f64>, sigma: f64) -> CellMatrix<f64> {
    let kernel = gaussian_kernel(sigma, matrix.size());
    let rows_pass = convolve(matrix, &kernel, Axis::Row);
    convolve(&rows_pass, &kernel, Axis::Col)
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Col,
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn convolve(matrix: &CellMatrix<f64>, kernel: &[f64], axis: Axis) -> CellMatrix<f64> {
    let size = matrix.size();
    let half = (kernel.len() / 2) as isize;
    let mut out = CellMatrix::new(size);

    for row in 0..size {
        for col in 0..size {
            let mut sum = 0.0;
            let mut wsum = 0.0;

            for (ki, &w) in kernel.iter().enumerate() {
                let offset = ki as isize - half;
                let (r, c) = match axis {
                    Axis::Row => (row as isize, col as isize + offset),
                    Axis::Col => (row as isize + offset, col as isize),
                };
                if r < 0 || c < 0 {
                    continue;
                }
                if let Some(v) = matrix.get(r as usize, c as usize) {
                    sum += w * v;
                    wsum += w;
                }
            }

            if let Some(cell) = out.get_mut(row, col) {
                *cell = if wsum > 0.0 { sum / wsum } else { 0.0 };
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maup_geography_models::{BoundingBox, Point};

    #[test]
    fn same_seed_is_bit_identical() {
        let options = SurfaceOptions::default();
        for indicator in Indicator::socioeconomic() {
            let a = synthetic_surface(*indicator, 12, &options).unwrap().unwrap();
            let b = synthetic_surface(*indicator, 12, &options).unwrap().unwrap();
            let a_bits: Vec<u64> = a.values().iter().map(|v| v.to_bits()).collect();
            let b_bits: Vec<u64> = b.values().iter().map(|v| v.to_bits()).collect();
            assert_eq!(a_bits, b_bits);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = synthetic_surface(Indicator::EmploymentRate, 6, &SurfaceOptions::default())
            .unwrap()
            .unwrap();
        let b = synthetic_surface(
            Indicator::EmploymentRate,
            6,
            &SurfaceOptions {
                seed: 7,
                ..SurfaceOptions::default()
            },
        )
        .unwrap()
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn indicators_use_independent_streams() {
        let options = SurfaceOptions {
            sigma: 0.0,
            ..SurfaceOptions::default()
        };
        let employment = synthetic_surface(Indicator::EmploymentRate, 5, &options)
            .unwrap()
            .unwrap();
        let access = synthetic_surface(Indicator::LogisticsAccessibility, 5, &options)
            .unwrap()
            .unwrap();
        // Same stream would give access = 70 + 1.5 * (employment - 75).
        let related = employment
            .values()
            .iter()
            .zip(access.values())
            .all(|(e, a)| (70.0 + 1.5 * (e - 75.0) - a).abs() < 1e-9);
        assert!(!related);
    }

    #[test]
    fn density_has_no_synthetic_surface() {
        let surface =
            synthetic_surface(Indicator::WarehouseDensity, 4, &SurfaceOptions::default()).unwrap();
        assert!(surface.is_none());
    }

    #[test]
    fn rejects_negative_sigma() {
        let options = SurfaceOptions {
            sigma: -1.0,
            ..SurfaceOptions::default()
        };
        assert!(matches!(
            synthetic_surface(Indicator::MedianIncome, 4, &options),
            Err(SpatialError::InvalidSigma { .. })
        ));
    }

    #[test]
    fn rejects_zero_grid_size() {
        assert!(matches!(
            synthetic_surface(Indicator::MedianIncome, 0, &SurfaceOptions::default()),
            Err(SpatialError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn kernel_is_symmetric_and_normalized() {
        let k = gaussian_kernel(1.0, 10);
        assert_eq!(k.len(), 7);
        for i in 0..k.len() / 2 {
            assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-12);
        }
        let sum: f64 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(k[3] > k[2]);
    }

    #[test]
    fn kernel_width_is_capped_by_grid_size() {
        assert_eq!(gaussian_kernel(1.0, 2).len(), 3);
        assert_eq!(gaussian_kernel(f64::MAX, 4).len(), 7);
        assert_eq!(gaussian_kernel(1e9, 1), vec![1.0]);
    }

    #[test]
    fn tiny_sigma_keeps_center_weight() {
        let k = gaussian_kernel(1e-300, 5);
        assert_eq!(k, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn huge_sigma_flattens_surface() {
        let options = SurfaceOptions {
            seed: 42,
            sigma: 1e20,
        };
        let surface = synthetic_surface(Indicator::EmploymentRate, 4, &options)
            .unwrap()
            .unwrap();
        let first = surface.values()[0];
        assert!(surface.values().iter().all(|v| (v - first).abs() < 1e-9));
    }

    #[test]
    fn smoothing_preserves_constant_field() {
        let flat = CellMatrix::from_rows(vec![vec![5.0; 4]; 4]).unwrap();
        let smoothed = gaussian_smooth(&flat, 1.0);
        assert!(smoothed.values().iter().all(|v| (v - 5.0).abs() < 1e-12));
    }

    #[test]
    fn smoothing_reduces_variance() {
        let options = SurfaceOptions {
            sigma: 0.0,
            ..SurfaceOptions::default()
        };
        let raw = synthetic_surface(Indicator::LogisticsAccessibility, 15, &options)
            .unwrap()
            .unwrap();
        let smoothed = gaussian_smooth(&raw, 1.0);
        assert!(variance(smoothed.values()) < variance(raw.values()));
    }

    #[test]
    fn density_values_are_point_counts() {
        let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        let points = vec![Point {
            id: "WH000".to_string(),
            latitude: 0.1,
            longitude: 0.1,
            region_code: "75".to_string(),
        }];
        let grid = crate::bin(&points, &bbox, 2).unwrap();
        let values =
            indicator_values(&grid, Indicator::WarehouseDensity, &SurfaceOptions::default())
                .unwrap();
        assert_eq!(values.values(), &[1.0, 0.0, 0.0, 0.0]);
    }

    #[allow(clippy::cast_precision_loss)]
    fn variance(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
    }
}
