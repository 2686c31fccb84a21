#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Seeded mock dataset for MAUP comparisons.
//!
//! Generates warehouse locations clustered around each département's
//! logistics hub and per-département socioeconomic indicators, then derives
//! warehouse counts and relative density from the generated points. All
//! randomness flows from an explicit seed: the same [`GenerateOptions`]
//! always yield the same [`Dataset`].

pub mod registry;

use std::collections::BTreeMap;

use maup_geography_models::{Indicator, Point, Region, RegionIndicators};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use registry::{DepartmentDef, all_departments};

/// Default generation seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of generated warehouses.
pub const DEFAULT_TOTAL_POINTS: usize = 200;

const POINT_STREAM: u64 = 0;
const REGION_STREAM: u64 = 1;

/// Errors that can occur while generating the mock dataset.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The département table is empty or has no positive weight.
    #[error("Invalid département table: {message}")]
    InvalidTable {
        /// Description of what went wrong.
        message: String,
    },

    /// Distribution parameters were rejected by the sampler.
    #[error("Distribution error: {message}")]
    Distribution {
        /// Description of what went wrong.
        message: String,
    },
}

/// Controls mock dataset generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// RNG seed.
    pub seed: u64,
    /// Total number of warehouses across all départements.
    pub total_points: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            total_points: DEFAULT_TOTAL_POINTS,
        }
    }
}

/// Generated points and the regions they belong to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Warehouse locations.
    pub points: Vec<Point>,
    /// Départements with warehouse counts and density derived from `points`.
    pub regions: Vec<Region>,
}

impl Dataset {
    /// Generates a dataset over the embedded Île-de-France table.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if generation fails.
    pub fn generate(options: &GenerateOptions) -> Result<Self, GenerateError> {
        Self::from_departments(&all_departments(), options)
    }

    /// Generates a dataset over `departments`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidTable`] for an empty table or zero
    /// total weight, and [`GenerateError::Distribution`] for unusable
    /// spreads.
    pub fn from_departments(
        departments: &[DepartmentDef],
        options: &GenerateOptions,
    ) -> Result<Self, GenerateError> {
        let points = generate_points(departments, options)?;
        let regions = generate_regions(departments, options.seed)?;
        let regions = with_warehouse_stats(&regions, &points);

        log::info!(
            "Generated {} warehouses across {} départements (seed {})",
            points.len(),
            regions.len(),
            options.seed
        );

        Ok(Self { points, regions })
    }
}

/// Generates `options.total_points` warehouses, split across départements
/// by weight and scattered normally around each hub.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidTable`] for an empty table or zero total
/// weight, and [`GenerateError::Distribution`] for a negative or non-finite
/// spread.
pub fn generate_points(
    departments: &[DepartmentDef],
    options: &GenerateOptions,
) -> Result<Vec<Point>, GenerateError> {
    let weights: Vec<u32> = departments.iter().map(|d| d.weight).collect();
    let allocation = allocate(options.total_points, &weights)?;

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    rng.set_stream(POINT_STREAM);

    let mut points = Vec::with_capacity(options.total_points);
    for (department, count) in departments.iter().zip(allocation) {
        let lat = normal(department.center_lat, department.spread)?;
        let lon = normal(department.center_lon, department.spread)?;

        for _ in 0..count {
            points.push(Point {
                id: format!("WH{:03}", points.len()),
                latitude: lat.sample(&mut rng),
                longitude: lon.sample(&mut rng),
                region_code: department.code.clone(),
            });
        }
    }

    Ok(points)
}

/// Generates each département's socioeconomic indicators by jittering its
/// baselines. Warehouse count and density start at zero; see
/// [`with_warehouse_stats`].
///
/// Jitter is normal with a quarter of the indicator's surface standard
/// deviation, clamped to the indicator's valid range.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidTable`] for an empty table.
pub fn generate_regions(
    departments: &[DepartmentDef],
    seed: u64,
) -> Result<Vec<Region>, GenerateError> {
    if departments.is_empty() {
        return Err(GenerateError::InvalidTable {
            message: "no départements defined".to_string(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(REGION_STREAM);

    let mut jitter = |indicator: Indicator, baseline: f64| -> Result<f64, GenerateError> {
        let std_dev = indicator
            .surface_distribution()
            .map_or(0.0, |params| params.std_dev / 4.0);
        let (min, max) = indicator.range();
        Ok(normal(baseline, std_dev)?.sample(&mut rng).clamp(min, max))
    };

    departments
        .iter()
        .map(|department| {
            Ok(Region {
                code: department.code.clone(),
                name: department.name.clone(),
                indicators: RegionIndicators {
                    employment_rate: jitter(Indicator::EmploymentRate, department.employment_rate)?,
                    median_income: jitter(Indicator::MedianIncome, department.median_income)?,
                    logistics_accessibility: jitter(
                        Indicator::LogisticsAccessibility,
                        department.logistics_accessibility,
                    )?,
                    warehouse_count: 0,
                    warehouse_density: 0.0,
                },
            })
        })
        .collect()
}

/// Returns `regions` with `warehouse_count` and `warehouse_density` derived
/// from `points` by region code.
///
/// Points whose region code matches no region are not counted.
#[must_use]
pub fn with_warehouse_stats(regions: &[Region], points: &[Point]) -> Vec<Region> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for point in points {
        *counts.entry(point.region_code.as_str()).or_default() += 1;
    }

    let region_counts: Vec<u32> = regions
        .iter()
        .map(|r| counts.remove(r.code.as_str()).unwrap_or(0))
        .collect();

    if !counts.is_empty() {
        log::warn!(
            "Ignoring {} points with unknown region codes: {:?}",
            counts.values().sum::<u32>(),
            counts.keys().collect::<Vec<_>>()
        );
    }

    let densities = warehouse_density(&region_counts);

    regions
        .iter()
        .zip(region_counts.into_iter().zip(densities))
        .map(|(region, (count, density))| {
            let mut region = region.clone();
            region.indicators.warehouse_count = count;
            region.indicators.warehouse_density = density;
            region
        })
        .collect()
}

/// Relative warehouse density: `count / max(counts) × 100`.
///
/// All zeros when every count is zero.
#[must_use]
pub fn warehouse_density(counts: &[u32]) -> Vec<f64> {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; counts.len()];
    }

    counts
        .iter()
        .map(|&c| f64::from(c) / f64::from(max) * 100.0)
        .collect()
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>, GenerateError> {
    Normal::new(mean, std_dev).map_err(|e| GenerateError::Distribution {
        message: format!("N({mean}, {std_dev}) rejected: {e}"),
    })
}

/// Splits `total` across `weights` by largest remainder.
#[allow(clippy::cast_possible_truncation)]
fn allocate(total: usize, weights: &[u32]) -> Result<Vec<usize>, GenerateError> {
    let weight_sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if weight_sum == 0 {
        return Err(GenerateError::InvalidTable {
            message: "département weights sum to zero".to_string(),
        });
    }

    let total = total as u64;
    let mut shares: Vec<(usize, u64, u64)> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let scaled = total * u64::from(w);
            (i, scaled / weight_sum, scaled % weight_sum)
        })
        .collect();

    let assigned: u64 = shares.iter().map(|&(_, q, _)| q).sum();
    let mut leftover = total - assigned;

    shares.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    for share in &mut shares {
        if leftover == 0 {
            break;
        }
        share.1 += 1;
        leftover -= 1;
    }
    shares.sort_by_key(|&(i, _, _)| i);

    Ok(shares.into_iter().map(|(_, q, _)| q as usize).collect())
}
