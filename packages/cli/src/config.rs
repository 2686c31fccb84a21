//! Analysis settings.
//!
//! Built-in defaults, optionally overridden by a TOML file, optionally
//! overridden again by command-line flags.

use std::path::{Path, PathBuf};

use maup_analytics::sweep::DEFAULT_SIZES;
use maup_generate::{DEFAULT_SEED, DEFAULT_TOTAL_POINTS, GenerateOptions};
use maup_geography_models::{BoundingBox, Indicator};
use maup_spatial::SurfaceOptions;
use maup_spatial::surface::DEFAULT_SIGMA;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cells per grid side.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AnalysisConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for one analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cells per grid side.
    pub grid_size: usize,
    /// Indicator to summarize.
    pub indicator: Indicator,
    /// Seed for mock data and synthetic surfaces.
    pub seed: u64,
    /// Number of generated warehouses.
    pub total_points: usize,
    /// Gaussian kernel width for synthetic surfaces, in cells.
    pub sigma: f64,
    /// Grid sizes compared by the sweep.
    pub sweep_sizes: Vec<usize>,
    /// Region of interest.
    pub bbox: BoundingBox,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            indicator: Indicator::WarehouseDensity,
            seed: DEFAULT_SEED,
            total_points: DEFAULT_TOTAL_POINTS,
            sigma: DEFAULT_SIGMA,
            sweep_sizes: DEFAULT_SIZES.to_vec(),
            bbox: BoundingBox::ILE_DE_FRANCE,
        }
    }
}

impl AnalysisConfig {
    /// Loads settings from `path`, or the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Parses settings from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown
    /// indicator names.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(contents)?)
    }

    /// Options for mock data generation.
    #[must_use]
    pub const fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            seed: self.seed,
            total_points: self.total_points,
        }
    }

    /// Options for synthetic surface generation.
    #[must_use]
    pub const fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            seed: self.seed,
            sigma: self.sigma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(
            AnalysisConfig::from_toml_str("").unwrap(),
            AnalysisConfig::default()
        );
    }

    #[test]
    fn overrides_selected_keys() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            grid_size = 20
            indicator = "median_income"
            sweep_sizes = [2, 4, 8]

            [bbox]
            min_lat = 48.0
            max_lat = 49.0
            min_lon = 2.0
            max_lon = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.grid_size, 20);
        assert_eq!(config.indicator, Indicator::MedianIncome);
        assert_eq!(config.sweep_sizes, vec![2, 4, 8]);
        assert_eq!(config.bbox, BoundingBox::new(48.0, 49.0, 2.0, 3.0));
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn rejects_unknown_indicator() {
        assert!(matches!(
            AnalysisConfig::from_toml_str(r#"indicator = "crime_rate""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AnalysisConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn no_path_yields_defaults() {
        assert_eq!(
            AnalysisConfig::load(None).unwrap(),
            AnalysisConfig::default()
        );
    }
}
