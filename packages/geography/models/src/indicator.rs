//! The closed set of indicators and their static display metadata.
//!
//! Every indicator carries a fixed [`IndicatorFormat`] so the same value
//! renders identically wherever it is shown. Names outside this set are
//! rejected with [`UnknownIndicatorError`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// An indicator that can be aggregated over grid cells or regions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Indicator {
    /// Facility presence. Point counts on the grid, relative density per region.
    WarehouseDensity,
    /// Percentage of employed working-age population.
    EmploymentRate,
    /// Median annual household income in euros.
    MedianIncome,
    /// Index of transportation and logistics infrastructure access.
    LogisticsAccessibility,
}

/// Parameters of a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalParams {
    /// Distribution mean.
    pub mean: f64,
    /// Distribution standard deviation.
    pub std_dev: f64,
}

/// How values of an indicator are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorFormat {
    /// Number of decimal places.
    pub decimals: usize,
    /// Suffix appended after the number (may be empty).
    pub unit: &'static str,
}

impl IndicatorFormat {
    /// Format used for coefficients of variation.
    pub const PERCENT: Self = Self {
        decimals: 1,
        unit: "%",
    };

    /// Format used for cell, region and facility counts.
    pub const COUNT: Self = Self {
        decimals: 0,
        unit: "",
    };

    /// Renders `value` with this format. Non-finite values render as `n/a`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_finite() {
            format!("{value:.prec$}{unit}", prec = self.decimals, unit = self.unit)
        } else {
            "n/a".to_string()
        }
    }
}

impl Indicator {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::WarehouseDensity,
            Self::EmploymentRate,
            Self::MedianIncome,
            Self::LogisticsAccessibility,
        ]
    }

    /// Indicators that are correlated against [`Self::WarehouseDensity`].
    #[must_use]
    pub const fn socioeconomic() -> &'static [Self] {
        &[
            Self::EmploymentRate,
            Self::MedianIncome,
            Self::LogisticsAccessibility,
        ]
    }

    /// Parses an indicator from its `snake_case` name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownIndicatorError`] if `name` is not one of the
    /// recognized indicator names.
    pub fn parse(name: &str) -> Result<Self, UnknownIndicatorError> {
        name.trim()
            .parse::<Self>()
            .map_err(|_| UnknownIndicatorError {
                name: name.to_string(),
            })
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WarehouseDensity => "Warehouse Density",
            Self::EmploymentRate => "Employment Rate",
            Self::MedianIncome => "Median Income",
            Self::LogisticsAccessibility => "Logistics Accessibility",
        }
    }

    /// One-sentence description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WarehouseDensity => "Number of warehouses per unit area",
            Self::EmploymentRate => "Percentage of employed working-age population",
            Self::MedianIncome => "Median annual household income in euros",
            Self::LogisticsAccessibility => {
                "Index of transportation and logistics infrastructure access"
            }
        }
    }

    /// Display format for values of this indicator.
    #[must_use]
    pub const fn format(self) -> IndicatorFormat {
        match self {
            Self::WarehouseDensity | Self::LogisticsAccessibility => IndicatorFormat {
                decimals: 1,
                unit: "",
            },
            Self::EmploymentRate => IndicatorFormat {
                decimals: 1,
                unit: "%",
            },
            Self::MedianIncome => IndicatorFormat {
                decimals: 0,
                unit: " €",
            },
        }
    }

    /// Inclusive range of meaningful values.
    #[must_use]
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::WarehouseDensity | Self::EmploymentRate | Self::LogisticsAccessibility => {
                (0.0, 100.0)
            }
            Self::MedianIncome => (1.0, f64::MAX),
        }
    }

    /// Distribution the synthetic grid surface is drawn from.
    ///
    /// `None` for [`Self::WarehouseDensity`], whose grid values are point
    /// counts rather than a synthetic field.
    #[must_use]
    pub const fn surface_distribution(self) -> Option<NormalParams> {
        match self {
            Self::WarehouseDensity => None,
            Self::EmploymentRate => Some(NormalParams {
                mean: 75.0,
                std_dev: 10.0,
            }),
            Self::MedianIncome => Some(NormalParams {
                mean: 35_000.0,
                std_dev: 8_000.0,
            }),
            Self::LogisticsAccessibility => Some(NormalParams {
                mean: 70.0,
                std_dev: 15.0,
            }),
        }
    }

    /// Stable per-indicator stream number for seeded generators.
    #[must_use]
    pub const fn stream(self) -> u64 {
        self as u64
    }
}

/// Error returned when an indicator name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown indicator '{name}': expected one of {}", expected_names())]
pub struct UnknownIndicatorError {
    /// The name that failed to parse.
    pub name: String,
}

fn expected_names() -> String {
    Indicator::all()
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(", ")
}
