#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point, region and bounding box types for areal aggregation.
//!
//! These types describe the raw inputs of a MAUP comparison: located
//! facilities (points), administrative regions with their own scalar
//! indicators, and the fixed bounding box a grid is laid over. They are
//! independent of any particular grid size.

pub mod indicator;

use serde::{Deserialize, Serialize};

pub use indicator::{Indicator, IndicatorFormat, NormalParams, UnknownIndicatorError};

/// A located facility (e.g. a warehouse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Facility identifier (e.g. "WH007").
    pub id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Code of the region the facility belongs to (e.g. "93").
    pub region_code: String,
}

impl Point {
    /// Returns `true` if both coordinates are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// An axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub min_lat: f64,
    /// Northern edge in degrees.
    pub max_lat: f64,
    /// Western edge in degrees.
    pub min_lon: f64,
    /// Eastern edge in degrees.
    pub max_lon: f64,
}

impl BoundingBox {
    /// The Île-de-France region of interest.
    pub const ILE_DE_FRANCE: Self = Self {
        min_lat: 48.12,
        max_lat: 49.24,
        min_lon: 1.44,
        max_lon: 3.56,
    };

    /// Creates a bounding box from its four edges.
    #[must_use]
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Returns `true` if every edge is finite and `max > min` on both axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lon, self.max_lon]
            .iter()
            .all(|v| v.is_finite())
            && self.max_lat > self.min_lat
            && self.max_lon > self.min_lon
    }

    /// Returns `true` if the coordinate lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }

    /// Latitude extent in degrees.
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees.
    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::ILE_DE_FRANCE
    }
}

/// Scalar indicators attached to a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionIndicators {
    /// Share of the working-age population in employment (0-100).
    pub employment_rate: f64,
    /// Median annual household income in euros.
    pub median_income: f64,
    /// Transport and logistics infrastructure access index (0-100).
    pub logistics_accessibility: f64,
    /// Number of facilities whose region code matches this region.
    pub warehouse_count: u32,
    /// `warehouse_count` relative to the busiest region (0-100).
    pub warehouse_density: f64,
}

/// An administrative region (a French département for the default dataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region code (e.g. "75").
    pub code: String,
    /// Human-readable name (e.g. "Paris").
    pub name: String,
    /// Indicator values for this region.
    pub indicators: RegionIndicators,
}

impl Region {
    /// Returns this region's value for `indicator`.
    #[must_use]
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::WarehouseDensity => self.indicators.warehouse_density,
            Indicator::EmploymentRate => self.indicators.employment_rate,
            Indicator::MedianIncome => self.indicators.median_income,
            Indicator::LogisticsAccessibility => self.indicators.logistics_accessibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bbox_is_valid() {
        assert!(BoundingBox::default().is_valid());
    }

    #[test]
    fn degenerate_bbox_is_invalid() {
        assert!(!BoundingBox::new(48.0, 48.0, 2.0, 3.0).is_valid());
        assert!(!BoundingBox::new(48.0, 49.0, 3.0, 2.0).is_valid());
        assert!(!BoundingBox::new(f64::NAN, 49.0, 2.0, 3.0).is_valid());
    }

    #[test]
    fn contains_includes_edges() {
        let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        assert!(bbox.contains(1.0, 1.0));
        assert!(bbox.contains(0.0, 0.0));
        assert!(!bbox.contains(1.000_001, 0.5));
    }

    #[test]
    fn region_value_selects_indicator() {
        let region = Region {
            code: "75".to_string(),
            name: "Paris".to_string(),
            indicators: RegionIndicators {
                employment_rate: 68.5,
                median_income: 28_500.0,
                logistics_accessibility: 92.0,
                warehouse_count: 4,
                warehouse_density: 20.0,
            },
        };
        assert!((region.value(Indicator::EmploymentRate) - 68.5).abs() < f64::EPSILON);
        assert!((region.value(Indicator::WarehouseDensity) - 20.0).abs() < f64::EPSILON);
    }
}
