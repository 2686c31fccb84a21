//! Compile-time registry of département definitions.
//!
//! The table is embedded via `include_str!` and describes, per
//! département, where its mock warehouses cluster and the baseline values
//! of its socioeconomic indicators.

use serde::{Deserialize, Serialize};

/// Number of registered départements. Enforced by a test.
#[cfg(test)]
const EXPECTED_DEPARTMENT_COUNT: usize = 8;

/// Embedded TOML region table.
const ILE_DE_FRANCE_TOML: &str = include_str!("../regions/ile_de_france.toml");

/// A département definition, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDef {
    /// Département code (e.g. `"93"`).
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Name of the logistics hub the warehouses cluster around.
    pub hub: String,
    /// Hub latitude.
    pub center_lat: f64,
    /// Hub longitude.
    pub center_lon: f64,
    /// Standard deviation of warehouse coordinates around the hub, in degrees.
    pub spread: f64,
    /// Relative share of generated warehouses.
    pub weight: u32,
    /// Baseline employment rate (0-100).
    pub employment_rate: f64,
    /// Baseline median income in euros.
    pub median_income: f64,
    /// Baseline logistics accessibility index (0-100).
    pub logistics_accessibility: f64,
}

#[derive(Deserialize)]
struct RegionTable {
    departments: Vec<DepartmentDef>,
}

/// Returns all registered départements in table order.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. Since it is a compile-time
/// constant, a parse failure indicates a development error and is caught
/// by the tests below.
#[must_use]
pub fn all_departments() -> Vec<DepartmentDef> {
    toml::de::from_str::<RegionTable>(ILE_DE_FRANCE_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse embedded département table: {e}"))
        .departments
}

#[cfg(test)]
mod tests {
    use super::*;
    use maup_geography_models::BoundingBox;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_departments() {
        let departments = all_departments();
        assert_eq!(
            departments.len(),
            EXPECTED_DEPARTMENT_COUNT,
            "Expected {EXPECTED_DEPARTMENT_COUNT} départements, found {}. \
             Update EXPECTED_DEPARTMENT_COUNT after adding/removing entries.",
            departments.len()
        );
    }

    #[test]
    fn department_codes_are_unique() {
        let mut seen = BTreeSet::new();
        for department in &all_departments() {
            assert!(
                seen.insert(&department.code),
                "Duplicate département code: {}",
                department.code
            );
        }
    }

    #[test]
    fn hubs_lie_inside_default_bbox() {
        let bbox = BoundingBox::default();
        for department in &all_departments() {
            assert!(
                bbox.contains(department.center_lat, department.center_lon),
                "Hub of {} lies outside the region of interest",
                department.code
            );
        }
    }

    #[test]
    fn baselines_are_in_range() {
        for department in &all_departments() {
            assert!(department.weight > 0, "{} has zero weight", department.code);
            assert!(department.spread > 0.0, "{} has no spread", department.code);
            assert!((0.0..=100.0).contains(&department.employment_rate));
            assert!((0.0..=100.0).contains(&department.logistics_accessibility));
            assert!(department.median_income > 0.0);
        }
    }
}
