//! Pearson correlation across regions.

use maup_analytics_models::{Correlation, CorrelationSummary, UNDEFINED};
use maup_geography_models::{Indicator, Region};

use crate::AnalyticsError;

/// Pearson correlation coefficient of two equally long series.
///
/// Returns [`UNDEFINED`] when either series has zero variance. The result
/// is symmetric: `pearson(a, b)` and `pearson(b, a)` are bit-identical.
///
/// # Errors
///
/// Returns [`AnalyticsError::LengthMismatch`] if the series differ in
/// length and [`AnalyticsError::InsufficientData`] for fewer than two
/// pairs.
#[allow(clippy::cast_precision_loss)]
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64, AnalyticsError> {
    if a.len() != b.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            message: format!("correlation needs at least 2 pairs, got {}", a.len()),
        });
    }

    if is_constant(a) || is_constant(b) {
        return Ok(UNDEFINED);
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 {
        Ok((cov / denom).clamp(-1.0, 1.0))
    } else {
        Ok(UNDEFINED)
    }
}

#[allow(clippy::float_cmp)]
fn is_constant(values: &[f64]) -> bool {
    values.first().is_some_and(|&first| values.iter().all(|&v| v == first))
}

/// Correlates warehouse density with each socioeconomic indicator across
/// `regions`.
///
/// Pairs whose variables have zero variance carry the [`UNDEFINED`]
/// coefficient rather than failing the whole summary.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] for fewer than two regions.
pub fn correlate(regions: &[Region]) -> Result<CorrelationSummary, AnalyticsError> {
    if regions.len() < 2 {
        return Err(AnalyticsError::InsufficientData {
            message: format!(
                "correlation needs at least 2 regions, got {}",
                regions.len()
            ),
        });
    }

    let density = series(regions, Indicator::WarehouseDensity);
    let entries = Indicator::socioeconomic()
        .iter()
        .map(|&indicator| {
            let coefficient = pearson(&density, &series(regions, indicator))?;
            if coefficient.is_nan() {
                log::warn!("Correlation with {indicator} is undefined (zero variance)");
            }
            Ok(Correlation {
                indicator,
                coefficient,
            })
        })
        .collect::<Result<Vec<_>, AnalyticsError>>()?;

    Ok(CorrelationSummary {
        sample_size: regions.len(),
        entries,
    })
}

fn series(regions: &[Region], indicator: Indicator) -> Vec<f64> {
    regions.iter().map(|r| r.value(indicator)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maup_geography_models::RegionIndicators;

    fn region(code: &str, density: f64, employment: f64, income: f64, access: f64) -> Region {
        Region {
            code: code.to_string(),
            name: code.to_string(),
            indicators: RegionIndicators {
                employment_rate: employment,
                median_income: income,
                logistics_accessibility: access,
                warehouse_count: 0,
                warehouse_density: density,
            },
        }
    }

    #[test]
    fn perfect_positive_and_negative() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let up = [10.0, 20.0, 30.0, 40.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&a, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn is_symmetric() {
        let a = [100.0, 0.0, 20.0, 10.0, 40.0, 16.0, 6.0, 24.0];
        let b = [71.2, 64.0, 69.5, 66.1, 73.8, 70.0, 62.4, 68.9];
        assert_eq!(
            pearson(&a, &b).unwrap().to_bits(),
            pearson(&b, &a).unwrap().to_bits()
        );
    }

    #[test]
    fn constant_series_is_undefined() {
        let a = [1.0, 2.0, 3.0];
        let flat = [0.1, 0.1, 0.1];
        assert!(pearson(&a, &flat).unwrap().is_nan());
        assert!(pearson(&flat, &a).unwrap().is_nan());
    }

    #[test]
    fn rejects_short_and_mismatched_series() {
        assert!(matches!(
            pearson(&[1.0], &[2.0]),
            Err(AnalyticsError::InsufficientData { .. })
        ));
        assert!(matches!(
            pearson(&[1.0, 2.0], &[2.0]),
            Err(AnalyticsError::LengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn correlates_every_socioeconomic_indicator() {
        let regions = vec![
            region("75", 10.0, 70.0, 30_000.0, 90.0),
            region("77", 100.0, 75.0, 28_000.0, 60.0),
            region("93", 50.0, 65.0, 21_000.0, 80.0),
        ];
        let summary = correlate(&regions).unwrap();
        assert_eq!(summary.sample_size, 3);
        assert_eq!(summary.entries.len(), 3);
        for indicator in Indicator::socioeconomic() {
            let c = summary.get(*indicator).unwrap();
            assert!(c.is_defined());
            assert!((-1.0..=1.0).contains(&c.coefficient));
        }
    }

    #[test]
    fn constant_employment_yields_undefined_pair() {
        let regions = vec![
            region("75", 10.0, 70.0, 30_000.0, 90.0),
            region("77", 100.0, 70.0, 28_000.0, 60.0),
            region("93", 50.0, 70.0, 21_000.0, 80.0),
        ];
        let summary = correlate(&regions).unwrap();
        let employment = summary.get(Indicator::EmploymentRate).unwrap();
        assert!(!employment.is_defined());
        assert_eq!(employment.to_string(), "n/a");
        assert!(summary.get(Indicator::MedianIncome).unwrap().is_defined());
    }

    #[test]
    fn fewer_than_two_regions_is_insufficient() {
        let regions = vec![region("75", 10.0, 70.0, 30_000.0, 90.0)];
        assert!(matches!(
            correlate(&regions),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }
}
