//! Monthly solar generation for a Southern-Hemisphere site.

use serde::{Deserialize, Serialize};

use crate::config::SolarConfig;
use crate::constants::{DAYTIME_USAGE_FRACTION, MONTHS_PER_YEAR};
use crate::error::CalcError;

/// Share of annual generation per month, January first. Sums to 1.
const MONTHLY_WEIGHTS: [f64; MONTHS_PER_YEAR] = [
    0.112, 0.098, 0.091, 0.073, 0.062, 0.052, 0.058, 0.070, 0.083, 0.098, 0.103, 0.100,
];

const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGeneration {
    /// 1 = January.
    pub month: u32,
    pub name: String,
    pub generation_kwh: f64,
    /// Annual usage spread evenly across months.
    pub usage_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationProfile {
    pub system_kw: f64,
    /// Always 12 entries.
    pub monthly: Vec<MonthlyGeneration>,
    pub annual_generation_kwh: f64,
    /// Generation as a share of usage, capped at 100.
    pub coverage_percent: f64,
    /// Share of generation consumed on site during daylight, in `[0, 100]`.
    pub self_consumption_percent: f64,
}

/// Distributes first-year generation across months with a seasonal curve.
///
/// # Errors
///
/// Returns a `CalcError` if `system_kw` or `annual_usage_kwh` is negative.
pub fn solar_generation_profile(
    system_kw: f64,
    annual_usage_kwh: f64,
    cfg: &SolarConfig,
) -> Result<GenerationProfile, CalcError> {
    CalcError::require_non_negative("system_kw", system_kw)?;
    CalcError::require_non_negative("annual_usage_kwh", annual_usage_kwh)?;

    let annual_generation_kwh = system_kw * cfg.annual_yield_per_kw();
    let monthly_usage = annual_usage_kwh / MONTHS_PER_YEAR as f64;

    let monthly = MONTHLY_WEIGHTS
        .iter()
        .zip(MONTH_NAMES)
        .zip(1..)
        .map(|((weight, name), month)| MonthlyGeneration {
            month,
            name: name.to_string(),
            generation_kwh: annual_generation_kwh * weight,
            usage_kwh: monthly_usage,
        })
        .collect();

    let coverage_percent = if annual_usage_kwh > 0.0 {
        (annual_generation_kwh / annual_usage_kwh * 100.0).min(100.0)
    } else if annual_generation_kwh > 0.0 {
        100.0
    } else {
        0.0
    };

    let self_consumption_percent = if annual_generation_kwh > 0.0 {
        let consumed = annual_generation_kwh.min(annual_usage_kwh * DAYTIME_USAGE_FRACTION);
        (consumed / annual_generation_kwh * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Ok(GenerationProfile {
        system_kw,
        monthly,
        annual_generation_kwh,
        coverage_percent,
        self_consumption_percent,
    })
}
