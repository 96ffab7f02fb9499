//! Before/after household emissions.

use serde::{Deserialize, Serialize};

use crate::constants::{GAS_CO2_KG_PER_MJ, GRID_EMISSIONS_KG_PER_KWH, TREE_CO2_KG_PER_YEAR};
use crate::error::CalcError;

/// Annual emissions before and after the proposed system (tonnes CO₂-e).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Co2Reduction {
    pub current_co2_tonnes: f64,
    /// Never negative, even when solar exceeds consumption.
    pub projected_co2_tonnes: f64,
    pub reduction_tonnes: f64,
    /// In `[0, 100]`.
    pub reduction_percent: f64,
    /// Trees needed to absorb the same CO₂ in a year.
    pub trees_equivalent: f64,
}

/// Computes emissions before and after solar and electrification.
///
/// # Errors
///
/// Returns a `CalcError` if any quantity is negative.
pub fn co2_reduction(
    annual_electricity_kwh: f64,
    annual_gas_mj: f64,
    solar_generation_kwh: f64,
    gas_eliminated: bool,
) -> Result<Co2Reduction, CalcError> {
    CalcError::require_non_negative("annual_electricity_kwh", annual_electricity_kwh)?;
    CalcError::require_non_negative("annual_gas_mj", annual_gas_mj)?;
    CalcError::require_non_negative("solar_generation_kwh", solar_generation_kwh)?;

    let electricity_tonnes = annual_electricity_kwh * GRID_EMISSIONS_KG_PER_KWH / 1000.0;
    let gas_tonnes = annual_gas_mj * GAS_CO2_KG_PER_MJ / 1000.0;
    let current_co2_tonnes = electricity_tonnes + gas_tonnes;

    let solar_offset = solar_generation_kwh * GRID_EMISSIONS_KG_PER_KWH / 1000.0;
    let remaining_gas = if gas_eliminated { 0.0 } else { gas_tonnes };
    let projected_co2_tonnes = ((electricity_tonnes - solar_offset).max(0.0) + remaining_gas).max(0.0);

    let reduction_tonnes = current_co2_tonnes - projected_co2_tonnes;
    let reduction_percent = if current_co2_tonnes > 0.0 {
        (reduction_tonnes / current_co2_tonnes * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Ok(Co2Reduction {
        current_co2_tonnes,
        projected_co2_tonnes,
        reduction_tonnes,
        reduction_percent,
        trees_equivalent: reduction_tonnes * 1000.0 / TREE_CO2_KG_PER_YEAR,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn current_emissions_for_reference_household() {
        let co2 = co2_reduction(7300.0, 18_250.0, 0.0, false).expect("valid");
        assert_abs_diff_eq!(co2.current_co2_tonnes, 6.7, epsilon = 0.05);
        assert_abs_diff_eq!(co2.projected_co2_tonnes, co2.current_co2_tonnes);
        assert_eq!(co2.reduction_percent, 0.0);
    }

    #[test]
    fn full_solar_and_gas_elimination_reaches_zero() {
        let co2 = co2_reduction(7300.0, 18_250.0, 9000.0, true).expect("valid");
        assert_eq!(co2.projected_co2_tonnes, 0.0);
        assert_eq!(co2.reduction_percent, 100.0);
    }

    #[test]
    fn gas_kept_when_not_eliminated() {
        let co2 = co2_reduction(7300.0, 18_250.0, 9000.0, false).expect("valid");
        assert_abs_diff_eq!(
            co2.projected_co2_tonnes,
            18_250.0 * GAS_CO2_KG_PER_MJ / 1000.0,
            epsilon = 1e-9
        );
        assert!(co2.reduction_percent > 0.0 && co2.reduction_percent < 100.0);
    }

    #[test]
    fn no_consumption_reports_zero_percent() {
        let co2 = co2_reduction(0.0, 0.0, 5000.0, true).expect("valid");
        assert_eq!(co2.reduction_percent, 0.0);
        assert_eq!(co2.projected_co2_tonnes, 0.0);
    }
}
