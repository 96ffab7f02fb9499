//! Annual energy balance between household, solar, battery and grid.

use serde::{Deserialize, Serialize};

use crate::config::BatteryConfig;
use crate::constants::{DAYS_PER_YEAR, DAYTIME_USAGE_FRACTION, USABLE_CAPACITY_FACTOR};
use crate::error::CalcError;

/// Grid dependence before and after the proposed system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridIndependence {
    pub annual_consumption_kwh: f64,
    pub solar_generation_kwh: f64,
    pub battery_kwh: f64,
    /// Solar used as it is generated.
    pub direct_solar_kwh: f64,
    /// Stored solar delivered in the evening and overnight.
    pub battery_supplied_kwh: f64,
    pub grid_import_kwh: f64,
    pub grid_export_kwh: f64,
    /// In `[0, 100]`.
    pub self_sufficiency_percent: f64,
    /// Baseline: without a system every kWh comes from the grid.
    pub current_grid_dependence: f64,
    pub projected_grid_dependence: f64,
}

/// Splits annual consumption between direct solar, battery and grid.
///
/// Direct use is capped at the daytime share of consumption. The battery
/// delivers at most one usable cycle per day after round-trip losses and
/// never more than the surplus solar available to charge it. Whatever
/// generation is left is exported, so a net generator always exports.
///
/// # Errors
///
/// Returns a `CalcError` if any quantity is negative.
pub fn grid_independence(
    annual_consumption_kwh: f64,
    solar_generation_kwh: f64,
    battery_kwh: f64,
    cfg: &BatteryConfig,
) -> Result<GridIndependence, CalcError> {
    CalcError::require_non_negative("annual_consumption_kwh", annual_consumption_kwh)?;
    CalcError::require_non_negative("solar_generation_kwh", solar_generation_kwh)?;
    CalcError::require_non_negative("battery_kwh", battery_kwh)?;

    let direct_solar_kwh =
        solar_generation_kwh.min(annual_consumption_kwh * DAYTIME_USAGE_FRACTION);
    let remaining_demand = annual_consumption_kwh - direct_solar_kwh;
    let surplus = solar_generation_kwh - direct_solar_kwh;

    let battery_capability =
        battery_kwh * USABLE_CAPACITY_FACTOR * cfg.round_trip_efficiency * DAYS_PER_YEAR;
    let battery_supplied_kwh = battery_capability.min(remaining_demand).min(surplus);

    let grid_import_kwh = (remaining_demand - battery_supplied_kwh).max(0.0);
    let grid_export_kwh = (surplus - battery_supplied_kwh).max(0.0);

    let self_sufficiency_percent = if annual_consumption_kwh > 0.0 {
        ((direct_solar_kwh + battery_supplied_kwh) / annual_consumption_kwh * 100.0)
            .clamp(0.0, 100.0)
    } else {
        100.0
    };

    Ok(GridIndependence {
        annual_consumption_kwh,
        solar_generation_kwh,
        battery_kwh,
        direct_solar_kwh,
        battery_supplied_kwh,
        grid_import_kwh,
        grid_export_kwh,
        self_sufficiency_percent,
        current_grid_dependence: 100.0,
        projected_grid_dependence: 100.0 - self_sufficiency_percent,
    })
}
