//! Heuristic battery and solar sizing.

use serde::{Deserialize, Serialize};

use crate::config::{BatteryConfig, EngineConfig};
use crate::constants::{DAYS_PER_YEAR, USABLE_CAPACITY_FACTOR};
use crate::error::CalcError;

/// Tolerance so exact module multiples are not bumped to the next size.
const SNAP_EPSILON: f64 = 1e-9;

/// Battery size recommendation (kWh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryRecommendation {
    /// Capacity needed before EV adjustment and module snapping.
    pub base_kwh: f64,
    pub recommended_kwh: f64,
    pub usable_kwh: f64,
    pub ev_adjusted: bool,
    /// The VPP minimum raised the recommendation.
    pub vpp_floor_applied: bool,
}

/// Sizes a battery from daily usage.
///
/// The base size covers `usage_share` of daily usage after depth-of-discharge
/// and round-trip losses. EV owners get `ev_addition_kwh` more, the result
/// snaps up to a whole number of modules, and VPP participation enforces
/// the program minimum.
///
/// # Errors
///
/// Returns a `CalcError` if `daily_usage_kwh` is negative.
pub fn size_battery(
    daily_usage_kwh: f64,
    has_ev: bool,
    wants_vpp: bool,
    cfg: &BatteryConfig,
) -> Result<BatteryRecommendation, CalcError> {
    CalcError::require_non_negative("daily_usage_kwh", daily_usage_kwh)?;

    let base_kwh =
        daily_usage_kwh * cfg.usage_share / (cfg.depth_of_discharge * cfg.round_trip_efficiency);
    let adjusted = if has_ev {
        base_kwh + cfg.ev_addition_kwh
    } else {
        base_kwh
    };

    let modules = (adjusted / cfg.module_kwh - SNAP_EPSILON).ceil().max(1.0);
    let snapped = modules * cfg.module_kwh;

    let vpp_floor_applied = wants_vpp && snapped < cfg.vpp_min_kwh;
    let recommended_kwh = if vpp_floor_applied {
        cfg.vpp_min_kwh
    } else {
        snapped
    };

    Ok(BatteryRecommendation {
        base_kwh,
        recommended_kwh,
        usable_kwh: recommended_kwh * USABLE_CAPACITY_FACTOR,
        ev_adjusted: has_ev,
        vpp_floor_applied,
    })
}

/// Solar system recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarRecommendation {
    /// Generation the system is sized to reach (kWh/year).
    pub target_generation_kwh: f64,
    pub recommended_kw: f64,
    pub panel_count: u32,
    pub panel_kw: f64,
    /// Expected first-year generation (kWh).
    pub annual_generation_kwh: f64,
}

/// Sizes a solar array so annual generation exceeds annual usage.
///
/// The target covers usage times the coverage factor, battery round-trip
/// losses over a daily cycle, and the EV's annual charging energy when the
/// household has one. Panel count is rounded up.
///
/// # Errors
///
/// Returns a `CalcError` if usage or battery size is negative, or the
/// configured yield per kW is not positive.
pub fn size_solar(
    yearly_usage_kwh: f64,
    battery_kwh: f64,
    has_ev: bool,
    cfg: &EngineConfig,
) -> Result<SolarRecommendation, CalcError> {
    CalcError::require_non_negative("yearly_usage_kwh", yearly_usage_kwh)?;
    CalcError::require_non_negative("battery_kwh", battery_kwh)?;

    let battery_losses =
        battery_kwh * DAYS_PER_YEAR * (1.0 - cfg.battery.round_trip_efficiency);
    let ev_kwh = if has_ev { cfg.ev.annual_kwh() } else { 0.0 };
    let target_generation_kwh =
        yearly_usage_kwh * cfg.solar.coverage_factor + battery_losses + ev_kwh;

    let yield_per_kw =
        CalcError::require_positive("annual_yield_per_kw", cfg.solar.annual_yield_per_kw())?;
    let kw_needed = target_generation_kwh / yield_per_kw;
    let panel_count = (kw_needed / cfg.solar.panel_kw - SNAP_EPSILON).ceil().max(1.0) as u32;
    let recommended_kw = round_to(f64::from(panel_count) * cfg.solar.panel_kw, 2);

    Ok(SolarRecommendation {
        target_generation_kwh,
        recommended_kw,
        panel_count,
        panel_kw: cfg.solar.panel_kw,
        annual_generation_kwh: recommended_kw * yield_per_kw,
    })
}

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
