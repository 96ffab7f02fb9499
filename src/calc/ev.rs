//! Running-cost comparison of petrol, grid-charged and solar-charged driving.

use serde::{Deserialize, Serialize};

use crate::config::EvConfig;
use crate::error::CalcError;

/// Annual driving costs (dollars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvSavings {
    pub annual_km: f64,
    /// Energy the EV draws per year (kWh).
    pub annual_ev_kwh: f64,
    pub petrol_annual_cost: f64,
    /// Charging entirely at the retail rate.
    pub ev_grid_charge_cost: f64,
    /// Charging from solar; the cost is the feed-in income forgone.
    pub ev_solar_charge_cost: f64,
    /// `petrol_annual_cost − ev_grid_charge_cost`.
    pub savings_vs_petrol: f64,
    /// `petrol_annual_cost − ev_solar_charge_cost`.
    pub savings_with_solar: f64,
}

/// Compares the annual cost of driving on petrol with an EV.
///
/// # Errors
///
/// Returns a `CalcError` if either rate is negative.
pub fn ev_savings(
    electricity_rate_cents: f64,
    feed_in_tariff_cents: f64,
    cfg: &EvConfig,
) -> Result<EvSavings, CalcError> {
    CalcError::require_non_negative("electricity_rate_cents", electricity_rate_cents)?;
    CalcError::require_non_negative("feed_in_tariff_cents", feed_in_tariff_cents)?;

    let litres = cfg.annual_km / 100.0 * cfg.petrol_litres_per_100km;
    let petrol_annual_cost = litres * cfg.petrol_price_per_litre;

    let annual_ev_kwh = cfg.annual_kwh();
    let ev_grid_charge_cost = annual_ev_kwh * electricity_rate_cents / 100.0;
    let ev_solar_charge_cost = annual_ev_kwh * feed_in_tariff_cents / 100.0;

    Ok(EvSavings {
        annual_km: cfg.annual_km,
        annual_ev_kwh,
        petrol_annual_cost,
        ev_grid_charge_cost,
        ev_solar_charge_cost,
        savings_vs_petrol: petrol_annual_cost - ev_grid_charge_cost,
        savings_with_solar: petrol_annual_cost - ev_solar_charge_cost,
    })
}
