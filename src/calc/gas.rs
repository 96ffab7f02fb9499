//! Annual gas cost, energy equivalent and emissions from one gas bill.

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_YEAR, GAS_CO2_KG_PER_MJ, GAS_MJ_TO_KWH};
use crate::error::CalcError;
use crate::model::Bill;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasAnalysis {
    /// `(total_amount / billing_days) × 365` (dollars).
    pub annual_gas_cost: f64,
    /// Metered period usage (MJ).
    pub period_usage_mj: f64,
    /// Usage annualised from the billing period (MJ).
    pub annual_usage_mj: f64,
    /// Metered period usage converted to kWh.
    pub gas_kwh_equivalent: f64,
    /// Annualised combustion emissions (kg CO₂-e).
    pub co2_emissions_kg: f64,
    /// Fixed connection fee (cents/day).
    pub daily_supply_charge_cents: f64,
}

/// Analyses a gas bill.
///
/// Emissions are annualised from the metered period, so a 60-day and a
/// 90-day bill with the same daily use report the same figure.
///
/// # Errors
///
/// Returns a `CalcError` for an electricity bill or a bill without a positive
/// billing-day count.
pub fn analyse_gas(bill: &Bill) -> Result<GasAnalysis, CalcError> {
    let usage = bill.gas_usage()?;
    let days = bill.billing_days()?;
    CalcError::require_non_negative("gas_usage_mj", usage.gas_usage_mj)?;

    let annualise = DAYS_PER_YEAR / days;

    Ok(GasAnalysis {
        annual_gas_cost: bill.total_amount / days * DAYS_PER_YEAR,
        period_usage_mj: usage.gas_usage_mj,
        annual_usage_mj: usage.gas_usage_mj * annualise,
        gas_kwh_equivalent: usage.gas_usage_mj * GAS_MJ_TO_KWH,
        co2_emissions_kg: usage.gas_usage_mj * GAS_CO2_KG_PER_MJ * annualise,
        daily_supply_charge_cents: bill.daily_supply_charge_cents,
    })
}

/// Gas used over a year (MJ), annualised from the bill's billing period.
pub(crate) fn annual_usage_mj(bill: &Bill) -> Result<f64, CalcError> {
    let usage = bill.gas_usage()?;
    Ok(usage.gas_usage_mj * DAYS_PER_YEAR / bill.billing_days()?)
}
