//! Gas-to-electric appliance comparisons.
//!
//! Each calculator apportions the household's annualised gas use to one
//! appliance, converts the useful heat it delivers into the electricity an
//! efficient electric replacement would draw, and prices both.

use serde::{Deserialize, Serialize};

use super::gas::annual_usage_mj;
use crate::config::ApplianceConfig;
use crate::constants::{
    DAYS_PER_YEAR, GAS_MJ_TO_KWH, HEAT_PUMP_COP_MAX, HEAT_PUMP_COP_MIN, POOL_KW_PER_1000L_AVG,
    POOL_KW_PER_1000L_MAX, POOL_KW_PER_1000L_MIN,
};
use crate::error::CalcError;
use crate::model::Bill;

/// Heat-pump hot water versus the existing gas system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotWaterSavings {
    /// Annual gas cost of hot water (dollars).
    pub current_cost: f64,
    /// Annual electricity cost of the heat pump (dollars).
    pub new_appliance_annual_cost: f64,
    pub new_appliance_annual_kwh: f64,
    /// `current_cost − new_appliance_annual_cost` (dollars).
    pub annual_savings: f64,
    /// COP used, clamped to the realistic heat-pump range.
    pub cop: f64,
    /// Gas daily supply charge avoided once gas is disconnected (cents/year).
    pub daily_supply_saved_cents: f64,
}

/// Reverse-cycle air conditioning versus ducted gas heating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatingSavings {
    pub current_cost: f64,
    pub new_appliance_annual_cost: f64,
    pub new_appliance_annual_kwh: f64,
    pub annual_savings: f64,
    pub cop: f64,
    /// The replacement also cools, which the gas system could not.
    pub additional_cooling_benefit: bool,
}

/// Induction cooktop versus a gas cooktop.
///
/// `annual_savings` may be slightly negative: induction can cost a little
/// more to run where electricity is expensive relative to gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingSavings {
    pub current_cost: f64,
    pub new_appliance_annual_cost: f64,
    pub new_appliance_annual_kwh: f64,
    pub annual_savings: f64,
}

/// Pool heat-pump sizing and running cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolHeatPump {
    pub pool_volume_litres: f64,
    /// Thermal output at the average sizing factor (kW).
    pub recommended_kw: f64,
    pub min_kw: f64,
    pub max_kw: f64,
    /// Heat delivered to the pool per year (kWh).
    pub annual_heat_kwh: f64,
    pub annual_operating_kwh: f64,
    /// Electricity cost of the heat pump (dollars).
    pub annual_operating_cost: f64,
    /// Cost of delivering the same heat with a gas pool heater (dollars).
    pub gas_equivalent_cost: f64,
    pub estimated_savings_vs_gas: f64,
}

/// Annual gas (MJ) attributed to one appliance and what it costs (dollars).
fn appliance_gas(bill: &Bill, share: f64) -> Result<(f64, f64), CalcError> {
    let rate_cents = bill.gas_usage()?.gas_rate_cents_mj;
    let mj = annual_usage_mj(bill)? * share;
    Ok((mj, mj * rate_cents / 100.0))
}

/// Electricity (kWh) needed to deliver the useful heat of `mj` burned at
/// `gas_efficiency`, with an electric appliance of `electric_efficiency`.
fn electric_equivalent_kwh(mj: f64, gas_efficiency: f64, electric_efficiency: f64) -> f64 {
    mj * GAS_MJ_TO_KWH * gas_efficiency / electric_efficiency
}

/// Compares gas hot water with a heat-pump system.
///
/// # Errors
///
/// Returns a `CalcError` if `gas_bill` is not a valid gas bill or the rate is negative.
pub fn hot_water_savings(
    gas_bill: &Bill,
    electricity_rate_cents: f64,
    cfg: &ApplianceConfig,
) -> Result<HotWaterSavings, CalcError> {
    CalcError::require_non_negative("electricity_rate_cents", electricity_rate_cents)?;
    let (mj, current_cost) = appliance_gas(gas_bill, cfg.hot_water_share)?;

    let cop = cfg.hot_water_cop.clamp(HEAT_PUMP_COP_MIN, HEAT_PUMP_COP_MAX);
    let kwh = electric_equivalent_kwh(mj, cfg.hot_water_gas_efficiency, cop);
    let new_cost = kwh * electricity_rate_cents / 100.0;

    Ok(HotWaterSavings {
        current_cost,
        new_appliance_annual_cost: new_cost,
        new_appliance_annual_kwh: kwh,
        annual_savings: current_cost - new_cost,
        cop,
        daily_supply_saved_cents: gas_bill.daily_supply_charge_cents * DAYS_PER_YEAR,
    })
}

/// Compares ducted gas heating with reverse-cycle air conditioning.
///
/// # Errors
///
/// Returns a `CalcError` if `gas_bill` is not a valid gas bill or the rate is negative.
pub fn heating_savings(
    gas_bill: &Bill,
    electricity_rate_cents: f64,
    cfg: &ApplianceConfig,
) -> Result<HeatingSavings, CalcError> {
    CalcError::require_non_negative("electricity_rate_cents", electricity_rate_cents)?;
    let (mj, current_cost) = appliance_gas(gas_bill, cfg.heating_share)?;

    let kwh = electric_equivalent_kwh(mj, cfg.heating_gas_efficiency, cfg.heating_cop);
    let new_cost = kwh * electricity_rate_cents / 100.0;

    Ok(HeatingSavings {
        current_cost,
        new_appliance_annual_cost: new_cost,
        new_appliance_annual_kwh: kwh,
        annual_savings: current_cost - new_cost,
        cop: cfg.heating_cop,
        additional_cooling_benefit: true,
    })
}

/// Compares a gas cooktop with induction. Negative savings are reported as is.
///
/// # Errors
///
/// Returns a `CalcError` if `gas_bill` is not a valid gas bill or the rate is negative.
pub fn cooking_savings(
    gas_bill: &Bill,
    electricity_rate_cents: f64,
    cfg: &ApplianceConfig,
) -> Result<CookingSavings, CalcError> {
    CalcError::require_non_negative("electricity_rate_cents", electricity_rate_cents)?;
    let (mj, current_cost) = appliance_gas(gas_bill, cfg.cooking_share)?;

    let kwh = electric_equivalent_kwh(mj, cfg.cooktop_gas_efficiency, cfg.induction_efficiency);
    let new_cost = kwh * electricity_rate_cents / 100.0;

    Ok(CookingSavings {
        current_cost,
        new_appliance_annual_cost: new_cost,
        new_appliance_annual_kwh: kwh,
        annual_savings: current_cost - new_cost,
    })
}

/// Sizes a pool heat pump from pool volume and compares it with gas heating.
///
/// # Errors
///
/// Returns a `CalcError` if the volume is not positive or a rate is negative.
pub fn pool_heat_pump(
    pool_volume_litres: f64,
    electricity_rate_cents: f64,
    gas_rate_cents_mj: f64,
    cfg: &ApplianceConfig,
) -> Result<PoolHeatPump, CalcError> {
    let volume = CalcError::require_positive("pool_volume_litres", pool_volume_litres)?;
    CalcError::require_non_negative("electricity_rate_cents", electricity_rate_cents)?;
    CalcError::require_non_negative("gas_rate_cents_mj", gas_rate_cents_mj)?;

    let kilolitres = volume / 1000.0;
    let recommended_kw = kilolitres * POOL_KW_PER_1000L_AVG;
    let annual_heat_kwh = recommended_kw * cfg.pool_heating_hours;
    let annual_operating_kwh = annual_heat_kwh / cfg.pool_cop;
    let annual_operating_cost = annual_operating_kwh * electricity_rate_cents / 100.0;

    let gas_mj = annual_heat_kwh / cfg.pool_gas_heater_efficiency / GAS_MJ_TO_KWH;
    let gas_equivalent_cost = gas_mj * gas_rate_cents_mj / 100.0;

    Ok(PoolHeatPump {
        pool_volume_litres: volume,
        recommended_kw,
        min_kw: kilolitres * POOL_KW_PER_1000L_MIN,
        max_kw: kilolitres * POOL_KW_PER_1000L_MAX,
        annual_heat_kwh,
        annual_operating_kwh,
        annual_operating_cost,
        gas_equivalent_cost,
        estimated_savings_vs_gas: gas_equivalent_cost - annual_operating_cost,
    })
}
