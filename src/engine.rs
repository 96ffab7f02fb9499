//! Orchestrates every calculator into one [`ProposalCalculations`].

use tracing::{debug, info, warn};

use crate::analytics::{
    analyse_tariff, battery_cycle, daily_load_profile, grid_independence, project_savings,
    solar_generation_profile, system_specs,
};
use crate::calc::{
    BenefitMap, BenefitStream, InvestmentMap, analyse_gas, calculate_payback, co2_reduction,
    compare_providers, cooking_savings, ev_savings, heating_savings, hot_water_savings,
    pool_heat_pump, project_usage, size_battery, size_solar, vpp_income,
};
use crate::config::{ApplianceConfig, EngineConfig};
use crate::constants::DAYS_PER_YEAR;
use crate::error::CalcError;
use crate::model::{GasAppliance, State, StateRebate, Technology};
use crate::proposal::ProposalCalculations;
use crate::request::CalculationRequest;

/// Appliances assumed when a gas customer does not list any.
const DEFAULT_GAS_APPLIANCES: [GasAppliance; 3] = [
    GasAppliance::HotWater,
    GasAppliance::Heating,
    GasAppliance::Cooking,
];

/// Runs the full calculation for one proposal.
///
/// Stages run leaf to root: usage and gas analysis, appliance
/// electrification, battery then solar sizing, VPP ranking, investment and
/// rebates, payback, emissions, and finally the chart analytics. The
/// function is pure; identical inputs give identical results.
///
/// # Arguments
///
/// * `request` - Customer, bills, VPP catalog and rebate table
/// * `cfg` - Pricing and engineering assumptions
///
/// # Errors
///
/// Returns a `CalcError` if `cfg` fails validation, a bill violates a
/// precondition (zero billing days, wrong bill type) or a derived quantity
/// is out of range.
pub fn generate_full_calculations(
    request: &CalculationRequest,
    cfg: &EngineConfig,
) -> Result<ProposalCalculations, CalcError> {
    let config_errors = cfg.validate();
    if !config_errors.is_empty() {
        return Err(CalcError::InvalidConfig(config_errors));
    }

    let customer = &request.customer;
    let elec_bill = &request.electricity_bill;
    debug!(customer = %customer.name, state = %customer.state, "starting proposal calculation");

    let usage = project_usage(elec_bill)?;
    let electricity_rate = elec_bill.usage_rate_cents()?;
    let feed_in = elec_bill
        .electricity_usage()?
        .feed_in_tariff_cents
        .unwrap_or(cfg.tariff.default_feed_in_cents);
    debug!(
        daily_kwh = usage.daily_average_kwh,
        rate_cents = electricity_rate,
        feed_in_cents = feed_in,
        "usage projected"
    );

    // Gas and appliance electrification
    let gas_bill = request.gas_bill.as_ref();
    if customer.has_gas && gas_bill.is_none() {
        warn!(customer = %customer.name, "customer has gas but no gas bill; skipping electrification");
    }
    let gas = gas_bill.map(analyse_gas).transpose()?;

    let appliance_kinds = match gas_bill {
        Some(_) if customer.gas_appliances.is_empty() => DEFAULT_GAS_APPLIANCES.to_vec(),
        Some(_) => customer.gas_appliance_kinds(),
        None => Vec::new(),
    };
    if appliance_kinds.contains(&GasAppliance::Other) {
        warn!(
            appliances = ?customer.gas_appliances,
            "unrecognised gas appliance; gas connection is kept"
        );
    }

    // A listed gas pool heater implies a pool even if the flag was not set.
    let has_pool = customer.has_pool || appliance_kinds.contains(&GasAppliance::PoolHeater);
    let pool = match (has_pool, customer.pool_volume_litres) {
        (true, Some(volume)) => {
            let gas_rate = match gas_bill {
                Some(bill) => bill.gas_usage()?.gas_rate_cents_mj,
                None => cfg.appliances.default_gas_rate_cents_mj,
            };
            Some(pool_heat_pump(volume, electricity_rate, gas_rate, &cfg.appliances)?)
        }
        (true, None) => {
            warn!(customer = %customer.name, "pool without a volume; skipping pool heat pump");
            None
        }
        (false, _) => None,
    };

    let covered_share = covered_gas_share(&appliance_kinds, &cfg.appliances);
    let pool_heater_replaced =
        !appliance_kinds.contains(&GasAppliance::PoolHeater) || pool.is_some();
    let gas_eliminated = gas_bill.is_some()
        && covered_share > 0.0
        && pool_heater_replaced
        && !appliance_kinds.contains(&GasAppliance::Other);
    let shares = if gas_eliminated {
        spread_over_all_gas(&appliance_kinds, covered_share, &cfg.appliances)
    } else {
        cfg.appliances.clone()
    };

    let electrify = |kind: GasAppliance| gas_bill.filter(|_| appliance_kinds.contains(&kind));
    let hot_water = electrify(GasAppliance::HotWater)
        .map(|bill| hot_water_savings(bill, electricity_rate, &shares))
        .transpose()?;
    let heating = electrify(GasAppliance::Heating)
        .map(|bill| heating_savings(bill, electricity_rate, &shares))
        .transpose()?;
    let cooking = electrify(GasAppliance::Cooking)
        .map(|bill| cooking_savings(bill, electricity_rate, &shares))
        .transpose()?;

    let wants_ev = customer.wants_ev();
    let ev = if wants_ev {
        Some(ev_savings(electricity_rate, feed_in, &cfg.ev)?)
    } else {
        None
    };

    let electrified_kwh = hot_water.as_ref().map_or(0.0, |s| s.new_appliance_annual_kwh)
        + heating.as_ref().map_or(0.0, |s| s.new_appliance_annual_kwh)
        + cooking.as_ref().map_or(0.0, |s| s.new_appliance_annual_kwh)
        + pool.as_ref().map_or(0.0, |p| p.annual_operating_kwh);
    let ev_kwh = ev.as_ref().map_or(0.0, |e| e.annual_ev_kwh);
    debug!(electrified_kwh, ev_kwh, gas_eliminated, "electrification assessed");

    // Sizing
    let wants_vpp = request
        .providers
        .iter()
        .any(|p| p.is_available_in(customer.state));
    if !wants_vpp {
        warn!(state = %customer.state, "no VPP providers available; battery sized without VPP floor");
    }
    let battery = size_battery(usage.daily_average_kwh, wants_ev, wants_vpp, &cfg.battery)?;
    let solar = size_solar(
        usage.yearly_usage_kwh + electrified_kwh,
        battery.recommended_kwh,
        wants_ev,
        cfg,
    )?;
    debug!(
        battery_kwh = battery.recommended_kwh,
        solar_kw = solar.recommended_kw,
        panels = solar.panel_count,
        "system sized"
    );

    // VPP
    let vpp_provider_comparison = compare_providers(
        &request.providers,
        customer.state,
        customer.has_gas || gas_bill.is_some(),
        battery.recommended_kwh,
    );
    let vpp = vpp_provider_comparison
        .iter()
        .find(|row| row.eligible)
        .and_then(|row| {
            request
                .providers
                .iter()
                .find(|p| p.name == row.provider && p.program_name == row.program_name)
        })
        .map(vpp_income);

    // Investment and rebates
    let mut investment = InvestmentMap::new();
    let pricing = &cfg.pricing;
    investment.insert(Technology::Solar, solar.recommended_kw * pricing.solar_per_kw);
    investment.insert(Technology::Battery, battery.recommended_kwh * pricing.battery_per_kwh);
    if hot_water.is_some() {
        investment.insert(Technology::HotWaterHeatPump, pricing.hot_water_heat_pump);
    }
    if heating.is_some() {
        investment.insert(Technology::ReverseCycleAc, pricing.reverse_cycle_ac);
    }
    if cooking.is_some() {
        investment.insert(Technology::Induction, pricing.induction_cooktop);
    }
    if let Some(pool) = &pool {
        investment.insert(
            Technology::PoolHeatPump,
            pool.recommended_kw * pricing.pool_heat_pump_per_kw,
        );
    }
    if ev.is_some() {
        investment.insert(Technology::EvCharger, pricing.ev_charger);
    }

    let rebate_size = |tech: Technology| match tech {
        Technology::Solar => solar.recommended_kw,
        Technology::Battery => battery.recommended_kwh,
        Technology::PoolHeatPump => pool.as_ref().map_or(0.0, |p| p.recommended_kw),
        _ => 1.0,
    };
    let rebates = apply_rebates(&request.rebates, customer.state, &investment, rebate_size);

    // Benefits
    let annual_consumption_kwh = usage.yearly_usage_kwh + electrified_kwh + ev_kwh;
    let grid = grid_independence(
        annual_consumption_kwh,
        solar.annual_generation_kwh,
        battery.recommended_kwh,
        &cfg.battery,
    )?;

    let mut annual_benefits = BenefitMap::new();
    annual_benefits.insert(
        BenefitStream::Electricity,
        (grid.direct_solar_kwh + grid.battery_supplied_kwh) * electricity_rate / 100.0
            + grid.grid_export_kwh * feed_in / 100.0,
    );
    if let Some(vpp) = &vpp {
        annual_benefits.insert(BenefitStream::Vpp, vpp.total_annual_value);
    }
    let appliance_savings: Vec<f64> = [
        hot_water.as_ref().map(|s| s.annual_savings),
        heating.as_ref().map(|s| s.annual_savings),
        cooking.as_ref().map(|s| s.annual_savings),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !appliance_savings.is_empty() {
        annual_benefits.insert(BenefitStream::Gas, appliance_savings.iter().sum());
    }
    if let (true, Some(bill)) = (gas_eliminated, gas_bill) {
        annual_benefits.insert(
            BenefitStream::GasSupply,
            bill.daily_supply_charge_cents * DAYS_PER_YEAR / 100.0,
        );
    }
    if let Some(ev) = &ev {
        annual_benefits.insert(BenefitStream::Ev, ev.savings_vs_petrol);
    }
    if let (Some(pool), true) = (&pool, gas_bill.is_some()) {
        annual_benefits.insert(BenefitStream::Pool, pool.estimated_savings_vs_gas);
    }

    let payback = calculate_payback(&investment, &rebates, &annual_benefits);
    debug!(
        net_investment = payback.net_investment,
        annual_benefit = payback.total_annual_benefit,
        payback_years = ?payback.payback_years,
        "payback calculated"
    );

    // Solar covers the new electric loads first; the rest offsets existing usage.
    let offsetting_solar_kwh =
        (solar.annual_generation_kwh - electrified_kwh - ev_kwh).max(0.0);
    let co2 = co2_reduction(
        usage.yearly_usage_kwh,
        gas.as_ref().map_or(0.0, |g| g.annual_usage_mj),
        offsetting_solar_kwh,
        gas_eliminated,
    )?;

    // Chart analytics
    let tariff = analyse_tariff(elec_bill)?;
    let load_profile = daily_load_profile(usage.daily_average_kwh, wants_ev, has_pool, cfg)?;
    let generation_profile =
        solar_generation_profile(solar.recommended_kw, annual_consumption_kwh, &cfg.solar)?;
    let cycle = battery_cycle(battery.recommended_kwh, wants_ev)?;
    let annual_energy_cost =
        usage.projected_annual_cost + gas.as_ref().map_or(0.0, |g| g.annual_gas_cost);
    let projection = project_savings(
        payback.total_annual_benefit,
        annual_energy_cost,
        payback.net_investment.max(0.0),
        cfg,
    )?;
    let specs = system_specs(
        solar.recommended_kw,
        solar.panel_count,
        battery.recommended_kwh,
        &cfg.specs,
    );

    info!(
        customer = %customer.name,
        solar_kw = solar.recommended_kw,
        battery_kwh = battery.recommended_kwh,
        annual_savings = payback.total_annual_benefit,
        payback_years = ?payback.payback_years,
        "proposal calculated"
    );

    Ok(ProposalCalculations {
        customer_name: customer.name.clone(),
        total_annual_savings: payback.total_annual_benefit,
        payback_years: payback.payback_years,
        recommended_battery_kwh: battery.recommended_kwh,
        recommended_solar_kw: solar.recommended_kw,
        net_investment: payback.net_investment,
        gas_eliminated,
        usage,
        gas,
        hot_water,
        heating,
        cooking,
        pool,
        ev,
        vpp,
        vpp_provider_comparison,
        battery,
        solar,
        investment,
        rebates,
        annual_benefits,
        payback,
        co2,
        tariff,
        load_profile,
        generation_profile,
        battery_cycle: cycle,
        grid_independence: grid,
        projection,
        system_specs: specs,
    })
}

/// Configured share of household gas for an appliance category.
fn configured_share(kind: GasAppliance, cfg: &ApplianceConfig) -> f64 {
    match kind {
        GasAppliance::HotWater => cfg.hot_water_share,
        GasAppliance::Heating => cfg.heating_share,
        GasAppliance::Cooking => cfg.cooking_share,
        GasAppliance::PoolHeater | GasAppliance::Other => 0.0,
    }
}

/// Sum of the configured shares of the listed appliance categories.
fn covered_gas_share(kinds: &[GasAppliance], cfg: &ApplianceConfig) -> f64 {
    kinds.iter().map(|k| configured_share(*k, cfg)).sum()
}

/// Rescales the listed categories' shares so together they account for all
/// of the household's gas. Used once the connection is dropped, so every MJ
/// whose emissions disappear is also priced as a saving.
fn spread_over_all_gas(
    kinds: &[GasAppliance],
    covered_share: f64,
    cfg: &ApplianceConfig,
) -> ApplianceConfig {
    let scaled = |kind: GasAppliance| {
        if kinds.contains(&kind) {
            configured_share(kind, cfg) / covered_share
        } else {
            0.0
        }
    };
    ApplianceConfig {
        hot_water_share: scaled(GasAppliance::HotWater),
        heating_share: scaled(GasAppliance::Heating),
        cooking_share: scaled(GasAppliance::Cooking),
        ..cfg.clone()
    }
}

/// Sums the state's rebates per purchased technology, capped at its cost.
fn apply_rebates(
    rebates: &[StateRebate],
    state: State,
    investment: &InvestmentMap,
    size_of: impl Fn(Technology) -> f64,
) -> InvestmentMap {
    let mut totals = InvestmentMap::new();
    for rebate in rebates.iter().filter(|r| r.state == state) {
        if investment.contains_key(&rebate.technology) {
            *totals.entry(rebate.technology).or_insert(0.0) +=
                rebate.value_for(size_of(rebate.technology));
        }
    }

    for (tech, total) in &mut totals {
        let cost = investment.get(tech).copied().unwrap_or(0.0);
        if *total > cost {
            warn!(technology = %tech, rebate = *total, cost, "rebate exceeds cost; capping");
            *total = cost;
        }
    }
    totals
}
