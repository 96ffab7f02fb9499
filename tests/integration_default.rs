//! Integration tests for the full proposal calculation.

mod common;

use approx::assert_abs_diff_eq;
use proposal_calc::calc::{BenefitStream, StrategicFit};
use proposal_calc::config::EngineConfig;
use proposal_calc::engine::generate_full_calculations;
use proposal_calc::model::Technology;
use proposal_calc::proposal::ProposalCalculations;

fn run(request: &proposal_calc::request::CalculationRequest) -> ProposalCalculations {
    generate_full_calculations(request, &EngineConfig::default()).expect("calculation succeeds")
}

#[test]
fn identical_inputs_give_identical_results() {
    let request = common::gas_household_request();
    assert_eq!(run(&request), run(&request));
}

#[test]
fn headline_fields_match_sections() {
    let p = run(&common::gas_household_request());
    assert_eq!(p.total_annual_savings, p.payback.total_annual_benefit);
    assert_eq!(p.payback_years, p.payback.payback_years);
    assert_eq!(p.net_investment, p.payback.net_investment);
    assert_eq!(p.recommended_battery_kwh, p.battery.recommended_kwh);
    assert_eq!(p.recommended_solar_kw, p.solar.recommended_kw);
    assert_abs_diff_eq!(
        p.net_investment,
        p.payback.total_investment - p.payback.total_rebates,
        epsilon = 1e-9
    );
}

#[test]
fn usage_ratios_are_exact() {
    let p = run(&common::gas_household_request());
    assert_eq!(p.usage.monthly_usage_kwh, p.usage.daily_average_kwh * 30.0);
    assert_eq!(p.usage.yearly_usage_kwh, p.usage.daily_average_kwh * 365.0);
}

#[test]
fn gas_household_is_fully_electrified() {
    let p = run(&common::gas_household_request());
    assert!(p.gas_eliminated);
    assert!(p.hot_water.as_ref().is_some_and(|h| h.annual_savings > 0.0));
    assert!(p.heating.as_ref().is_some_and(|h| h.annual_savings > 0.0));
    let cooking = p.cooking.as_ref().expect("cooking assessed");
    assert!(cooking.annual_savings.abs() < 50.0);

    for tech in [
        Technology::HotWaterHeatPump,
        Technology::ReverseCycleAc,
        Technology::Induction,
    ] {
        assert!(p.investment.contains_key(&tech), "missing {tech}");
    }
    assert!(p.annual_benefits.contains_key(&BenefitStream::GasSupply));
}

#[test]
fn vpp_comparison_ranks_state_providers() {
    let p = run(&common::gas_household_request());
    assert_eq!(p.vpp_provider_comparison.len(), 2, "WA provider must be filtered out");
    let values: Vec<f64> = p
        .vpp_provider_comparison
        .iter()
        .map(|r| r.estimated_annual_value)
        .collect();
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(p.vpp_provider_comparison[0].strategic_fit, StrategicFit::Excellent);

    let best = p.vpp.as_ref().expect("best provider income");
    assert_eq!(best.provider, p.vpp_provider_comparison[0].provider);
    assert!(p.recommended_battery_kwh >= 10.0);
}

#[test]
fn rebates_follow_state_table() {
    let p = run(&common::gas_household_request());
    // 160 $/kWh capped at $2,400
    assert_abs_diff_eq!(p.rebates[&Technology::Battery], 2400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.rebates[&Technology::HotWaterHeatPump], 400.0, epsilon = 1e-9);
    assert!(!p.rebates.contains_key(&Technology::Solar));
}

#[test]
fn payback_and_projection_agree() {
    let p = run(&common::gas_household_request());
    let years = p.payback_years.expect("investment is recovered");
    assert!(years > 1.0 && years < 25.0);

    assert_eq!(p.projection.len(), 25);
    assert_eq!(p.projection[0].year, 1);
    assert_eq!(p.projection[24].year, 25);
    assert!(p.projection[0].cumulative_saving < 0.0);
    assert!(p.projection[24].cumulative_saving > 0.0);
}

#[test]
fn bounded_outputs_stay_in_range() {
    let p = run(&common::gas_household_request());
    let pct = 0.0..=100.0;
    assert!(pct.contains(&p.co2.reduction_percent));
    assert!(p.co2.projected_co2_tonnes >= 0.0);
    assert!(pct.contains(&p.grid_independence.self_sufficiency_percent));
    assert!(pct.contains(&p.generation_profile.coverage_percent));
    assert!(pct.contains(&p.generation_profile.self_consumption_percent));

    let t = &p.tariff;
    assert_abs_diff_eq!(
        t.peak_cost_percent + t.off_peak_cost_percent + t.shoulder_cost_percent + t.supply_cost_percent,
        100.0,
        epsilon = 1e-9
    );
}

#[test]
fn solar_exceeds_usage_and_exports() {
    let p = run(&common::gas_household_request());
    assert!(p.solar.annual_generation_kwh > p.usage.yearly_usage_kwh);
    assert!(p.grid_independence.grid_export_kwh > 0.0);
    assert!(p.grid_independence.projected_grid_dependence < 100.0);
    assert_eq!(p.generation_profile.monthly.len(), 12);
    assert_eq!(p.load_profile.hourly_estimate.len(), 24);
    assert_eq!(p.battery_cycle.hourly.len(), 24);
}

#[test]
fn ev_interest_grows_the_system() {
    let base = common::gas_household_request();
    let mut with_ev = base.clone();
    with_ev.customer.ev_interest = true;

    let without = run(&base);
    let with = run(&with_ev);
    assert!(with.recommended_solar_kw > without.recommended_solar_kw);
    assert!(with.recommended_battery_kwh >= without.recommended_battery_kwh);
    assert!(with.ev.is_some());
    assert!(with.investment.contains_key(&Technology::EvCharger));
    assert!(
        with.load_profile.consumption_between(0..=5)
            > without.load_profile.consumption_between(0..=5)
    );
}

#[test]
fn unlisted_gas_appliance_keeps_connection() {
    let mut request = common::gas_household_request();
    request.customer.gas_appliances.push("Outdoor BBQ".to_string());
    let p = run(&request);
    assert!(!p.gas_eliminated);
    assert!(!p.annual_benefits.contains_key(&BenefitStream::GasSupply));
    assert!(p.co2.projected_co2_tonnes > 0.0);
}

#[test]
fn electric_household_without_vpp() {
    let p = run(&common::electric_household_request());
    assert!(p.vpp.is_none());
    assert!(p.gas.is_none());
    assert!(!p.gas_eliminated);
    assert_eq!(p.investment.len(), 2);
    assert!(!p.annual_benefits.contains_key(&BenefitStream::Vpp));
    assert!(p.total_annual_savings > 0.0);
}

#[test]
fn serializes_to_json_with_contract_fields() {
    let p = run(&common::gas_household_request());
    let json = p.to_json().expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    for key in [
        "total_annual_savings",
        "payback_years",
        "recommended_battery_kwh",
        "recommended_solar_kw",
        "vpp_provider_comparison",
        "projection",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["vpp_provider_comparison"][0]["strategic_fit"], "excellent");
}

#[test]
fn report_mentions_headline_numbers() {
    let p = run(&common::gas_household_request());
    let report = p.to_string();
    assert!(report.contains("Nguyen"));
    assert!(report.contains("Payback:"));
    assert!(report.contains("Gas eliminated:        yes"));
}

#[test]
fn partial_appliance_list_prices_all_eliminated_gas() {
    let mut request = common::gas_household_request();
    request.customer.gas_appliances = vec!["Gas hot water".to_string()];
    let p = run(&request);

    assert!(p.gas_eliminated);
    assert!(p.heating.is_none());
    assert!(p.cooking.is_none());

    // 18,250 MJ a year at 3.8 c/MJ, all of it now attributed to hot water
    let gas = p.gas.as_ref().expect("gas analysed");
    let hot_water = p.hot_water.as_ref().expect("hot water assessed");
    assert_abs_diff_eq!(gas.annual_usage_mj, 18_250.0, epsilon = 1e-6);
    assert_abs_diff_eq!(hot_water.current_cost, 693.5, epsilon = 1e-6);
    assert_abs_diff_eq!(
        p.annual_benefits[&BenefitStream::Gas],
        hot_water.annual_savings,
        epsilon = 1e-9
    );
}

#[test]
fn full_electrification_accounts_for_every_mj() {
    let p = run(&common::gas_household_request());
    let attributed = p.hot_water.as_ref().map_or(0.0, |s| s.current_cost)
        + p.heating.as_ref().map_or(0.0, |s| s.current_cost)
        + p.cooking.as_ref().map_or(0.0, |s| s.current_cost);
    assert_abs_diff_eq!(attributed, 693.5, epsilon = 1e-6);
    assert!(p.co2.projected_co2_tonnes < p.co2.current_co2_tonnes);
}

#[test]
fn unrecognised_appliance_keeps_configured_shares() {
    let mut request = common::gas_household_request();
    request.customer.gas_appliances = vec!["Gas hot water".to_string(), "Outdoor BBQ".to_string()];
    let p = run(&request);

    assert!(!p.gas_eliminated);
    // 40% of 18,250 MJ at 3.8 c/MJ
    let hot_water = p.hot_water.as_ref().expect("hot water assessed");
    assert_abs_diff_eq!(hot_water.current_cost, 277.4, epsilon = 1e-6);
    let gas_tonnes = p.gas.as_ref().map_or(0.0, |g| g.co2_emissions_kg) / 1000.0;
    assert!(p.co2.projected_co2_tonnes >= gas_tonnes - 1e-9);
}
