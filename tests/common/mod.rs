//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use proposal_calc::model::{
    Bill, Customer, ElectricityUsage, GasUsage, RebateKind, State, StateRebate, Technology,
    VppProvider,
};
use proposal_calc::request::CalculationRequest;

/// Flat-rate quarterly electricity bill: 1,800 kWh over 90 days (20 kWh/day).
pub fn electricity_bill() -> Bill {
    Bill::electricity(
        "Origin",
        90,
        640.0,
        110.0,
        ElectricityUsage {
            total_usage_kwh: 1800.0,
            peak_rate_cents: Some(32.0),
            feed_in_tariff_cents: Some(5.0),
            ..ElectricityUsage::default()
        },
    )
}

/// Quarterly gas bill: 4,500 MJ over 90 days (18,250 MJ/year).
pub fn gas_bill() -> Bill {
    Bill::gas(
        "AGL",
        90,
        250.0,
        80.0,
        GasUsage {
            gas_usage_mj: 4500.0,
            gas_rate_cents_mj: 3.8,
        },
    )
}

/// A provider offering a VPP program in `states`.
pub fn provider(name: &str, daily_credit: f64, states: &[State]) -> VppProvider {
    VppProvider {
        name: name.to_string(),
        program_name: format!("{name} VPP"),
        daily_credit,
        event_payment: 4.0,
        estimated_events_per_year: 20,
        bundle_discount: 0.0,
        has_gas_bundle: false,
        available_states: states.to_vec(),
        min_battery_size_kwh: None,
    }
}

/// Amber and Origin in NSW, plus a WA-only program the engine must ignore.
pub fn providers() -> Vec<VppProvider> {
    let mut origin = provider("Origin", 0.35, &[State::Nsw, State::Vic]);
    origin.has_gas_bundle = true;
    origin.bundle_discount = 100.0;
    vec![
        provider("Amber", 0.50, &[State::Nsw, State::Vic, State::Qld]),
        origin,
        provider("Synergy", 0.90, &[State::Wa]),
    ]
}

/// NSW battery rebate per kWh (capped) and a flat heat-pump rebate.
pub fn rebates() -> Vec<StateRebate> {
    vec![
        StateRebate {
            name: "Peak Demand Reduction Scheme".to_string(),
            kind: RebateKind::PerKwh,
            max_amount: Some(2400.0),
            ..StateRebate::flat(State::Nsw, Technology::Battery, 160.0)
        },
        StateRebate::flat(State::Nsw, Technology::HotWaterHeatPump, 400.0),
    ]
}

/// Gas household in NSW replacing every gas appliance.
pub fn gas_household_request() -> CalculationRequest {
    let mut customer = Customer::new("Nguyen", State::Nsw);
    customer.has_gas = true;
    customer.gas_appliances = vec![
        "Gas hot water".to_string(),
        "Ducted heating".to_string(),
        "Cooktop".to_string(),
    ];

    CalculationRequest {
        gas_bill: Some(gas_bill()),
        providers: providers(),
        rebates: rebates(),
        ..CalculationRequest::new(customer, electricity_bill())
    }
}

/// All-electric household with no VPP programs on offer.
pub fn electric_household_request() -> CalculationRequest {
    CalculationRequest::new(Customer::new("Smith", State::Tas), electricity_bill())
}
