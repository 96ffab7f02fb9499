//! VPP income estimation and provider ranking.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DAYS_PER_YEAR;
use crate::model::{State, VppProvider};

/// Annual income from one VPP program (dollars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VppIncome {
    pub provider: String,
    pub program_name: String,
    /// `daily_credit × 365`.
    pub daily_credit_annual: f64,
    /// `event_payment × estimated_events_per_year`.
    pub event_payments_annual: f64,
    pub bundle_discount: f64,
    pub total_annual_value: f64,
}

/// Converts a provider's tariff structure into an annual income estimate.
pub fn vpp_income(provider: &VppProvider) -> VppIncome {
    let daily_credit_annual = provider.daily_credit * DAYS_PER_YEAR;
    let event_payments_annual = provider.event_payment * f64::from(provider.estimated_events_per_year);

    VppIncome {
        provider: provider.name.clone(),
        program_name: provider.program_name.clone(),
        daily_credit_annual,
        event_payments_annual,
        bundle_discount: provider.bundle_discount,
        total_annual_value: daily_credit_annual + event_payments_annual + provider.bundle_discount,
    }
}

/// How well a program suits the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategicFit {
    Excellent,
    Good,
    Moderate,
    /// Eligibility hurdles, e.g. a minimum battery size above the recommendation.
    Complex,
}

impl fmt::Display for StrategicFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        };
        f.write_str(label)
    }
}

/// One ranked row of the provider comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VppComparisonItem {
    pub provider: String,
    pub program_name: String,
    pub has_gas_bundle: bool,
    /// Total annual value (dollars).
    pub estimated_annual_value: f64,
    pub strategic_fit: StrategicFit,
    /// Whether the recommended battery meets the program's minimum size.
    pub eligible: bool,
}

/// Share of the best eligible value that still counts as an excellent fit.
const EXCELLENT_SHARE: f64 = 0.9;
/// Share of the best eligible value that counts as a good fit.
const GOOD_SHARE: f64 = 0.7;

/// Ranks the providers available in `state` by annual value, highest first.
///
/// Ties go to gas-bundle providers when the customer has gas, then to
/// provider name so the order is deterministic.
pub fn compare_providers(
    providers: &[VppProvider],
    state: State,
    customer_has_gas: bool,
    battery_kwh: f64,
) -> Vec<VppComparisonItem> {
    let mut rows: Vec<VppComparisonItem> = providers
        .iter()
        .filter(|p| p.is_available_in(state))
        .map(|p| VppComparisonItem {
            provider: p.name.clone(),
            program_name: p.program_name.clone(),
            has_gas_bundle: p.has_gas_bundle,
            estimated_annual_value: vpp_income(p).total_annual_value,
            strategic_fit: StrategicFit::Moderate,
            eligible: p.accepts_battery(battery_kwh),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.estimated_annual_value
            .total_cmp(&a.estimated_annual_value)
            .then_with(|| {
                if customer_has_gas {
                    b.has_gas_bundle.cmp(&a.has_gas_bundle)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| a.provider.cmp(&b.provider))
    });

    let best = rows
        .iter()
        .filter(|r| r.eligible)
        .map(|r| r.estimated_annual_value)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut top_assigned = false;
    for row in &mut rows {
        row.strategic_fit = if !row.eligible {
            StrategicFit::Complex
        } else if !top_assigned || (best > 0.0 && row.estimated_annual_value >= best * EXCELLENT_SHARE) {
            StrategicFit::Excellent
        } else if best > 0.0 && row.estimated_annual_value >= best * GOOD_SHARE {
            StrategicFit::Good
        } else {
            StrategicFit::Moderate
        };
        if row.eligible {
            top_assigned = true;
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn provider(name: &str, daily: f64, gas: bool, states: &[State]) -> VppProvider {
        VppProvider {
            name: name.to_string(),
            program_name: format!("{name} VPP"),
            daily_credit: daily,
            event_payment: 0.0,
            estimated_events_per_year: 0,
            bundle_discount: 0.0,
            has_gas_bundle: gas,
            available_states: states.to_vec(),
            min_battery_size_kwh: None,
        }
    }

    #[test]
    fn income_sums_all_streams() {
        let p = VppProvider {
            event_payment: 15.0,
            estimated_events_per_year: 12,
            bundle_discount: 100.0,
            ..provider("Origin", 0.5, false, &[State::Nsw])
        };
        let income = vpp_income(&p);
        assert_abs_diff_eq!(income.daily_credit_annual, 182.5);
        assert_abs_diff_eq!(income.event_payments_annual, 180.0);
        assert_abs_diff_eq!(income.total_annual_value, 462.5);
    }

    #[test]
    fn comparison_filters_by_state_and_sorts_descending() {
        let providers = vec![
            provider("Low", 0.2, false, &[State::Nsw]),
            provider("High", 1.0, false, &[State::Nsw]),
            provider("Elsewhere", 5.0, false, &[State::Wa]),
        ];
        let rows = compare_providers(&providers, State::Nsw, false, 10.0);
        let names: Vec<&str> = rows.iter().map(|r| r.provider.as_str()).collect();
        assert_eq!(names, vec!["High", "Low"]);
        assert_eq!(rows[0].strategic_fit, StrategicFit::Excellent);
        assert_eq!(rows[1].strategic_fit, StrategicFit::Moderate);
    }

    #[test]
    fn gas_bundle_wins_ties_for_gas_customers() {
        let providers = vec![
            provider("Alpha", 0.5, false, &[State::Vic]),
            provider("Zeta", 0.5, true, &[State::Vic]),
        ];
        let with_gas = compare_providers(&providers, State::Vic, true, 10.0);
        assert_eq!(with_gas[0].provider, "Zeta");

        let without_gas = compare_providers(&providers, State::Vic, false, 10.0);
        assert_eq!(without_gas[0].provider, "Alpha");
    }

    #[test]
    fn ineligible_provider_is_complex() {
        let mut big = provider("Big", 2.0, false, &[State::Sa]);
        big.min_battery_size_kwh = Some(20.0);
        let small = provider("Small", 1.0, false, &[State::Sa]);
        let rows = compare_providers(&[big, small], State::Sa, false, 10.0);
        assert_eq!(rows[0].provider, "Big");
        assert_eq!(rows[0].strategic_fit, StrategicFit::Complex);
        assert!(!rows[0].eligible);
        assert_eq!(rows[1].strategic_fit, StrategicFit::Excellent);
    }

    #[test]
    fn good_tier_between_seventy_and_ninety_percent() {
        let providers = vec![
            provider("Best", 1.0, false, &[State::Qld]),
            provider("Close", 0.8, false, &[State::Qld]),
        ];
        let rows = compare_providers(&providers, State::Qld, false, 10.0);
        assert_eq!(rows[1].strategic_fit, StrategicFit::Good);
    }

    #[test]
    fn no_providers_in_state_yields_empty_comparison() {
        let providers = vec![provider("WaOnly", 1.0, false, &[State::Wa])];
        assert!(compare_providers(&providers, State::Tas, false, 10.0).is_empty());
    }
}
