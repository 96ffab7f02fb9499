//! Net investment, payback period and simple multi-year savings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::sizing::round_to;
use crate::model::Technology;

/// A recurring annual benefit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitStream {
    /// Lower electricity bills from solar and battery.
    Electricity,
    /// VPP credits and event payments.
    Vpp,
    /// Gas usage no longer paid for, net of the new electric running cost.
    Gas,
    /// Gas daily supply charge avoided by disconnecting.
    GasSupply,
    /// Fuel saved by driving electric.
    Ev,
    /// Pool heat pump versus gas pool heating.
    Pool,
}

impl fmt::Display for BenefitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Electricity => "Electricity savings",
            Self::Vpp => "VPP income",
            Self::Gas => "Gas appliance savings",
            Self::GasSupply => "Gas supply charge avoided",
            Self::Ev => "EV fuel savings",
            Self::Pool => "Pool heating savings",
        };
        f.write_str(label)
    }
}

pub type InvestmentMap = BTreeMap<Technology, f64>;
pub type BenefitMap = BTreeMap<BenefitStream, f64>;

/// Payback summary (dollars, years). No inflation at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackResult {
    pub total_investment: f64,
    pub total_rebates: f64,
    /// `total_investment − total_rebates`.
    pub net_investment: f64,
    pub total_annual_benefit: f64,
    /// `net_investment / total_annual_benefit`, one decimal. `None` when the
    /// annual benefit is not positive and the investment is never recovered.
    pub payback_years: Option<f64>,
    /// `total_annual_benefit × 10 − net_investment`.
    pub ten_year_savings: f64,
    /// `total_annual_benefit × 25 − net_investment`.
    pub twenty_five_year_savings: f64,
}

/// Aggregates investment, rebate and benefit maps into a payback summary.
pub fn calculate_payback(
    investment: &InvestmentMap,
    rebates: &InvestmentMap,
    benefits: &BenefitMap,
) -> PaybackResult {
    let total_investment: f64 = investment.values().sum();
    let total_rebates: f64 = rebates.values().sum();
    let net_investment = total_investment - total_rebates;
    let total_annual_benefit: f64 = benefits.values().sum();

    let payback_years = if total_annual_benefit > 0.0 {
        Some(round_to((net_investment / total_annual_benefit).max(0.0), 1))
    } else {
        None
    };

    PaybackResult {
        total_investment,
        total_rebates,
        net_investment,
        total_annual_benefit,
        payback_years,
        ten_year_savings: total_annual_benefit * 10.0 - net_investment,
        twenty_five_year_savings: total_annual_benefit * 25.0 - net_investment,
    }
}
