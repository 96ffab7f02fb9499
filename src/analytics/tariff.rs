//! Time-of-use breakdown of an electricity bill.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::model::Bill;

/// Usage and cost split across tariff periods for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffAnalysis {
    /// Reconstructed as `total − off-peak − shoulder` when the bill omits it.
    pub peak_usage_kwh: f64,
    pub off_peak_usage_kwh: f64,
    pub shoulder_usage_kwh: f64,
    pub peak_rate_cents: f64,
    pub off_peak_rate_cents: f64,
    pub shoulder_rate_cents: f64,
    pub peak_cost: f64,
    pub off_peak_cost: f64,
    pub shoulder_cost: f64,
    pub supply_cost: f64,
    pub peak_cost_percent: f64,
    pub off_peak_cost_percent: f64,
    pub shoulder_cost_percent: f64,
    pub supply_cost_percent: f64,
    /// The bill carries off-peak or shoulder usage.
    pub is_time_of_use: bool,
}

/// Splits an electricity bill into peak, off-peak, shoulder and supply cost.
///
/// Missing tiers count as zero usage. A missing peak rate falls back to the
/// bill's average usage rate; missing off-peak or shoulder rates fall back
/// to the peak rate. The four cost percentages sum to 100 whenever the bill
/// has any cost at all.
///
/// # Errors
///
/// Returns a `CalcError` for a gas bill, an unusable billing period, or a
/// flat-rate bill with no usage to derive a rate from.
pub fn analyse_tariff(bill: &Bill) -> Result<TariffAnalysis, CalcError> {
    let usage = bill.electricity_usage()?;

    let off_peak_usage_kwh = usage.off_peak_usage_kwh.unwrap_or(0.0).max(0.0);
    let shoulder_usage_kwh = usage.shoulder_usage_kwh.unwrap_or(0.0).max(0.0);
    let peak_usage_kwh = match usage.peak_usage_kwh {
        Some(kwh) => kwh.max(0.0),
        None => (usage.total_usage_kwh - off_peak_usage_kwh - shoulder_usage_kwh).max(0.0),
    };

    let peak_rate_cents = bill.usage_rate_cents()?;
    let off_peak_rate_cents = usage.off_peak_rate_cents.unwrap_or(peak_rate_cents);
    let shoulder_rate_cents = usage.shoulder_rate_cents.unwrap_or(peak_rate_cents);

    let peak_cost = peak_usage_kwh * peak_rate_cents / 100.0;
    let off_peak_cost = off_peak_usage_kwh * off_peak_rate_cents / 100.0;
    let shoulder_cost = shoulder_usage_kwh * shoulder_rate_cents / 100.0;
    let supply_cost = bill.supply_cost()?;

    let total = peak_cost + off_peak_cost + shoulder_cost + supply_cost;
    let percent = |cost: f64| if total > 0.0 { cost / total * 100.0 } else { 0.0 };

    Ok(TariffAnalysis {
        peak_usage_kwh,
        off_peak_usage_kwh,
        shoulder_usage_kwh,
        peak_rate_cents,
        off_peak_rate_cents,
        shoulder_rate_cents,
        peak_cost,
        off_peak_cost,
        shoulder_cost,
        supply_cost,
        peak_cost_percent: percent(peak_cost),
        off_peak_cost_percent: percent(off_peak_cost),
        shoulder_cost_percent: percent(shoulder_cost),
        supply_cost_percent: percent(supply_cost),
        is_time_of_use: off_peak_usage_kwh > 0.0 || shoulder_usage_kwh > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::model::{BillUsage, ElectricityUsage, GasUsage};

    fn tou_bill() -> Bill {
        Bill::electricity(
            "AGL",
            90,
            620.0,
            110.0,
            ElectricityUsage {
                total_usage_kwh: 1800.0,
                peak_usage_kwh: Some(900.0),
                off_peak_usage_kwh: Some(600.0),
                shoulder_usage_kwh: Some(300.0),
                peak_rate_cents: Some(42.0),
                off_peak_rate_cents: Some(18.0),
                shoulder_rate_cents: Some(28.0),
                ..ElectricityUsage::default()
            },
        )
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let t = analyse_tariff(&tou_bill()).expect("valid bill");
        let sum = t.peak_cost_percent
            + t.off_peak_cost_percent
            + t.shoulder_cost_percent
            + t.supply_cost_percent;
        assert_abs_diff_eq!(sum, 100.0, epsilon = 1e-9);
        assert!(t.is_time_of_use);
    }

    #[test]
    fn tier_costs_follow_rates() {
        let t = analyse_tariff(&tou_bill()).expect("valid bill");
        assert_abs_diff_eq!(t.peak_cost, 378.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.off_peak_cost, 108.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.shoulder_cost, 84.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.supply_cost, 99.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_peak_usage_is_reconstructed() {
        let mut bill = tou_bill();
        if let BillUsage::Electricity(usage) = &mut bill.usage {
            usage.peak_usage_kwh = None;
        }
        let t = analyse_tariff(&bill).expect("valid bill");
        assert_abs_diff_eq!(t.peak_usage_kwh, 900.0, epsilon = 1e-9);
    }

    #[test]
    fn flat_rate_bill_is_all_peak() {
        let bill = Bill::electricity(
            "Red Energy",
            90,
            540.0,
            100.0,
            ElectricityUsage {
                total_usage_kwh: 1800.0,
                ..ElectricityUsage::default()
            },
        );
        let t = analyse_tariff(&bill).expect("valid bill");
        assert!(!t.is_time_of_use);
        assert_eq!(t.off_peak_cost_percent, 0.0);
        assert_eq!(t.shoulder_cost_percent, 0.0);
        // (540 − 90) / 1800 kWh = 25 c/kWh
        assert_abs_diff_eq!(t.peak_rate_cents, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            t.peak_cost_percent + t.supply_cost_percent,
            100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn gas_bill_is_rejected() {
        let gas = Bill::gas(
            "AGL",
            90,
            300.0,
            80.0,
            GasUsage {
                gas_usage_mj: 4500.0,
                gas_rate_cents_mj: 3.5,
            },
        );
        assert!(analyse_tariff(&gas).is_err());
    }
}
