use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Utility the bill was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    Electricity,
    Gas,
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electricity => write!(f, "electricity"),
            Self::Gas => write!(f, "gas"),
        }
    }
}

/// Metered electricity usage and tariff rates for one billing period.
///
/// Time-of-use fields are optional because flat-rate plans only report a
/// total; a missing tier is treated as zero usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricityUsage {
    /// Total imported energy over the period (kWh).
    pub total_usage_kwh: f64,
    pub peak_usage_kwh: Option<f64>,
    pub off_peak_usage_kwh: Option<f64>,
    pub shoulder_usage_kwh: Option<f64>,
    /// Energy exported by an existing solar system (kWh).
    pub solar_exports_kwh: Option<f64>,
    /// Peak (or flat) usage rate (cents/kWh).
    pub peak_rate_cents: Option<f64>,
    pub off_peak_rate_cents: Option<f64>,
    pub shoulder_rate_cents: Option<f64>,
    /// Solar feed-in tariff (cents/kWh).
    pub feed_in_tariff_cents: Option<f64>,
}

/// Metered gas usage for one billing period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GasUsage {
    /// Gas consumed over the period (MJ).
    pub gas_usage_mj: f64,
    /// Usage rate (cents/MJ).
    pub gas_rate_cents_mj: f64,
}

/// Usage group of a bill, selected by the `bill_type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "bill_type", rename_all = "snake_case")]
pub enum BillUsage {
    Electricity(ElectricityUsage),
    Gas(GasUsage),
}

/// One billing-period record for electricity or gas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub retailer: String,
    pub billing_start: Option<NaiveDate>,
    pub billing_end: Option<NaiveDate>,
    /// Explicit billing-day count; derived from the window when absent.
    pub billing_days: Option<u32>,
    /// Total amount charged for the period (dollars).
    pub total_amount: f64,
    /// Fixed daily connection fee (cents/day).
    #[serde(default)]
    pub daily_supply_charge_cents: f64,
    #[serde(flatten)]
    pub usage: BillUsage,
}

impl Bill {
    /// Creates an electricity bill with an explicit billing-day count.
    pub fn electricity(
        retailer: &str,
        billing_days: u32,
        total_amount: f64,
        daily_supply_charge_cents: f64,
        usage: ElectricityUsage,
    ) -> Self {
        Self {
            retailer: retailer.to_string(),
            billing_start: None,
            billing_end: None,
            billing_days: Some(billing_days),
            total_amount,
            daily_supply_charge_cents,
            usage: BillUsage::Electricity(usage),
        }
    }

    /// Creates a gas bill with an explicit billing-day count.
    pub fn gas(
        retailer: &str,
        billing_days: u32,
        total_amount: f64,
        daily_supply_charge_cents: f64,
        usage: GasUsage,
    ) -> Self {
        Self {
            retailer: retailer.to_string(),
            billing_start: None,
            billing_end: None,
            billing_days: Some(billing_days),
            total_amount,
            daily_supply_charge_cents,
            usage: BillUsage::Gas(usage),
        }
    }

    pub fn bill_type(&self) -> BillType {
        match self.usage {
            BillUsage::Electricity(_) => BillType::Electricity,
            BillUsage::Gas(_) => BillType::Gas,
        }
    }

    /// Number of days the bill covers.
    ///
    /// Uses `billing_days` when present, otherwise counts the billing window
    /// inclusive of both ends.
    ///
    /// # Errors
    ///
    /// Returns a `CalcError` if the count is zero or cannot be determined.
    pub fn billing_days(&self) -> Result<f64, CalcError> {
        let days = match (self.billing_days, self.billing_start, self.billing_end) {
            (Some(days), _, _) => i64::from(days),
            (None, Some(start), Some(end)) => {
                if end < start {
                    return Err(CalcError::InvertedBillingWindow {
                        retailer: self.retailer.clone(),
                    });
                }
                (end - start).num_days() + 1
            }
            _ => {
                return Err(CalcError::MissingBillingDays {
                    retailer: self.retailer.clone(),
                });
            }
        };

        if days == 0 {
            return Err(CalcError::ZeroBillingDays {
                retailer: self.retailer.clone(),
            });
        }
        Ok(days as f64)
    }

    /// Electricity usage group, or an error for a gas bill.
    pub fn electricity_usage(&self) -> Result<&ElectricityUsage, CalcError> {
        match &self.usage {
            BillUsage::Electricity(usage) => Ok(usage),
            BillUsage::Gas(_) => Err(CalcError::WrongBillType {
                expected: BillType::Electricity,
                found: BillType::Gas,
            }),
        }
    }

    /// Gas usage group, or an error for an electricity bill.
    pub fn gas_usage(&self) -> Result<&GasUsage, CalcError> {
        match &self.usage {
            BillUsage::Gas(usage) => Ok(usage),
            BillUsage::Electricity(_) => Err(CalcError::WrongBillType {
                expected: BillType::Gas,
                found: BillType::Electricity,
            }),
        }
    }

    /// Supply charges over the billing period (dollars).
    pub fn supply_cost(&self) -> Result<f64, CalcError> {
        Ok(self.daily_supply_charge_cents * self.billing_days()? / 100.0)
    }

    /// Electricity usage rate used for appliance and EV running costs (cents/kWh).
    ///
    /// Prefers the bill's peak rate. Flat-rate bills without one fall back to
    /// the average usage rate: usage charges divided by kWh.
    pub fn usage_rate_cents(&self) -> Result<f64, CalcError> {
        let usage = self.electricity_usage()?;
        if let Some(rate) = usage.peak_rate_cents {
            return Ok(rate);
        }
        let kwh = CalcError::require_positive("total_usage_kwh", usage.total_usage_kwh)?;
        let usage_charges = (self.total_amount - self.supply_cost()?).max(0.0);
        Ok(usage_charges / kwh * 100.0)
    }
}
