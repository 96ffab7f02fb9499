//! Usage and cost projection from one electricity bill.

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_MONTH, DAYS_PER_YEAR};
use crate::error::CalcError;
use crate::model::Bill;

/// Electricity usage and cost extrapolated from a billing period.
///
/// Values are unrounded; formatting is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageProjection {
    pub daily_average_kwh: f64,
    /// `daily_average_kwh × 30`.
    pub monthly_usage_kwh: f64,
    /// `daily_average_kwh × 365`.
    pub yearly_usage_kwh: f64,
    /// Average cost per day (dollars).
    pub daily_average_cost: f64,
    /// `daily_average_cost × 365` (dollars).
    pub projected_annual_cost: f64,
}

/// Projects daily, monthly and yearly usage and cost from an electricity bill.
///
/// # Errors
///
/// Returns a `CalcError` for a gas bill or a bill without a positive
/// billing-day count.
pub fn project_usage(bill: &Bill) -> Result<UsageProjection, CalcError> {
    let usage = bill.electricity_usage()?;
    let days = bill.billing_days()?;
    CalcError::require_non_negative("total_usage_kwh", usage.total_usage_kwh)?;

    let daily_average_kwh = usage.total_usage_kwh / days;
    let daily_average_cost = bill.total_amount / days;

    Ok(UsageProjection {
        daily_average_kwh,
        monthly_usage_kwh: daily_average_kwh * DAYS_PER_MONTH,
        yearly_usage_kwh: daily_average_kwh * DAYS_PER_YEAR,
        daily_average_cost,
        projected_annual_cost: daily_average_cost * DAYS_PER_YEAR,
    })
}
