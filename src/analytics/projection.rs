//! 25-year savings projection.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::PROJECTION_YEARS;
use crate::error::CalcError;

/// One year of the projection (dollars).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// 1-based.
    pub year: u32,
    /// What the household would pay for energy with no system.
    pub cost_without_system: f64,
    pub annual_saving: f64,
    /// Savings to date minus the net investment.
    pub cumulative_saving: f64,
}

/// Projects savings over [`PROJECTION_YEARS`] years.
///
/// Energy prices escalate by `finance.energy_price_escalation` per year,
/// which raises both the baseline cost and the value of each kWh saved.
/// Panel output, and with it the saving, degrades by
/// `solar.degradation_rate` per year.
///
/// # Arguments
///
/// * `annual_savings` - First-year total benefit
/// * `annual_cost` - First-year energy cost without the system
/// * `net_investment` - Up-front cost after rebates
/// * `cfg` - Escalation and degradation rates
///
/// # Errors
///
/// Returns a `CalcError` if `annual_cost` or `net_investment` is negative.
pub fn project_savings(
    annual_savings: f64,
    annual_cost: f64,
    net_investment: f64,
    cfg: &EngineConfig,
) -> Result<Vec<ProjectionYear>, CalcError> {
    CalcError::require_non_negative("annual_cost", annual_cost)?;
    CalcError::require_non_negative("net_investment", net_investment)?;

    let escalation = 1.0 + cfg.finance.energy_price_escalation;
    let retention = 1.0 - cfg.solar.degradation_rate;

    let mut cumulative = -net_investment;
    let rows = (1..=PROJECTION_YEARS)
        .map(|year| {
            let elapsed = (year - 1) as i32;
            let price_factor = escalation.powi(elapsed);
            let annual_saving = annual_savings * price_factor * retention.powi(elapsed);
            cumulative += annual_saving;
            ProjectionYear {
                year,
                cost_without_system: annual_cost * price_factor,
                annual_saving,
                cumulative_saving: cumulative,
            }
        })
        .collect();
    Ok(rows)
}

/// First year whose cumulative saving is no longer negative.
pub fn break_even_year(rows: &[ProjectionYear]) -> Option<u32> {
    rows.iter()
        .find(|r| r.cumulative_saving >= 0.0)
        .map(|r| r.year)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn twenty_five_sequential_years() {
        let rows = project_savings(2500.0, 3200.0, 16_000.0, &EngineConfig::default())
            .expect("valid");
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0].year, 1);
        assert_eq!(rows[24].year, 25);
        assert!(rows.windows(2).all(|w| w[1].year == w[0].year + 1));
    }

    #[test]
    fn investment_recovered_within_horizon() {
        let rows = project_savings(2500.0, 3200.0, 16_000.0, &EngineConfig::default())
            .expect("valid");
        assert!(rows[0].cumulative_saving < 0.0);
        assert!(rows[24].cumulative_saving > 0.0);
        assert_abs_diff_eq!(rows[0].cumulative_saving, 2500.0 - 16_000.0, epsilon = 1e-9);
    }

    #[test]
    fn savings_escalate_net_of_degradation() {
        let cfg = EngineConfig::default();
        let rows = project_savings(1000.0, 2000.0, 0.0, &cfg).expect("valid");
        let factor = (1.0 + cfg.finance.energy_price_escalation) * (1.0 - cfg.solar.degradation_rate);
        assert_abs_diff_eq!(rows[1].annual_saving, 1000.0 * factor, epsilon = 1e-9);
        assert!(rows[24].cost_without_system > rows[0].cost_without_system);
    }

    #[test]
    fn break_even_matches_cumulative_sign() {
        let rows = project_savings(2500.0, 3200.0, 16_000.0, &EngineConfig::default())
            .expect("valid");
        let year = break_even_year(&rows).expect("recovers");
        assert!(rows[(year - 1) as usize].cumulative_saving >= 0.0);
        assert!(rows[(year - 2) as usize].cumulative_saving < 0.0);
    }

    #[test]
    fn no_savings_never_breaks_even() {
        let rows = project_savings(0.0, 3200.0, 10_000.0, &EngineConfig::default())
            .expect("valid");
        assert_eq!(break_even_year(&rows), None);
    }
}
