//! Typical 24-hour household load.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::{DAYS_PER_YEAR, HOURS_PER_DAY};
use crate::error::CalcError;

/// Relative household demand per hour: low overnight, a morning bump and
/// an evening peak. Normalised before use.
const HOURLY_SHAPE: [f64; HOURS_PER_DAY] = [
    0.025, 0.022, 0.020, 0.020, 0.021, 0.026, // 00–05
    0.038, 0.050, 0.047, 0.040, 0.036, 0.035, // 06–11
    0.036, 0.035, 0.036, 0.040, 0.048, 0.062, // 12–17
    0.072, 0.072, 0.064, 0.054, 0.042, 0.031, // 18–23
];

/// Overnight charging window for an EV.
pub const EV_CHARGING_HOURS: RangeInclusive<usize> = 0..=5;
/// Midday window the pool pump runs in, on solar.
pub const POOL_PUMP_HOURS: RangeInclusive<usize> = 10..=14;
/// Daylight window shown alongside the profile.
pub const SOLAR_GENERATION_HOURS: &str = "7am - 5pm";

/// Estimated consumption for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyLoad {
    /// Hour of day, 0–23.
    pub hour: usize,
    pub consumption_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoadProfile {
    /// Always 24 entries.
    pub hourly_estimate: Vec<HourlyLoad>,
    pub daily_total_kwh: f64,
    /// Hour with the highest estimated consumption.
    pub peak_hour: usize,
    pub ev_daily_kwh: f64,
    pub pool_daily_kwh: f64,
    pub solar_generation_hours: String,
}

impl DailyLoadProfile {
    /// Sum of consumption over an inclusive hour range.
    pub fn consumption_between(&self, hours: RangeInclusive<usize>) -> f64 {
        self.hourly_estimate
            .iter()
            .filter(|h| hours.contains(&h.hour))
            .map(|h| h.consumption_kwh)
            .sum()
    }
}

/// Spreads daily usage over a typical household shape, then layers EV
/// charging overnight and pool pumping at midday.
///
/// # Arguments
///
/// * `daily_usage_kwh` - Average daily usage from the electricity bill
/// * `has_ev` - Adds the EV's daily charging energy over [`EV_CHARGING_HOURS`]
/// * `has_pool` - Adds the pool pump's daily energy over [`POOL_PUMP_HOURS`]
/// * `cfg` - Source of EV energy use and pool pump consumption
///
/// # Errors
///
/// Returns a `CalcError` if `daily_usage_kwh` is negative.
pub fn daily_load_profile(
    daily_usage_kwh: f64,
    has_ev: bool,
    has_pool: bool,
    cfg: &EngineConfig,
) -> Result<DailyLoadProfile, CalcError> {
    CalcError::require_non_negative("daily_usage_kwh", daily_usage_kwh)?;

    let shape_total: f64 = HOURLY_SHAPE.iter().sum();
    let mut hourly: Vec<f64> = HOURLY_SHAPE
        .iter()
        .map(|w| daily_usage_kwh * w / shape_total)
        .collect();

    let ev_daily_kwh = if has_ev {
        cfg.ev.annual_kwh() / DAYS_PER_YEAR
    } else {
        0.0
    };
    let pool_daily_kwh = if has_pool {
        cfg.appliances.pool_pump_daily_kwh
    } else {
        0.0
    };
    spread(&mut hourly, EV_CHARGING_HOURS, ev_daily_kwh);
    spread(&mut hourly, POOL_PUMP_HOURS, pool_daily_kwh);

    let peak_hour = hourly
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(hour, _)| hour);

    Ok(DailyLoadProfile {
        daily_total_kwh: hourly.iter().sum(),
        hourly_estimate: hourly
            .into_iter()
            .enumerate()
            .map(|(hour, consumption_kwh)| HourlyLoad {
                hour,
                consumption_kwh,
            })
            .collect(),
        peak_hour,
        ev_daily_kwh,
        pool_daily_kwh,
        solar_generation_hours: SOLAR_GENERATION_HOURS.to_string(),
    })
}

fn spread(hourly: &mut [f64], hours: RangeInclusive<usize>, kwh: f64) {
    let n = hours.clone().count() as f64;
    for hour in hours {
        hourly[hour] += kwh / n;
    }
}
