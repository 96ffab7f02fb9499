//! Daily battery state-of-charge cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BATTERY_CYCLES_PER_YEAR, BATTERY_EXPECTED_LIFE_YEARS, DEPTH_OF_DISCHARGE, HOURS_PER_DAY,
    ROUND_TRIP_EFFICIENCY, USABLE_CAPACITY_FACTOR,
};
use crate::error::CalcError;

/// State of charge the evening discharge stops at (%).
const EVENING_FLOOR_SOC: f64 = 40.0;
/// State of charge at midnight (%).
const MIDNIGHT_SOC: f64 = 35.0;

/// What the battery is doing in a given hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleActivity {
    OvernightDischarge,
    /// Overnight discharge into the EV.
    EvCharging,
    Idle,
    SolarCharging,
    Full,
    EveningDischarge,
}

impl fmt::Display for CycleActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OvernightDischarge => "Overnight Discharge",
            Self::EvCharging => "EV Charging",
            Self::Idle => "Idle",
            Self::SolarCharging => "Solar Charging",
            Self::Full => "Full",
            Self::EveningDischarge => "Evening Discharge",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySoc {
    pub hour: usize,
    pub soc_percent: f64,
    pub activity: CycleActivity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryCycle {
    pub capacity_kwh: f64,
    pub usable_kwh: f64,
    /// Always 24 entries.
    pub hourly: Vec<HourlySoc>,
    pub cycles_per_year: u32,
    /// Product rating (90), independent of the sizing assumptions in config.
    pub depth_of_discharge_percent: f64,
    /// Product rating (95), independent of the sizing assumptions in config.
    pub round_trip_efficiency_percent: f64,
    pub expected_life_years: u32,
    /// Usable energy delivered per cycle after round-trip losses (kWh).
    pub daily_throughput_kwh: f64,
    pub lifetime_throughput_kwh: f64,
}

/// Builds the typical daily cycle: overnight discharge, idle morning, solar
/// charging to full by early afternoon, then the evening peak discharge.
///
/// EV households see the overnight hours labelled [`CycleActivity::EvCharging`].
/// The schedule and ratings use the fixed product constants.
///
/// # Errors
///
/// Returns a `CalcError` if `battery_kwh` is negative.
pub fn battery_cycle(battery_kwh: f64, has_ev: bool) -> Result<BatteryCycle, CalcError> {
    CalcError::require_non_negative("battery_kwh", battery_kwh)?;

    let min_soc = (1.0 - DEPTH_OF_DISCHARGE) * 100.0;
    let midnight = MIDNIGHT_SOC.max(min_soc);
    let evening_floor = EVENING_FLOOR_SOC.max(min_soc);

    let hourly = (0..HOURS_PER_DAY)
        .map(|hour| {
            let (soc_percent, activity) = match hour {
                0..=5 => {
                    let progress = (hour + 1) as f64 / 6.0;
                    let activity = if has_ev {
                        CycleActivity::EvCharging
                    } else {
                        CycleActivity::OvernightDischarge
                    };
                    (midnight - (midnight - min_soc) * progress, activity)
                }
                6..=8 => (min_soc, CycleActivity::Idle),
                9..=14 => {
                    let progress = (hour - 8) as f64 / 6.0;
                    (min_soc + (100.0 - min_soc) * progress, CycleActivity::SolarCharging)
                }
                15..=16 => (100.0, CycleActivity::Full),
                17..=22 => {
                    let progress = (hour - 16) as f64 / 6.0;
                    (
                        100.0 - (100.0 - evening_floor) * progress,
                        CycleActivity::EveningDischarge,
                    )
                }
                _ => (midnight, CycleActivity::OvernightDischarge),
            };
            HourlySoc {
                hour,
                soc_percent,
                activity,
            }
        })
        .collect();

    let usable_kwh = battery_kwh * USABLE_CAPACITY_FACTOR;
    let daily_throughput_kwh = usable_kwh * ROUND_TRIP_EFFICIENCY;

    Ok(BatteryCycle {
        capacity_kwh: battery_kwh,
        usable_kwh,
        hourly,
        cycles_per_year: BATTERY_CYCLES_PER_YEAR,
        depth_of_discharge_percent: DEPTH_OF_DISCHARGE * 100.0,
        round_trip_efficiency_percent: ROUND_TRIP_EFFICIENCY * 100.0,
        expected_life_years: BATTERY_EXPECTED_LIFE_YEARS,
        daily_throughput_kwh,
        lifetime_throughput_kwh: daily_throughput_kwh
            * f64::from(BATTERY_CYCLES_PER_YEAR)
            * f64::from(BATTERY_EXPECTED_LIFE_YEARS),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn fixed_assumptions() {
        let c = battery_cycle(15.0, false).expect("valid");
        assert_eq!(c.hourly.len(), 24);
        assert_eq!(c.cycles_per_year, 365);
        assert_abs_diff_eq!(c.depth_of_discharge_percent, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.round_trip_efficiency_percent, 95.0, epsilon = 1e-9);
        assert_eq!(c.expected_life_years, 15);
        assert_abs_diff_eq!(c.usable_kwh, 13.5, epsilon = 1e-9);
    }

    #[test]
    fn soc_stays_within_depth_of_discharge() {
        let c = battery_cycle(10.0, true).expect("valid");
        for h in &c.hourly {
            assert!(h.soc_percent >= 10.0 - 1e-9 && h.soc_percent <= 100.0 + 1e-9);
        }
        assert_abs_diff_eq!(c.hourly[14].soc_percent, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.hourly[5].soc_percent, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn ev_labels_overnight_hours() {
        let without = battery_cycle(15.0, false).expect("valid");
        let with = battery_cycle(15.0, true).expect("valid");

        let ev_hours = |c: &BatteryCycle| {
            c.hourly
                .iter()
                .filter(|h| h.activity == CycleActivity::EvCharging)
                .count()
        };
        assert_eq!(ev_hours(&without), 0);
        assert_eq!(ev_hours(&with), 6);
        assert_eq!(CycleActivity::EvCharging.to_string(), "EV Charging");
    }
}
