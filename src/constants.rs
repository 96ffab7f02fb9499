//! Engineering and financial constants shared by every calculator.
//!
//! Values that a sales team may want to tune live in
//! [`crate::config::EngineConfig`]; the numbers here are physical conversion
//! factors and fixed product assumptions.

/// Days in a year used for annualising billing-period figures.
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Days in a "month" for monthly projections.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Hours in a day.
pub const HOURS_PER_DAY: usize = 24;
/// Months in a year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Energy content of natural gas: kWh per MJ.
pub const GAS_MJ_TO_KWH: f64 = 0.2778;
/// Combustion emissions of natural gas (kg CO₂-e per MJ).
pub const GAS_CO2_KG_PER_MJ: f64 = 0.0514;
/// Average grid emissions intensity (kg CO₂-e per kWh).
pub const GRID_EMISSIONS_KG_PER_KWH: f64 = 0.79;
/// CO₂ absorbed by one mature tree in a year (kg).
pub const TREE_CO2_KG_PER_YEAR: f64 = 21.77;

/// Lowest realistic heat-pump coefficient of performance.
pub const HEAT_PUMP_COP_MIN: f64 = 3.0;
/// Highest realistic heat-pump coefficient of performance.
pub const HEAT_PUMP_COP_MAX: f64 = 5.0;
/// Reverse-cycle air conditioner COP in heating mode.
pub const REVERSE_CYCLE_COP: f64 = 4.0;

/// Share of daily usage a battery is sized to cover.
pub const BATTERY_USAGE_SHARE: f64 = 0.55;
/// Battery depth of discharge (fraction).
pub const DEPTH_OF_DISCHARGE: f64 = 0.90;
/// Battery round-trip efficiency (fraction).
pub const ROUND_TRIP_EFFICIENCY: f64 = 0.95;
/// Standard battery module size; recommendations snap up to a multiple of this.
pub const BATTERY_MODULE_KWH: f64 = 5.0;
/// Minimum battery capacity VPP programs accept.
pub const VPP_MIN_BATTERY_KWH: f64 = 10.0;
/// Fraction of nameplate capacity that is usable.
pub const USABLE_CAPACITY_FACTOR: f64 = 0.90;
/// Full cycles a battery performs per year.
pub const BATTERY_CYCLES_PER_YEAR: u32 = 365;
/// Expected battery service life.
pub const BATTERY_EXPECTED_LIFE_YEARS: u32 = 15;

/// Pool heat-pump sizing, kW per 1,000 L of pool volume.
pub const POOL_KW_PER_1000L_MIN: f64 = 0.5;
pub const POOL_KW_PER_1000L_AVG: f64 = 0.6;
pub const POOL_KW_PER_1000L_MAX: f64 = 0.7;

/// Share of household consumption that happens while the sun is up.
pub const DAYTIME_USAGE_FRACTION: f64 = 0.40;

/// Product warranties (years).
pub const SOLAR_WARRANTY_YEARS: u32 = 25;
pub const BATTERY_WARRANTY_YEARS: u32 = 10;
pub const INVERTER_WARRANTY_YEARS: u32 = 10;

/// Length of the long-term projection.
pub const PROJECTION_YEARS: u32 = 25;
