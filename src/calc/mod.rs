//! Per-domain calculators. Each is a pure function over a narrow slice of input.

/// Gas-to-electric appliance comparisons.
pub mod appliances;
/// Emissions accounting.
pub mod co2;
/// EV running-cost comparison.
pub mod ev;
/// Gas bill analysis.
pub mod gas;
pub mod payback;
/// Battery and solar sizing heuristics.
pub mod sizing;
/// Electricity usage projection.
pub mod usage;
/// VPP income and provider ranking.
pub mod vpp;

pub use appliances::{
    CookingSavings, HeatingSavings, HotWaterSavings, PoolHeatPump, cooking_savings,
    heating_savings, hot_water_savings, pool_heat_pump,
};
pub use co2::{Co2Reduction, co2_reduction};
pub use ev::{EvSavings, ev_savings};
pub use gas::{GasAnalysis, analyse_gas};
pub use payback::{BenefitMap, BenefitStream, InvestmentMap, PaybackResult, calculate_payback};
pub use sizing::{BatteryRecommendation, SolarRecommendation, size_battery, size_solar};
pub use usage::{UsageProjection, project_usage};
pub use vpp::{StrategicFit, VppComparisonItem, VppIncome, compare_providers, vpp_income};
