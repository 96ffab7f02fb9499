//! Extended analytics feeding the proposal charts.

pub mod battery_cycle;
pub mod generation;
/// Annual grid import/export balance.
pub mod grid;
pub mod load_profile;
/// Long-horizon savings.
pub mod projection;
pub mod specs;
/// Bill breakdown by tariff period.
pub mod tariff;

pub use battery_cycle::{BatteryCycle, CycleActivity, HourlySoc, battery_cycle};
pub use generation::{GenerationProfile, MonthlyGeneration, solar_generation_profile};
pub use grid::{GridIndependence, grid_independence};
pub use load_profile::{DailyLoadProfile, HourlyLoad, daily_load_profile};
pub use projection::{ProjectionYear, break_even_year, project_savings};
pub use specs::{SystemSpecs, system_specs};
pub use tariff::{TariffAnalysis, analyse_tariff};
