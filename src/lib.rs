//! Calculation engine for residential solar, battery and electrification proposals.

/// Extended analytics: tariff, load and generation profiles, projections.
pub mod analytics;
/// Per-domain calculators.
pub mod calc;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod io;
/// Bills, customers, VPP providers and rebates.
pub mod model;
pub mod proposal;
pub mod request;

pub use config::EngineConfig;
pub use engine::generate_full_calculations;
pub use error::CalcError;
pub use proposal::ProposalCalculations;
pub use request::CalculationRequest;
