//! Input records supplied by the proposal workflow.

/// Electricity and gas bill records.
pub mod bill;
/// Household profile and gas appliance classification.
pub mod customer;
/// VPP program catalog and state rebate tables.
pub mod provider;

pub use bill::{Bill, BillType, BillUsage, ElectricityUsage, GasUsage};
pub use customer::{Customer, GasAppliance, State};
pub use provider::{RebateKind, StateRebate, Technology, VppProvider};
