use std::fmt;

use serde::{Deserialize, Serialize};

use super::customer::State;

/// A Virtual Power Plant program offered by a retailer.
///
/// Catalog data: the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VppProvider {
    pub name: String,
    pub program_name: String,
    /// Credit paid per day of enrolment (dollars).
    #[serde(default)]
    pub daily_credit: f64,
    /// Payment per dispatch event (dollars).
    #[serde(default)]
    pub event_payment: f64,
    #[serde(default)]
    pub estimated_events_per_year: u32,
    /// Annual discount for bundling the program with the retailer's plan (dollars).
    #[serde(default)]
    pub bundle_discount: f64,
    #[serde(default)]
    pub has_gas_bundle: bool,
    #[serde(default)]
    pub available_states: Vec<State>,
    /// Smallest battery the program accepts (kWh).
    pub min_battery_size_kwh: Option<f64>,
}

impl VppProvider {
    pub fn is_available_in(&self, state: State) -> bool {
        self.available_states.contains(&state)
    }

    /// Whether a battery of `battery_kwh` meets the program's minimum size.
    pub fn accepts_battery(&self, battery_kwh: f64) -> bool {
        self.min_battery_size_kwh.is_none_or(|min| battery_kwh >= min)
    }
}

/// Product category that attracts an investment line and possibly a rebate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technology {
    Solar,
    Battery,
    HotWaterHeatPump,
    ReverseCycleAc,
    Induction,
    PoolHeatPump,
    EvCharger,
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Solar => "Solar PV",
            Self::Battery => "Battery",
            Self::HotWaterHeatPump => "Heat pump hot water",
            Self::ReverseCycleAc => "Reverse-cycle AC",
            Self::Induction => "Induction cooktop",
            Self::PoolHeatPump => "Pool heat pump",
            Self::EvCharger => "EV charger",
        };
        f.write_str(label)
    }
}

/// How a rebate amount scales with system size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebateKind {
    /// Fixed amount regardless of size.
    #[default]
    Flat,
    /// Amount per kW of rated power.
    PerKw,
    /// Amount per kWh of storage capacity.
    PerKwh,
}

/// A government rebate for one technology in one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRebate {
    pub state: State,
    pub technology: Technology,
    #[serde(default)]
    pub name: String,
    /// Rebate amount in dollars (per unit for sized kinds).
    pub amount: f64,
    #[serde(default)]
    pub kind: RebateKind,
    /// Cap on the rebate value (dollars).
    pub max_amount: Option<f64>,
}

impl StateRebate {
    pub fn flat(state: State, technology: Technology, amount: f64) -> Self {
        Self {
            state,
            technology,
            name: String::new(),
            amount,
            kind: RebateKind::Flat,
            max_amount: None,
        }
    }

    /// Rebate value (dollars) for a system of `size` kW or kWh.
    pub fn value_for(&self, size: f64) -> f64 {
        let raw = match self.kind {
            RebateKind::Flat => self.amount,
            RebateKind::PerKw | RebateKind::PerKwh => self.amount * size,
        };
        let raw = raw.max(0.0);
        self.max_amount.map_or(raw, |cap| raw.min(cap))
    }
}
