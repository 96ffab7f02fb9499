use std::fmt;

use serde::{Deserialize, Serialize};

/// Australian state or territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

impl State {
    pub const ALL: [Self; 8] = [
        Self::Nsw,
        Self::Vic,
        Self::Qld,
        Self::Sa,
        Self::Wa,
        Self::Tas,
        Self::Nt,
        Self::Act,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Nsw => "NSW",
            Self::Vic => "VIC",
            Self::Qld => "QLD",
            Self::Sa => "SA",
            Self::Wa => "WA",
            Self::Tas => "TAS",
            Self::Nt => "NT",
            Self::Act => "ACT",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Gas appliance category recognised in a customer's free-text list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasAppliance {
    HotWater,
    Heating,
    Cooking,
    /// Pool or spa heater; replaced by a pool heat pump, not by space heating.
    PoolHeater,
    Other,
}

impl GasAppliance {
    /// Classifies a free-text appliance description by keyword.
    ///
    /// Hot water and pool heaters are matched before space heating so that
    /// "gas water heater" and "gas pool heater" are not taken for it.
    pub fn classify(description: &str) -> Self {
        let text = description.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));
        let has_word = |word: &str| {
            text.split(|c: char| !c.is_alphanumeric())
                .any(|w| w == word)
        };

        if has(&["hot water", "water heater", "hws", "boiler"]) {
            Self::HotWater
        } else if has(&["pool"]) || has_word("spa") {
            Self::PoolHeater
        } else if has(&["heat", "ducted", "fireplace", "furnace", "log fire"]) {
            Self::Heating
        } else if has(&["cook", "stove", "oven", "hob", "range"]) {
            Self::Cooking
        } else {
            Self::Other
        }
    }
}

/// Household profile supplied by the proposal workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    pub state: State,
    #[serde(default)]
    pub has_gas: bool,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub has_ev: bool,
    #[serde(default)]
    pub has_existing_solar: bool,
    /// Pool volume (litres).
    pub pool_volume_litres: Option<f64>,
    /// Size of an already-installed solar system (kW).
    pub existing_solar_kw: Option<f64>,
    /// Customer is considering an EV purchase.
    #[serde(default)]
    pub ev_interest: bool,
    #[serde(default)]
    pub gas_appliances: Vec<String>,
    pub notes: Option<String>,
}

impl Customer {
    pub fn new(name: &str, state: State) -> Self {
        Self {
            name: name.to_string(),
            state,
            has_gas: false,
            has_pool: false,
            has_ev: false,
            has_existing_solar: false,
            pool_volume_litres: None,
            existing_solar_kw: None,
            ev_interest: false,
            gas_appliances: Vec::new(),
            notes: None,
        }
    }

    /// Distinct appliance categories in `gas_appliances`, sorted.
    pub fn gas_appliance_kinds(&self) -> Vec<GasAppliance> {
        let mut kinds: Vec<GasAppliance> = self
            .gas_appliances
            .iter()
            .map(|a| GasAppliance::classify(a))
            .collect();
        kinds.sort_unstable();
        kinds.dedup();
        kinds
    }

    /// Whether EV costs belong in the proposal (owned now or being considered).
    pub fn wants_ev(&self) -> bool {
        self.has_ev || self.ev_interest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_recognises_common_descriptions() {
        assert_eq!(GasAppliance::classify("Gas hot water system"), GasAppliance::HotWater);
        assert_eq!(GasAppliance::classify("Rinnai water heater"), GasAppliance::HotWater);
        assert_eq!(GasAppliance::classify("Ducted heating"), GasAppliance::Heating);
        assert_eq!(GasAppliance::classify("Gas cooktop"), GasAppliance::Cooking);
        assert_eq!(GasAppliance::classify("Oven"), GasAppliance::Cooking);
        assert_eq!(GasAppliance::classify("BBQ"), GasAppliance::Other);
        assert_eq!(GasAppliance::classify("Gas pool heater"), GasAppliance::PoolHeater);
        assert_eq!(GasAppliance::classify("Spa heater"), GasAppliance::PoolHeater);
        assert_eq!(GasAppliance::classify("Gas space heater"), GasAppliance::Heating);
    }

    #[test]
    fn appliance_kinds_are_deduplicated() {
        let mut customer = Customer::new("Test", State::Vic);
        customer.gas_appliances = vec![
            "Cooktop".to_string(),
            "Hot water".to_string(),
            "Oven".to_string(),
        ];
        assert_eq!(
            customer.gas_appliance_kinds(),
            vec![GasAppliance::HotWater, GasAppliance::Cooking]
        );
    }

    #[test]
    fn state_serializes_uppercase() {
        let json = serde_json::to_string(&State::Nsw).ok();
        assert_eq!(json.as_deref(), Some("\"NSW\""));
        let parsed: Result<State, _> = serde_json::from_str("\"ACT\"");
        assert_eq!(parsed.ok(), Some(State::Act));
    }
}
