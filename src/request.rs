//! Calculation input bundle and its file formats.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Bill, Customer, StateRebate, VppProvider};

/// Failure to load a [`CalculationRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read request `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML request: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported request format `{}` (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Already-loaded records for one proposal.
///
/// `providers` and `rebates` may list every state's entries; the engine
/// keeps only those for the customer's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculationRequest {
    pub customer: Customer,
    pub electricity_bill: Bill,
    pub gas_bill: Option<Bill>,
    #[serde(default)]
    pub providers: Vec<VppProvider>,
    #[serde(default)]
    pub rebates: Vec<StateRebate>,
}

impl CalculationRequest {
    pub fn new(customer: Customer, electricity_bill: Bill) -> Self {
        Self {
            customer,
            electricity_bill,
            gas_bill: None,
            providers: Vec::new(),
            rebates: Vec::new(),
        }
    }

    /// Loads a request from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` if the file cannot be read, its extension is
    /// not recognised, or its content does not parse.
    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            fs::read_to_string(path).map_err(|source| RequestError::Read {
                path: path.to_path_buf(),
                source,
            })
        };

        match format.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(RequestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parses a request from TOML. Bill dates must be quoted ISO strings.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError::Toml` if the TOML is invalid.
    pub fn from_toml_str(s: &str) -> Result<Self, RequestError> {
        Ok(toml::from_str(s)?)
    }

    /// Parses a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError::Json` if the JSON is invalid.
    pub fn from_json_str(s: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BillType, State, Technology};

    const TOML_REQUEST: &str = r#"
[customer]
name = "Nguyen"
state = "VIC"
has_gas = true
gas_appliances = ["Gas hot water", "Ducted heating"]

[electricity_bill]
retailer = "AGL"
bill_type = "electricity"
billing_start = "2024-01-01"
billing_end = "2024-03-30"
total_amount = 620.0
daily_supply_charge_cents = 110.0
total_usage_kwh = 1800.0
peak_rate_cents = 38.0

[gas_bill]
retailer = "AGL"
bill_type = "gas"
billing_days = 90
total_amount = 310.0
daily_supply_charge_cents = 80.0
gas_usage_mj = 4500.0
gas_rate_cents_mj = 3.8

[[providers]]
name = "Amber"
program_name = "SmartShift"
daily_credit = 0.5
event_payment = 5.0
estimated_events_per_year = 20
bundle_discount = 0.0
has_gas_bundle = false
available_states = ["VIC", "NSW"]

[[rebates]]
state = "VIC"
technology = "solar"
name = "Solar Homes"
amount = 1400.0
"#;

    #[test]
    fn parses_toml_request() {
        let req = CalculationRequest::from_toml_str(TOML_REQUEST).expect("valid TOML");
        assert_eq!(req.customer.state, State::Vic);
        assert_eq!(req.electricity_bill.bill_type(), BillType::Electricity);
        assert_eq!(req.electricity_bill.billing_days(), Ok(90.0));
        let gas = req.gas_bill.as_ref().expect("gas bill");
        assert_eq!(gas.bill_type(), BillType::Gas);
        assert_eq!(req.providers.len(), 1);
        assert_eq!(req.rebates[0].technology, Technology::Solar);
    }

    #[test]
    fn json_matches_toml() {
        let req = CalculationRequest::from_toml_str(TOML_REQUEST).expect("valid TOML");
        let json = serde_json::to_string(&req).expect("serializes");
        let back = CalculationRequest::from_json_str(&json).expect("valid JSON");
        assert_eq!(back, req);
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        let bad = format!("extra = 1\n{TOML_REQUEST}");
        assert!(matches!(
            CalculationRequest::from_toml_str(&bad),
            Err(RequestError::Toml(_))
        ));
    }

    #[test]
    fn unsupported_extension_rejected() {
        let err = CalculationRequest::from_path(Path::new("request.yaml")).unwrap_err();
        assert!(matches!(err, RequestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CalculationRequest::from_path(Path::new("no/such/request.toml")).unwrap_err();
        assert!(err.to_string().contains("no/such/request.toml"));
    }
}
