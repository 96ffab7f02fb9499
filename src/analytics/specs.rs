//! Equipment summary shown on the proposal.

use serde::{Deserialize, Serialize};

use crate::config::SpecsConfig;
use crate::constants::{
    BATTERY_WARRANTY_YEARS, INVERTER_WARRANTY_YEARS, SOLAR_WARRANTY_YEARS, USABLE_CAPACITY_FACTOR,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSpec {
    pub system_kw: f64,
    pub panel_count: u32,
    pub panel_brand: String,
    pub warranty_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterySpec {
    pub capacity_kwh: f64,
    /// `capacity_kwh × 0.9`.
    pub usable_kwh: f64,
    pub brand: String,
    pub warranty_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterSpec {
    pub brand: String,
    pub warranty_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSpecs {
    pub solar: SolarSpec,
    pub battery: BatterySpec,
    pub inverter: InverterSpec,
}

pub fn system_specs(
    solar_kw: f64,
    panel_count: u32,
    battery_kwh: f64,
    cfg: &SpecsConfig,
) -> SystemSpecs {
    SystemSpecs {
        solar: SolarSpec {
            system_kw: solar_kw,
            panel_count,
            panel_brand: cfg.panel_brand.clone(),
            warranty_years: SOLAR_WARRANTY_YEARS,
        },
        battery: BatterySpec {
            capacity_kwh: battery_kwh,
            usable_kwh: battery_kwh * USABLE_CAPACITY_FACTOR,
            brand: cfg.battery_brand.clone(),
            warranty_years: BATTERY_WARRANTY_YEARS,
        },
        inverter: InverterSpec {
            brand: cfg.inverter_brand.clone(),
            warranty_years: INVERTER_WARRANTY_YEARS,
        },
    }
}
