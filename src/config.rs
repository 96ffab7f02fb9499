//! TOML-based engine assumptions and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BATTERY_MODULE_KWH, BATTERY_USAGE_SHARE, DEPTH_OF_DISCHARGE, HEAT_PUMP_COP_MAX,
    HEAT_PUMP_COP_MIN, REVERSE_CYCLE_COP, ROUND_TRIP_EFFICIENCY, VPP_MIN_BATTERY_KWH,
};

/// Every default assumption the calculators use.
///
/// All fields have defaults matching the standard sales assumptions. Load
/// from TOML with [`EngineConfig::from_toml_file`] or use
/// [`EngineConfig::standard`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Driving and fuel assumptions for EV savings.
    #[serde(default)]
    pub ev: EvConfig,
    /// Battery sizing parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Solar sizing and yield parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Gas appliance shares and efficiencies.
    #[serde(default)]
    pub appliances: ApplianceConfig,
    /// Fallback tariff values for bills that omit them.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Installed cost of each technology.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Long-term projection parameters.
    #[serde(default)]
    pub finance: FinanceConfig,
    /// Product names used in the system specification.
    #[serde(default)]
    pub specs: SpecsConfig,
}

/// Driving and fuel assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvConfig {
    /// Annual driving distance (km).
    pub annual_km: f64,
    /// EV consumption (kWh per 100 km).
    pub ev_kwh_per_100km: f64,
    /// Petrol car consumption (L per 100 km).
    pub petrol_litres_per_100km: f64,
    /// Petrol price (dollars per litre).
    pub petrol_price_per_litre: f64,
}

impl Default for EvConfig {
    fn default() -> Self {
        Self {
            annual_km: 10_000.0,
            ev_kwh_per_100km: 15.0,
            petrol_litres_per_100km: 8.0,
            petrol_price_per_litre: 2.00,
        }
    }
}

impl EvConfig {
    /// Energy the EV draws in a year (kWh).
    pub fn annual_kwh(&self) -> f64 {
        self.annual_km / 100.0 * self.ev_kwh_per_100km
    }
}

/// Battery sizing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Share of daily usage the battery should cover (0.0-1.0).
    pub usage_share: f64,
    /// Depth of discharge (0.0-1.0).
    pub depth_of_discharge: f64,
    /// Round-trip efficiency (0.0-1.0).
    pub round_trip_efficiency: f64,
    /// Module size recommendations snap up to (kWh).
    pub module_kwh: f64,
    /// Minimum capacity when joining a VPP (kWh).
    pub vpp_min_kwh: f64,
    /// Extra capacity added for EV owners before snapping (kWh).
    pub ev_addition_kwh: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            usage_share: BATTERY_USAGE_SHARE,
            depth_of_discharge: DEPTH_OF_DISCHARGE,
            round_trip_efficiency: ROUND_TRIP_EFFICIENCY,
            module_kwh: BATTERY_MODULE_KWH,
            vpp_min_kwh: VPP_MIN_BATTERY_KWH,
            ev_addition_kwh: 5.0,
        }
    }
}

/// Solar sizing and yield parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Rated power of one panel (kW).
    pub panel_kw: f64,
    /// Average daily peak sun hours.
    pub peak_sun_hours: f64,
    /// System losses factor: inverter, wiring, soiling, temperature (0.0-1.0).
    pub system_efficiency: f64,
    /// Target generation as a multiple of annual usage (must be > 1).
    pub coverage_factor: f64,
    /// Annual panel output degradation (fraction per year).
    pub degradation_rate: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            panel_kw: 0.44,
            peak_sun_hours: 4.0,
            system_efficiency: 0.80,
            coverage_factor: 1.1,
            degradation_rate: 0.005,
        }
    }
}

impl SolarConfig {
    /// Annual generation of a 1 kW array (kWh).
    pub fn annual_yield_per_kw(&self) -> f64 {
        self.peak_sun_hours * crate::constants::DAYS_PER_YEAR * self.system_efficiency
    }
}

/// Gas appliance shares of household gas use and conversion efficiencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplianceConfig {
    /// Share of household gas used for hot water.
    pub hot_water_share: f64,
    /// Gas storage/instantaneous heater efficiency.
    pub hot_water_gas_efficiency: f64,
    /// Heat-pump hot water COP (3.0-5.0).
    pub hot_water_cop: f64,
    /// Share of household gas used for space heating.
    pub heating_share: f64,
    /// Ducted gas heater efficiency.
    pub heating_gas_efficiency: f64,
    /// Reverse-cycle AC COP in heating mode.
    pub heating_cop: f64,
    /// Share of household gas used for cooking.
    pub cooking_share: f64,
    /// Gas cooktop efficiency (heat reaching the pan).
    pub cooktop_gas_efficiency: f64,
    /// Induction cooktop efficiency.
    pub induction_efficiency: f64,
    /// Hours a pool heater runs per year.
    pub pool_heating_hours: f64,
    /// Pool heat-pump COP.
    pub pool_cop: f64,
    /// Gas pool heater efficiency.
    pub pool_gas_heater_efficiency: f64,
    /// Pool filter pump energy per day (kWh).
    pub pool_pump_daily_kwh: f64,
    /// Gas rate assumed when the customer has no gas bill (cents/MJ).
    pub default_gas_rate_cents_mj: f64,
}

impl Default for ApplianceConfig {
    fn default() -> Self {
        Self {
            hot_water_share: 0.40,
            hot_water_gas_efficiency: 0.80,
            hot_water_cop: 4.0,
            heating_share: 0.45,
            heating_gas_efficiency: 0.75,
            heating_cop: REVERSE_CYCLE_COP,
            cooking_share: 0.05,
            cooktop_gas_efficiency: 0.40,
            induction_efficiency: 0.85,
            pool_heating_hours: 600.0,
            pool_cop: 5.0,
            pool_gas_heater_efficiency: 0.80,
            pool_pump_daily_kwh: 5.0,
            default_gas_rate_cents_mj: 3.5,
        }
    }
}

/// Tariff fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Feed-in tariff when the bill does not state one (cents/kWh).
    pub default_feed_in_cents: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            default_feed_in_cents: 5.0,
        }
    }
}

/// Installed cost of each technology (dollars, before rebates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    pub solar_per_kw: f64,
    pub battery_per_kwh: f64,
    pub hot_water_heat_pump: f64,
    pub reverse_cycle_ac: f64,
    pub induction_cooktop: f64,
    pub pool_heat_pump_per_kw: f64,
    pub ev_charger: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            solar_per_kw: 1_100.0,
            battery_per_kwh: 900.0,
            hot_water_heat_pump: 3_800.0,
            reverse_cycle_ac: 9_500.0,
            induction_cooktop: 2_400.0,
            pool_heat_pump_per_kw: 250.0,
            ev_charger: 1_800.0,
        }
    }
}

/// Long-term projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Annual energy price escalation (fraction per year).
    pub energy_price_escalation: f64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            energy_price_escalation: 0.035,
        }
    }
}

/// Product names shown in the system specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecsConfig {
    pub panel_brand: String,
    pub inverter_brand: String,
    pub battery_brand: String,
}

impl Default for SpecsConfig {
    fn default() -> Self {
        Self {
            panel_brand: "Jinko Tiger Neo".to_string(),
            inverter_brand: "Sigenergy".to_string(),
            battery_brand: "Sigenergy SigenStor".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.depth_of_discharge"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl EngineConfig {
    /// Returns the standard sales assumptions.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Returns the conservative preset: lower yield, slower price growth,
    /// cheaper petrol. Produces longer paybacks for cautious customers.
    pub fn conservative() -> Self {
        Self {
            ev: EvConfig {
                annual_km: 8_000.0,
                petrol_price_per_litre: 1.80,
                ..EvConfig::default()
            },
            solar: SolarConfig {
                peak_sun_hours: 3.6,
                system_efficiency: 0.75,
                degradation_rate: 0.007,
                ..SolarConfig::default()
            },
            appliances: ApplianceConfig {
                hot_water_cop: 3.0,
                ..ApplianceConfig::default()
            },
            finance: FinanceConfig {
                energy_price_escalation: 0.02,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["standard", "conservative"];

    /// Loads assumptions from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "standard" => Ok(Self::standard()),
            "conservative" => Ok(Self::conservative()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses assumptions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses assumptions from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut positive = |field: &str, value: f64| {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError::new(field, "must be > 0"));
            }
        };

        let ev = &self.ev;
        positive("ev.annual_km", ev.annual_km);
        positive("ev.ev_kwh_per_100km", ev.ev_kwh_per_100km);
        positive("ev.petrol_litres_per_100km", ev.petrol_litres_per_100km);
        positive("ev.petrol_price_per_litre", ev.petrol_price_per_litre);

        let bat = &self.battery;
        positive("battery.module_kwh", bat.module_kwh);
        positive("battery.usage_share", bat.usage_share);

        let sol = &self.solar;
        positive("solar.panel_kw", sol.panel_kw);
        positive("solar.peak_sun_hours", sol.peak_sun_hours);

        let app = &self.appliances;
        positive("appliances.pool_heating_hours", app.pool_heating_hours);
        positive("appliances.pool_cop", app.pool_cop);
        positive("appliances.default_gas_rate_cents_mj", app.default_gas_rate_cents_mj);

        let fractions = [
            ("battery.usage_share", bat.usage_share),
            ("battery.depth_of_discharge", bat.depth_of_discharge),
            ("battery.round_trip_efficiency", bat.round_trip_efficiency),
            ("solar.system_efficiency", sol.system_efficiency),
            ("appliances.hot_water_gas_efficiency", app.hot_water_gas_efficiency),
            ("appliances.heating_gas_efficiency", app.heating_gas_efficiency),
            ("appliances.cooktop_gas_efficiency", app.cooktop_gas_efficiency),
            ("appliances.induction_efficiency", app.induction_efficiency),
            ("appliances.pool_gas_heater_efficiency", app.pool_gas_heater_efficiency),
        ];
        for (field, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(ConfigError::new(field, "must be in (0.0, 1.0]"));
            }
        }

        if bat.vpp_min_kwh < 0.0 || bat.ev_addition_kwh < 0.0 {
            errors.push(ConfigError::new(
                "battery.vpp_min_kwh",
                "battery.vpp_min_kwh and battery.ev_addition_kwh must be >= 0",
            ));
        }

        if sol.coverage_factor <= 1.0 {
            errors.push(ConfigError::new(
                "solar.coverage_factor",
                "must be > 1.0 so generation exceeds usage",
            ));
        }
        if !(0.0..0.05).contains(&sol.degradation_rate) {
            errors.push(ConfigError::new(
                "solar.degradation_rate",
                "must be in [0.0, 0.05)",
            ));
        }

        if !(HEAT_PUMP_COP_MIN..=HEAT_PUMP_COP_MAX).contains(&app.hot_water_cop) {
            errors.push(ConfigError::new(
                "appliances.hot_water_cop",
                format!("must be in [{HEAT_PUMP_COP_MIN}, {HEAT_PUMP_COP_MAX}]"),
            ));
        }
        if app.heating_cop < 1.0 {
            errors.push(ConfigError::new("appliances.heating_cop", "must be >= 1.0"));
        }

        let shares = app.hot_water_share + app.heating_share + app.cooking_share;
        if [app.hot_water_share, app.heating_share, app.cooking_share]
            .iter()
            .any(|s| *s < 0.0)
            || shares > 1.0
        {
            errors.push(ConfigError::new(
                "appliances.hot_water_share",
                format!("appliance gas shares must be >= 0 and sum to <= 1.0, got {shares:.2}"),
            ));
        }

        if self.tariff.default_feed_in_cents < 0.0 {
            errors.push(ConfigError::new("tariff.default_feed_in_cents", "must be >= 0"));
        }

        let p = &self.pricing;
        let prices = [
            p.solar_per_kw,
            p.battery_per_kwh,
            p.hot_water_heat_pump,
            p.reverse_cycle_ac,
            p.induction_cooktop,
            p.pool_heat_pump_per_kw,
            p.ev_charger,
        ];
        if prices.iter().any(|v| *v < 0.0) {
            errors.push(ConfigError::new("pricing", "prices must be >= 0"));
        }

        if !(-0.1..=0.2).contains(&self.finance.energy_price_escalation) {
            errors.push(ConfigError::new(
                "finance.energy_price_escalation",
                "must be in [-0.1, 0.2]",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_preset_valid() {
        let cfg = EngineConfig::standard();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "standard should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = EngineConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in EngineConfig::PRESETS {
            let cfg = EngineConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn conservative_has_lower_yield() {
        let base = EngineConfig::standard();
        let cons = EngineConfig::conservative();
        assert!(cons.solar.annual_yield_per_kw() < base.solar.annual_yield_per_kw());
        assert!(cons.finance.energy_price_escalation < base.finance.energy_price_escalation);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[ev]
petrol_price_per_litre = 2.25
"#;
        let cfg = EngineConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.ev.petrol_price_per_litre), Some(2.25));
        assert_eq!(cfg.as_ref().map(|c| c.ev.annual_km), Some(10_000.0));
        assert_eq!(cfg.as_ref().map(|c| c.solar.panel_kw), Some(0.44));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
module_kwh = 5.0
bogus_field = true
"#;
        assert!(EngineConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_cop_out_of_range() {
        let mut cfg = EngineConfig::standard();
        cfg.appliances.hot_water_cop = 6.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances.hot_water_cop"));
    }

    #[test]
    fn validation_catches_gas_shares_over_one() {
        let mut cfg = EngineConfig::standard();
        cfg.appliances.heating_share = 0.9;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances.hot_water_share"));
    }

    #[test]
    fn validation_catches_coverage_factor_below_one() {
        let mut cfg = EngineConfig::standard();
        cfg.solar.coverage_factor = 0.9;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "solar.coverage_factor"));
    }

    #[test]
    fn validation_catches_zero_efficiency() {
        let mut cfg = EngineConfig::standard();
        cfg.battery.round_trip_efficiency = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.round_trip_efficiency"));
    }

    #[test]
    fn ev_annual_kwh_from_defaults() {
        assert_eq!(EvConfig::default().annual_kwh(), 1_500.0);
    }
}
