//! The aggregate result handed to slide and document renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analytics::{
    BatteryCycle, DailyLoadProfile, GenerationProfile, GridIndependence, ProjectionYear,
    SystemSpecs, TariffAnalysis,
};
use crate::calc::{
    BatteryRecommendation, BenefitMap, Co2Reduction, CookingSavings, EvSavings, GasAnalysis,
    HeatingSavings, HotWaterSavings, InvestmentMap, PaybackResult, PoolHeatPump,
    SolarRecommendation, UsageProjection, VppComparisonItem, VppIncome,
};

/// Everything calculated for one proposal.
///
/// Monetary fields are dollars unless the name ends in `_cents`. Energy
/// fields carry their unit in the name (`_kwh`, `_mj`, `_kw`). Sections that
/// do not apply to the household are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalCalculations {
    pub customer_name: String,

    pub usage: UsageProjection,
    pub gas: Option<GasAnalysis>,
    pub hot_water: Option<HotWaterSavings>,
    pub heating: Option<HeatingSavings>,
    pub cooking: Option<CookingSavings>,
    pub pool: Option<PoolHeatPump>,
    pub ev: Option<EvSavings>,

    /// Income from the best eligible VPP program.
    pub vpp: Option<VppIncome>,
    pub vpp_provider_comparison: Vec<VppComparisonItem>,

    pub battery: BatteryRecommendation,
    pub solar: SolarRecommendation,

    pub investment: InvestmentMap,
    pub rebates: InvestmentMap,
    pub annual_benefits: BenefitMap,
    pub payback: PaybackResult,
    pub co2: Co2Reduction,

    pub tariff: TariffAnalysis,
    pub load_profile: DailyLoadProfile,
    pub generation_profile: GenerationProfile,
    pub battery_cycle: BatteryCycle,
    pub grid_independence: GridIndependence,
    pub projection: Vec<ProjectionYear>,
    pub system_specs: SystemSpecs,

    pub total_annual_savings: f64,
    pub payback_years: Option<f64>,
    pub recommended_battery_kwh: f64,
    pub recommended_solar_kw: f64,
    pub net_investment: f64,
    /// Every gas appliance is replaced, so the gas connection can go.
    pub gas_eliminated: bool,
}

impl ProposalCalculations {
    /// Serializes the proposal as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ProposalCalculations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Proposal: {} ---", self.customer_name)?;
        writeln!(
            f,
            "Usage:                 {:.1} kWh/day, {:.0} kWh/year (${:.0}/year)",
            self.usage.daily_average_kwh, self.usage.yearly_usage_kwh, self.usage.projected_annual_cost
        )?;
        if let Some(gas) = &self.gas {
            writeln!(
                f,
                "Gas:                   {:.0} MJ/year (${:.0}/year)",
                gas.annual_usage_mj, gas.annual_gas_cost
            )?;
        }
        writeln!(
            f,
            "Solar:                 {:.2} kW ({} panels, {:.0} kWh/year)",
            self.solar.recommended_kw, self.solar.panel_count, self.solar.annual_generation_kwh
        )?;
        writeln!(
            f,
            "Battery:               {:.0} kWh ({:.1} kWh usable)",
            self.battery.recommended_kwh, self.battery.usable_kwh
        )?;
        if let Some(vpp) = &self.vpp {
            writeln!(
                f,
                "VPP:                   {} {} (${:.0}/year)",
                vpp.provider, vpp.program_name, vpp.total_annual_value
            )?;
        }

        writeln!(f, "Annual benefits:")?;
        for (stream, value) in &self.annual_benefits {
            writeln!(f, "  {:<21}${value:.0}", format!("{stream}:"))?;
        }

        writeln!(f, "Investment:            ${:.0}", self.payback.total_investment)?;
        writeln!(f, "Rebates:               ${:.0}", self.payback.total_rebates)?;
        writeln!(f, "Net investment:        ${:.0}", self.net_investment)?;
        writeln!(f, "Total annual savings:  ${:.0}", self.total_annual_savings)?;
        match self.payback_years {
            Some(years) => writeln!(f, "Payback:               {years:.1} years")?,
            None => writeln!(f, "Payback:               not recovered")?,
        }
        writeln!(
            f,
            "Self-sufficiency:      {:.1}%",
            self.grid_independence.self_sufficiency_percent
        )?;
        writeln!(
            f,
            "CO2:                   {:.2} t -> {:.2} t ({:.1}% reduction)",
            self.co2.current_co2_tonnes, self.co2.projected_co2_tonnes, self.co2.reduction_percent
        )?;
        if let Some(last) = self.projection.last() {
            writeln!(
                f,
                "{}-year savings:       ${:.0}",
                last.year, last.cumulative_saving
            )?;
        }
        write!(
            f,
            "Gas eliminated:        {}",
            if self.gas_eliminated { "yes" } else { "no" }
        )
    }
}
