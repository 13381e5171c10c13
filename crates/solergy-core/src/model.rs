// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! The end-to-end model run: sizing, allocation, production, aggregation,
//! operating costs.

use crate::distribution::{
    AggregatedProduction, DistributionEntry, DrillDown, aggregate_region, distribute, drill_downs,
};
use crate::error::ModelResult;
use crate::opex;
use crate::production::pv::{PvParams, pv_production};
use crate::production::thermal::{ThermalParams, thermal_production};
use crate::reconcile::reconcile_pv_catalogue;
use crate::selection::select_sub_regions;
use crate::sizing::{self, Sizing, SizingInput};
use crate::traits::SolarResource;
use solergy_types::catalogue::{Catalogue, Technology};
use solergy_types::config::Payload;
use std::sync::Arc;
use tracing::info;

/// Per-technology knobs of one run.
#[derive(Debug, Clone, Copy)]
pub struct TechnologyConfig {
    pub sizing: SizingInput,
    /// Unit system cost in EUR per W
    pub system_cost_eur_per_w: f64,
    /// Installed power per unit area in W/m2
    pub land_use_w_per_m2: f64,
    /// Minimum annual GHI tier (kWh/m2) a sub-region must reach
    pub min_threshold: f64,
    /// Annual operating cost in EUR per installed kW
    pub opex_eur_per_kw: f64,
}

/// Fully resolved configuration of one model run. Payload percentages are
/// converted to fractions here, once.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub region_id: String,
    pub thermal: TechnologyConfig,
    pub pv: TechnologyConfig,
    pub efficiency_thermal: f64,
    pub efficiency_optical: f64,
    /// Solar-field aperture as a fraction of the thermal land area
    pub aperture_fraction: f64,
    pub tilt: f64,
    pub azimuth: f64,
    pub tracking_fraction: f64,
    /// PV system losses in percent, passed through to the resource service
    pub loss_pct: f64,
    pub convert_coord: bool,
    pub year: i32,
}

impl ModelConfig {
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            region_id: payload.nutsid.clone(),
            thermal: TechnologyConfig {
                sizing: SizingInput {
                    area_m2: payload.area_total_thermal,
                    power_mw: payload.power_thermal,
                    capex_eur: payload.capex_thermal,
                },
                system_cost_eur_per_w: payload.system_cost_thermal,
                land_use_w_per_m2: payload.land_use_thermal,
                min_threshold: payload.min_ghi_thermal,
                opex_eur_per_kw: payload.opex_thermal,
            },
            pv: TechnologyConfig {
                sizing: SizingInput {
                    area_m2: payload.area_total_pv,
                    power_mw: payload.power_pv,
                    capex_eur: payload.capex_pv,
                },
                system_cost_eur_per_w: payload.system_cost_pv,
                land_use_w_per_m2: payload.land_use_pv,
                min_threshold: payload.min_ghi_pv,
                opex_eur_per_kw: payload.opex_pv,
            },
            efficiency_thermal: payload.efficiency_thermal / 100.0,
            efficiency_optical: payload.efficiency_optical / 100.0,
            aperture_fraction: payload.aperture / 100.0,
            tilt: payload.tilt,
            azimuth: payload.azimuth,
            tracking_fraction: payload.tracking_percentage / 100.0,
            loss_pct: payload.loss,
            convert_coord: payload.convert_coord,
            year: payload.pvgis_year,
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    /// Region name derived from the catalogues during selection
    pub region: String,
    pub thermal_sizing: Sizing,
    pub pv_sizing: Sizing,
    pub aggregated: AggregatedProduction,
    pub drill_downs: Vec<DrillDown>,
    /// Per-sub-region capacity/area entries, thermal entries first
    pub distributions: Vec<DistributionEntry>,
    pub opex_thermal_eur: f64,
    pub opex_pv_eur: f64,
}

/// Run the full pipeline over the two catalogues.
///
/// The catalogues are independent copies even when sourced from the same
/// dataset: thermal consumption is subtracted from the PV copy before PV
/// selection, never the other way round.
pub async fn run_model(
    config: &ModelConfig,
    resource: Arc<dyn SolarResource>,
    thermal_catalogue: &Catalogue,
    pv_catalogue: &Catalogue,
) -> ModelResult<ModelOutput> {
    let thermal_sizing = sizing::resolve(
        config.thermal.sizing,
        config.thermal.system_cost_eur_per_w,
        config.thermal.land_use_w_per_m2,
    );
    let pv_sizing = sizing::resolve(
        config.pv.sizing,
        config.pv.system_cost_eur_per_w,
        config.pv.land_use_w_per_m2,
    );
    info!(
        "sizing resolved for {}: thermal {:.2} MW over {:.0} m2, PV {:.2} MW over {:.0} m2",
        config.region_id,
        thermal_sizing.power_mw,
        thermal_sizing.area_m2,
        pv_sizing.power_mw,
        pv_sizing.area_m2
    );

    let thermal_allocation = select_sub_regions(
        thermal_catalogue,
        thermal_sizing.area_m2,
        config.thermal.min_threshold,
    );
    let thermal_productions = thermal_production(
        Arc::clone(&resource),
        &thermal_allocation,
        ThermalParams {
            land_use_w_per_m2: config.thermal.land_use_w_per_m2,
            efficiency: config.efficiency_thermal,
            optical_efficiency: config.efficiency_optical,
            aperture_area_m2: thermal_sizing.area_m2 * config.aperture_fraction,
            convert_coord: config.convert_coord,
            year: config.year,
        },
    )
    .await?;

    let reconciled = reconcile_pv_catalogue(pv_catalogue, &thermal_allocation);
    let pv_allocation =
        select_sub_regions(&reconciled, pv_sizing.area_m2, config.pv.min_threshold);
    let pv_productions = pv_production(
        Arc::clone(&resource),
        &pv_allocation,
        PvParams {
            land_use_w_per_m2: config.pv.land_use_w_per_m2,
            tilt: config.tilt,
            azimuth: config.azimuth,
            tracking_fraction: config.tracking_fraction,
            loss_pct: config.loss_pct,
            convert_coord: config.convert_coord,
            year: config.year,
        },
    )
    .await?;

    let region = if pv_allocation.parent_region.is_empty() {
        thermal_allocation.parent_region.clone()
    } else {
        pv_allocation.parent_region.clone()
    };

    let thermal_entries = distribute(&thermal_productions, Technology::Thermal);
    let pv_entries = distribute(&pv_productions, Technology::Pv);
    let aggregated = aggregate_region(&region, &thermal_entries, &pv_entries);
    let tables = drill_downs(&thermal_entries, &pv_entries);

    let mut distributions = thermal_entries;
    distributions.extend(pv_entries);
    let (opex_thermal_eur, opex_pv_eur) = opex::accumulate(
        &distributions,
        config.thermal.opex_eur_per_kw,
        config.pv.opex_eur_per_kw,
    );
    info!(
        "model run complete for {region}: {} sub-region tables, OPEX thermal {opex_thermal_eur:.0} EUR, PV {opex_pv_eur:.0} EUR",
        tables.len()
    );

    Ok(ModelOutput {
        region,
        thermal_sizing,
        pv_sizing,
        aggregated,
        drill_downs: tables,
        distributions,
        opex_thermal_eur,
        opex_pv_eur,
    })
}
