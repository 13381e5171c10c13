// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Concentrated-solar-thermal production model.

use crate::error::{ModelError, ModelResult};
use crate::production::{SubRegionProduction, installed_capacity_kw, resolve_coordinates};
use crate::selection::Allocation;
use crate::traits::SolarResource;
use solergy_types::catalogue::Technology;
use solergy_types::series::HourlySeries;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct ThermalParams {
    pub land_use_w_per_m2: f64,
    /// Collector thermal efficiency (fraction)
    pub efficiency: f64,
    /// Optical efficiency (fraction)
    pub optical_efficiency: f64,
    /// Aperture area of the whole solar field (m2): aperture fraction times
    /// the total thermal area. The same field-level aperture feeds every
    /// selected sub-region's series.
    pub aperture_area_m2: f64,
    pub convert_coord: bool,
    pub year: i32,
}

/// Hourly collector output in MWh from DNI (W/m2).
fn collector_output(dni: &[f64], params: &ThermalParams) -> Vec<f64> {
    dni.iter()
        .map(|irradiance| {
            irradiance * params.aperture_area_m2 * params.efficiency * params.optical_efficiency
                / 1.0e6
        })
        .collect()
}

/// Compute the hourly thermal production for every selected sub-region.
///
/// One fetch task is spawned per sub-region; results are gathered in
/// selection order. Any failed fetch aborts the whole run.
pub async fn thermal_production(
    resource: Arc<dyn SolarResource>,
    allocation: &Allocation,
    params: ThermalParams,
) -> ModelResult<Vec<SubRegionProduction>> {
    info!(
        "computing thermal production for {} sub-regions via {}",
        allocation.rows.len(),
        resource.name()
    );

    let mut handles = Vec::with_capacity(allocation.rows.len());
    for row in allocation.rows.iter().cloned() {
        let resource = Arc::clone(&resource);
        handles.push(tokio::spawn(async move {
            let (lon, lat) = resolve_coordinates(&row, params.convert_coord, true);
            let meteo = resource.fetch_tmy(lat, lon).await?;
            let meteo = meteo.restamped_to_year(params.year)?;
            let values = collector_output(&meteo.dni, &params);
            Ok::<_, anyhow::Error>(SubRegionProduction {
                power_installed_kw: installed_capacity_kw(row.area_m2, params.land_use_w_per_m2),
                series: HourlySeries::new(meteo.timestamps, values),
                sub_region: row,
            })
        }));
    }

    let mut productions = Vec::with_capacity(handles.len());
    for handle in handles {
        let production = handle.await?.map_err(|source| ModelError::Resource {
            technology: Technology::Thermal,
            source,
        })?;
        productions.push(production);
    }
    Ok(productions)
}
