// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Photovoltaic production model.
//!
//! Each sub-region is simulated twice, once with single-axis tracking and
//! once with a fixed mount; the final series blends the two by the payload's
//! tracking fraction.

use crate::error::{ModelError, ModelResult};
use crate::production::{SubRegionProduction, installed_capacity_kw, resolve_coordinates};
use crate::selection::Allocation;
use crate::traits::SolarResource;
use solergy_pvgis::{PvProductionRequest, TrackingMode};
use solergy_types::catalogue::Technology;
use solergy_types::series::HourlySeries;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct PvParams {
    pub land_use_w_per_m2: f64,
    /// Module tilt in degrees from horizontal.
    pub tilt: f64,
    /// Module azimuth in degrees, 0 north / 180 south.
    pub azimuth: f64,
    /// Share of the installed capacity on single-axis trackers (fraction).
    pub tracking_fraction: f64,
    /// System losses in percent, as the simulation service expects them.
    pub loss_pct: f64,
    pub convert_coord: bool,
    pub year: i32,
}

/// Compute the blended hourly photovoltaic production for every selected
/// sub-region.
///
/// The peak power sent to the simulation service is the sub-region's full
/// installed capacity in kW; the returned watt series are rescaled to MW.
pub async fn pv_production(
    resource: Arc<dyn SolarResource>,
    allocation: &Allocation,
    params: PvParams,
) -> ModelResult<Vec<SubRegionProduction>> {
    info!(
        "computing PV production for {} sub-regions via {}",
        allocation.rows.len(),
        resource.name()
    );

    let mut handles = Vec::with_capacity(allocation.rows.len());
    for row in allocation.rows.iter().cloned() {
        let resource = Arc::clone(&resource);
        handles.push(tokio::spawn(async move {
            let (lon, lat) = resolve_coordinates(&row, params.convert_coord, false);
            let peak_power_kw = row.area_m2 * params.land_use_w_per_m2 / 1.0e3;

            let mut request = PvProductionRequest {
                latitude: lat,
                longitude: lon,
                year: params.year,
                tilt: params.tilt,
                azimuth: params.azimuth,
                tracking: TrackingMode::SingleAxis,
                loss_pct: params.loss_pct,
                peak_power_kw,
            };
            let tracked = resource.fetch_hourly_production(&request).await?;
            request.tracking = TrackingMode::Fixed;
            let fixed = resource.fetch_hourly_production(&request).await?;

            // W -> MW before blending.
            let series = HourlySeries::blend(
                &tracked.scaled(1.0 / 1.0e6),
                &fixed.scaled(1.0 / 1.0e6),
                params.tracking_fraction,
            );
            Ok::<_, anyhow::Error>(SubRegionProduction {
                power_installed_kw: installed_capacity_kw(row.area_m2, params.land_use_w_per_m2),
                series,
                sub_region: row,
            })
        }));
    }

    let mut productions = Vec::with_capacity(handles.len());
    for handle in handles {
        let production = handle.await?.map_err(|source| ModelError::Resource {
            technology: Technology::Pv,
            source,
        })?;
        productions.push(production);
    }
    Ok(productions)
}
