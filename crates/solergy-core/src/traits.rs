// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::Result;
use async_trait::async_trait;
use solergy_pvgis::PvProductionRequest;
use solergy_types::series::{HourlySeries, MeteoSeries};

/// Generic source of solar resource data.
///
/// The production models use this trait and never know about PVGIS details,
/// so tests can substitute synthetic weather.
#[async_trait]
pub trait SolarResource: Send + Sync {
    /// Hourly typical-meteorological-year series (DNI, ambient temperature)
    /// for a geodetic location.
    async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> Result<MeteoSeries>;

    /// Hourly PV production series (W) for a concrete system.
    async fn fetch_hourly_production(&self, request: &PvProductionRequest)
    -> Result<HourlySeries>;

    /// Data source name for logging
    fn name(&self) -> &str;
}
