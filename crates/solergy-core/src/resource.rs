// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::traits::SolarResource;
use anyhow::Result;
use async_trait::async_trait;
use solergy_pvgis::{PvProductionRequest, PvgisClient};
use solergy_types::series::{HourlySeries, MeteoSeries};

#[async_trait]
impl SolarResource for PvgisClient {
    async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> Result<MeteoSeries> {
        PvgisClient::fetch_tmy(self, latitude, longitude)
            .await
            .map_err(anyhow::Error::from)
    }

    async fn fetch_hourly_production(
        &self,
        request: &PvProductionRequest,
    ) -> Result<HourlySeries> {
        PvgisClient::fetch_hourly_production(self, request)
            .await
            .map_err(anyhow::Error::from)
    }

    fn name(&self) -> &str {
        "PVGIS"
    }
}
