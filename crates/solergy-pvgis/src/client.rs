// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! PVGIS REST API client.
//!
//! Two endpoints are used: `tmy` for the typical meteorological year (thermal
//! model input) and `seriescalc` with `pvcalculation=1` for ready-made hourly
//! PV production. Any transport or API error is fatal to the run; there is no
//! retry, matching the batch-process failure policy.

use crate::error::{PvgisError, PvgisResult};
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use solergy_types::series::{HourlySeries, MeteoSeries};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://re.jrc.ec.europa.eu/api/v5_2";

/// PVGIS rejects seriescalc requests above this peak power (kW). Larger
/// plants are queried at power/1e3 and the returned series scaled back up.
pub const PEAK_POWER_LIMIT_KW: f64 = 1.0e8;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RAD_DATABASE: &str = "PVGIS-SARAH3";
/// Timestamp format used by both endpoints, e.g. "20190101:0010"
const TIME_FORMAT: &str = "%Y%m%d:%H%M";

/// Mounting/tracking mode for the seriescalc endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// Fixed mounting (trackingtype 0)
    Fixed,
    /// Single horizontal axis, north-south (trackingtype 1)
    SingleAxis,
}

impl TrackingMode {
    fn api_value(self) -> u8 {
        match self {
            Self::Fixed => 0,
            Self::SingleAxis => 1,
        }
    }
}

/// Parameters of one hourly-production query.
#[derive(Debug, Clone, Copy)]
pub struct PvProductionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub year: i32,
    /// Tilt angle in degrees from horizontal
    pub tilt: f64,
    /// Azimuth in degrees, clockwise from north (180 = south)
    pub azimuth: f64,
    pub tracking: TrackingMode,
    /// System losses in %
    pub loss_pct: f64,
    pub peak_power_kw: f64,
}

/// PVGIS REST API client with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct PvgisClient {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct TmyResponse {
    outputs: TmyOutputs,
}

#[derive(Deserialize)]
struct TmyOutputs {
    tmy_hourly: Vec<TmyRecord>,
}

#[derive(Deserialize)]
struct TmyRecord {
    #[serde(rename = "time(UTC)")]
    time: String,
    #[serde(rename = "T2m")]
    temperature: f64,
    #[serde(rename = "Gb(n)")]
    dni: f64,
}

#[derive(Deserialize)]
struct SeriesResponse {
    outputs: SeriesOutputs,
}

#[derive(Deserialize)]
struct SeriesOutputs {
    hourly: Vec<SeriesRecord>,
}

#[derive(Deserialize)]
struct SeriesRecord {
    time: String,
    /// PV system power (W)
    #[serde(rename = "P")]
    power_w: f64,
}

impl PvgisClient {
    pub fn new() -> PvgisResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom endpoint (tests point this at a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> PvgisResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Fetch the typical meteorological year for a location: hourly DNI and
    /// ambient temperature.
    pub async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> PvgisResult<MeteoSeries> {
        let url = format!("{}/tmy", self.base_url);
        debug!("querying PVGIS TMY for lat={latitude}, lon={longitude}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("outputformat", "json".to_owned()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PvgisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TmyResponse = response
            .json()
            .await
            .map_err(|e| PvgisError::Decode(e.to_string()))?;

        let mut series = MeteoSeries::default();
        for record in parsed.outputs.tmy_hourly {
            series.timestamps.push(parse_time(&record.time)?);
            series.dni.push(record.dni);
            series.temperature.push(record.temperature);
        }
        info!(
            "PVGIS TMY: {} hourly records for lat={latitude:.4}, lon={longitude:.4}",
            series.len()
        );
        Ok(series)
    }

    /// Fetch one year of hourly PV production (W) for the given system.
    ///
    /// Requests above [`PEAK_POWER_LIMIT_KW`] are issued at a thousandth of
    /// the peak power and the returned series multiplied back by 1e3, which
    /// is numerically equivalent because the endpoint scales production
    /// linearly with peak power.
    pub async fn fetch_hourly_production(
        &self,
        request: &PvProductionRequest,
    ) -> PvgisResult<HourlySeries> {
        let (peak_power_kw, factor) = if request.peak_power_kw > PEAK_POWER_LIMIT_KW {
            (request.peak_power_kw / 1.0e3, 1.0e3)
        } else {
            (request.peak_power_kw, 1.0)
        };
        // PVGIS measures aspect from south; the payload azimuth is clockwise
        // from north.
        let aspect = request.azimuth - 180.0;

        let url = format!("{}/seriescalc", self.base_url);
        debug!(
            "querying PVGIS seriescalc for lat={}, lon={}, peakpower={peak_power_kw} kW",
            request.latitude, request.longitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", request.latitude.to_string()),
                ("lon", request.longitude.to_string()),
                ("startyear", request.year.to_string()),
                ("endyear", request.year.to_string()),
                ("raddatabase", RAD_DATABASE.to_owned()),
                ("pvcalculation", "1".to_owned()),
                ("peakpower", peak_power_kw.to_string()),
                ("loss", request.loss_pct.to_string()),
                ("trackingtype", request.tracking.api_value().to_string()),
                ("angle", request.tilt.to_string()),
                ("aspect", aspect.to_string()),
                ("components", "0".to_owned()),
                ("outputformat", "json".to_owned()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PvgisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SeriesResponse = response
            .json()
            .await
            .map_err(|e| PvgisError::Decode(e.to_string()))?;

        let mut series = HourlySeries::default();
        for record in parsed.outputs.hourly {
            series.timestamps.push(parse_time(&record.time)?);
            series.values.push(record.power_w * factor);
        }
        info!(
            "PVGIS seriescalc: {} hourly records for lat={:.4}, lon={:.4}",
            series.len(),
            request.latitude,
            request.longitude
        );
        Ok(series)
    }
}

fn parse_time(raw: &str) -> PvgisResult<chrono::DateTime<chrono::Utc>> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| PvgisError::Timestamp(raw.to_owned()))
}
