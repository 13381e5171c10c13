// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use serde::{Deserialize, Deserializer, Serialize};

/// Keeps "key absent" (outer `None`) apart from an explicit JSON `null`
/// (`Some(None)`). The sizing-triple keys must be present even when null.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

/// Process payload exactly as it arrives on disk. Every field is optional so
/// the validator, not the deserializer, decides what is missing, defaulted or
/// fatal. See [`crate::validator::validate_payload`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPayload {
    /// NUTS2 region to analyse (e.g. "ES41")
    pub nutsid: Option<String>,
    pub slope_angle: Option<f64>,

    // Sizing triples: each key must be present, and exactly one per group is
    // expected non-null
    #[serde(deserialize_with = "explicit_null")]
    pub area_total_thermal: Option<Option<f64>>,
    #[serde(deserialize_with = "explicit_null")]
    pub power_thermal: Option<Option<f64>>,
    #[serde(deserialize_with = "explicit_null")]
    pub capex_thermal: Option<Option<f64>>,
    #[serde(deserialize_with = "explicit_null")]
    pub area_total_pv: Option<Option<f64>>,
    #[serde(deserialize_with = "explicit_null")]
    pub power_pv: Option<Option<f64>>,
    #[serde(deserialize_with = "explicit_null")]
    pub capex_pv: Option<Option<f64>>,

    /// Unit system cost in EUR per W
    pub system_cost_thermal: Option<f64>,
    pub system_cost_pv: Option<f64>,
    /// PV system losses in %
    pub loss: Option<f64>,
    /// CSP collector thermal efficiency in %
    pub efficiency_thermal: Option<f64>,
    /// CSP optical efficiency in %
    pub efficiency_optical: Option<f64>,
    /// Solar-field aperture area in % of the land area
    pub aperture: Option<f64>,
    /// Fixed-plane tilt angle in degrees from horizontal
    pub tilt: Option<f64>,
    /// Fixed-plane azimuth in degrees, clockwise from north
    pub azimuth: Option<f64>,
    /// Share of single-axis tracking PV capacity in %
    pub tracking_percentage: Option<f64>,
    pub opex_thermal: Option<f64>,
    pub opex_pv: Option<f64>,
    /// Minimum annual GHI (kWh/m2) to install CSP
    pub min_ghi_thermal: Option<f64>,
    /// Minimum annual GHI (kWh/m2) to install PV
    pub min_ghi_pv: Option<f64>,
    /// Land use ratio of CSP in W/m2
    pub land_use_thermal: Option<f64>,
    /// Land use ratio of PV in W/m2
    pub land_use_pv: Option<f64>,
    /// 1 to reproject catalogue coordinates from EPSG:3035 to EPSG:4326
    pub convert_coord: Option<f64>,
    /// Reference year for the hourly production time series
    pub pvgis_year: Option<i64>,
}

/// Validated process payload. Percentages are kept in their payload units;
/// the model configuration scales them to fractions.
#[derive(Debug, Clone, Serialize)]
pub struct Payload {
    pub nutsid: String,
    pub slope_angle: f64,
    pub area_total_thermal: Option<f64>,
    pub power_thermal: Option<f64>,
    pub capex_thermal: Option<f64>,
    pub area_total_pv: Option<f64>,
    pub power_pv: Option<f64>,
    pub capex_pv: Option<f64>,
    pub system_cost_thermal: f64,
    pub system_cost_pv: f64,
    pub loss: f64,
    pub efficiency_thermal: f64,
    pub efficiency_optical: f64,
    pub aperture: f64,
    pub tilt: f64,
    pub azimuth: f64,
    pub tracking_percentage: f64,
    pub opex_thermal: f64,
    pub opex_pv: f64,
    pub min_ghi_thermal: f64,
    pub min_ghi_pv: f64,
    pub land_use_thermal: f64,
    pub land_use_pv: f64,
    pub convert_coord: bool,
    pub pvgis_year: i32,
}
