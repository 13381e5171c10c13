// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Payload validation.
//!
//! Most numeric fields have a documented valid range and a default that is
//! substituted (with a warning) when the supplied value falls outside it.
//! Only `nutsid`, `convert_coord` and `pvgis_year` fail hard, together with
//! any missing field.

use crate::config::{Payload, RawPayload};
use thiserror::Error;
use tracing::warn;

/// Regions the solar preprocess has been run for.
pub const SUPPORTED_REGIONS: &[&str] = &["ES41"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("the following property is not present or has a null value: \"{0}\"")]
    MissingProperty(&'static str),
    #[error("the following property has an invalid value: \"{0}\"")]
    InvalidProperty(&'static str),
}

fn within(value: f64, limit_down: f64, limit_up: f64) -> bool {
    (limit_down..=limit_up).contains(&value)
}

fn require(value: Option<f64>, name: &'static str) -> Result<f64, ValidationError> {
    value.ok_or(ValidationError::MissingProperty(name))
}

/// Clamp-to-default rule: out-of-range values are replaced, never rejected.
fn range_or_default(value: f64, lo: f64, hi: f64, default: f64, name: &str) -> f64 {
    if within(value, lo, hi) {
        value
    } else {
        warn!(
            "property \"{name}\" has an invalid value ({lo} - {hi}); applying default -> {default}"
        );
        default
    }
}

/// Same rule for the optional sizing-triple members: a non-null value outside
/// the range collapses to the default, a null stays null.
fn optional_range_or_default(
    value: Option<f64>,
    lo: f64,
    hi: f64,
    default: f64,
    name: &str,
) -> Option<f64> {
    value.map(|v| range_or_default(v, lo, hi, default, name))
}

/// Validate the process payload, substituting defaults where the documented
/// ranges allow it.
pub fn validate_payload(raw: RawPayload) -> Result<Payload, ValidationError> {
    let nutsid = raw
        .nutsid
        .ok_or(ValidationError::MissingProperty("nutsid"))?;
    if !SUPPORTED_REGIONS.contains(&nutsid.trim().to_uppercase().as_str()) {
        return Err(ValidationError::InvalidProperty("nutsid"));
    }

    let slope_angle = range_or_default(
        require(raw.slope_angle, "slope_angle")?,
        0.0,
        360.0,
        0.0,
        "slope_angle",
    );

    // The sizing-triple keys must be present even when null; an absent key is
    // a hard failure, an explicit null is a valid "not this field" marker.
    let present = |value: Option<Option<f64>>, name: &'static str| {
        value.ok_or(ValidationError::MissingProperty(name))
    };

    // Thermal sizing triple: all-null means "no thermal", expressed as area 0
    let mut area_total_thermal = optional_range_or_default(
        present(raw.area_total_thermal, "area_total_thermal")?,
        0.0,
        1.0e10,
        0.0,
        "area_total_thermal",
    );
    let power_thermal = optional_range_or_default(
        present(raw.power_thermal, "power_thermal")?,
        0.0,
        1.0e12,
        0.0,
        "power_thermal",
    );
    let capex_thermal = optional_range_or_default(
        present(raw.capex_thermal, "capex_thermal")?,
        0.0,
        5.0e11,
        0.0,
        "capex_thermal",
    );
    if area_total_thermal.is_none() && power_thermal.is_none() && capex_thermal.is_none() {
        warn!(
            "properties \"area_total_thermal\", \"power_thermal\" and \"capex_thermal\" are all null; applying default area -> 0"
        );
        area_total_thermal = Some(0.0);
    }

    // PV sizing triple, same rule
    let mut area_total_pv = optional_range_or_default(
        present(raw.area_total_pv, "area_total_pv")?,
        0.0,
        1.0e10,
        0.0,
        "area_total_pv",
    );
    let power_pv = optional_range_or_default(
        present(raw.power_pv, "power_pv")?,
        0.0,
        1.0e12,
        0.0,
        "power_pv",
    );
    let capex_pv = optional_range_or_default(
        present(raw.capex_pv, "capex_pv")?,
        0.0,
        5.0e11,
        0.0,
        "capex_pv",
    );
    if area_total_pv.is_none() && power_pv.is_none() && capex_pv.is_none() {
        warn!(
            "properties \"area_total_pv\", \"power_pv\" and \"capex_pv\" are all null; applying default area -> 0"
        );
        area_total_pv = Some(0.0);
    }

    let system_cost_thermal = range_or_default(
        require(raw.system_cost_thermal, "system_cost_thermal")?,
        1.0,
        10.0,
        0.0,
        "system_cost_thermal",
    );
    let system_cost_pv = range_or_default(
        require(raw.system_cost_pv, "system_cost_pv")?,
        0.2,
        1.0,
        0.5,
        "system_cost_pv",
    );
    let loss = range_or_default(require(raw.loss, "loss")?, 8.0, 20.0, 14.0, "loss");
    let efficiency_thermal = range_or_default(
        require(raw.efficiency_thermal, "efficiency_thermal")?,
        25.0,
        65.0,
        45.0,
        "efficiency_thermal",
    );
    let efficiency_optical = range_or_default(
        require(raw.efficiency_optical, "efficiency_optical")?,
        45.0,
        85.0,
        65.0,
        "efficiency_optical",
    );
    let aperture = range_or_default(
        require(raw.aperture, "aperture")?,
        25.0,
        75.0,
        50.0,
        "aperture",
    );
    let tilt = range_or_default(require(raw.tilt, "tilt")?, 0.0, 90.0, 30.0, "tilt");
    let azimuth = range_or_default(
        require(raw.azimuth, "azimuth")?,
        0.0,
        360.0,
        180.0,
        "azimuth",
    );
    let tracking_percentage = range_or_default(
        require(raw.tracking_percentage, "tracking_percentage")?,
        0.0,
        100.0,
        60.0,
        "tracking_percentage",
    );
    let opex_thermal = range_or_default(
        require(raw.opex_thermal, "opex_thermal")?,
        0.0,
        4.0e4,
        2.0e4,
        "opex_thermal",
    );
    let opex_pv = range_or_default(
        require(raw.opex_pv, "opex_pv")?,
        0.0,
        3.0e4,
        1.5e4,
        "opex_pv",
    );
    let min_ghi_thermal = range_or_default(
        require(raw.min_ghi_thermal, "min_ghi_thermal")?,
        1500.0,
        2500.0,
        2000.0,
        "min_ghi_thermal",
    );
    let min_ghi_pv = range_or_default(
        require(raw.min_ghi_pv, "min_ghi_pv")?,
        500.0,
        2000.0,
        1000.0,
        "min_ghi_pv",
    );
    let land_use_thermal = range_or_default(
        require(raw.land_use_thermal, "land_use_thermal")?,
        25.0,
        100.0,
        50.0,
        "land_use_thermal",
    );
    let land_use_pv = range_or_default(
        require(raw.land_use_pv, "land_use_pv")?,
        50.0,
        200.0,
        100.0,
        "land_use_pv",
    );

    let convert_coord = match raw
        .convert_coord
        .ok_or(ValidationError::MissingProperty("convert_coord"))?
    {
        v if v == 0.0 => false,
        v if v == 1.0 => true,
        _ => return Err(ValidationError::InvalidProperty("convert_coord")),
    };

    let pvgis_year = raw
        .pvgis_year
        .ok_or(ValidationError::MissingProperty("pvgis_year"))?;
    if !(1900..=2020).contains(&pvgis_year) {
        return Err(ValidationError::InvalidProperty("pvgis_year"));
    }

    Ok(Payload {
        nutsid: nutsid.trim().to_uppercase(),
        slope_angle,
        area_total_thermal,
        power_thermal,
        capex_thermal,
        area_total_pv,
        power_pv,
        capex_pv,
        system_cost_thermal,
        system_cost_pv,
        loss,
        efficiency_thermal,
        efficiency_optical,
        aperture,
        tilt,
        azimuth,
        tracking_percentage,
        opex_thermal,
        opex_pv,
        min_ghi_thermal,
        min_ghi_pv,
        land_use_thermal,
        land_use_pv,
        convert_coord,
        pvgis_year: pvgis_year as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_raw() -> RawPayload {
        RawPayload {
            nutsid: Some("ES41".to_owned()),
            slope_angle: Some(0.0),
            area_total_thermal: Some(Some(1.0e6)),
            power_thermal: Some(None),
            capex_thermal: Some(None),
            area_total_pv: Some(None),
            power_pv: Some(Some(200.0)),
            capex_pv: Some(None),
            system_cost_thermal: Some(4.0),
            system_cost_pv: Some(0.5),
            loss: Some(14.0),
            efficiency_thermal: Some(45.0),
            efficiency_optical: Some(65.0),
            aperture: Some(50.0),
            tilt: Some(30.0),
            azimuth: Some(180.0),
            tracking_percentage: Some(60.0),
            opex_thermal: Some(2.0e4),
            opex_pv: Some(1.5e4),
            min_ghi_thermal: Some(2000.0),
            min_ghi_pv: Some(1000.0),
            land_use_thermal: Some(50.0),
            land_use_pv: Some(100.0),
            convert_coord: Some(1.0),
            pvgis_year: Some(2019),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let payload = validate_payload(complete_raw()).unwrap();
        assert_eq!(payload.nutsid, "ES41");
        assert!(payload.convert_coord);
        assert_eq!(payload.pvgis_year, 2019);
    }

    #[test]
    fn rejects_unknown_region() {
        let mut raw = complete_raw();
        raw.nutsid = Some("FR10".to_owned());
        assert!(matches!(
            validate_payload(raw),
            Err(ValidationError::InvalidProperty("nutsid"))
        ));
    }

    #[test]
    fn rejects_missing_nutsid() {
        let mut raw = complete_raw();
        raw.nutsid = None;
        assert!(matches!(
            validate_payload(raw),
            Err(ValidationError::MissingProperty("nutsid"))
        ));
    }

    #[test]
    fn rejects_year_out_of_range() {
        let mut raw = complete_raw();
        raw.pvgis_year = Some(2024);
        assert!(matches!(
            validate_payload(raw),
            Err(ValidationError::InvalidProperty("pvgis_year"))
        ));
    }

    #[test]
    fn out_of_range_loss_falls_back_to_default() {
        let mut raw = complete_raw();
        raw.loss = Some(45.0);
        let payload = validate_payload(raw).unwrap();
        assert_eq!(payload.loss, 14.0);
    }

    #[test]
    fn all_null_thermal_triple_defaults_to_zero_area() {
        let mut raw = complete_raw();
        raw.area_total_thermal = Some(None);
        raw.power_thermal = Some(None);
        raw.capex_thermal = Some(None);
        let payload = validate_payload(raw).unwrap();
        assert_eq!(payload.area_total_thermal, Some(0.0));
        assert_eq!(payload.power_thermal, None);
        assert_eq!(payload.capex_thermal, None);
    }

    #[test]
    fn absent_triple_key_is_fatal() {
        let mut raw = complete_raw();
        raw.power_thermal = None;
        assert!(matches!(
            validate_payload(raw),
            Err(ValidationError::MissingProperty("power_thermal"))
        ));
    }

    #[test]
    fn non_binary_convert_coord_is_fatal() {
        let mut raw = complete_raw();
        raw.convert_coord = Some(2.0);
        assert!(matches!(
            validate_payload(raw),
            Err(ValidationError::InvalidProperty("convert_coord"))
        ));
    }
}
