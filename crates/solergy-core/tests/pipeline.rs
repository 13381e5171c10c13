// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Full pipeline runs against a synthetic resource.

use anyhow::{Result, anyhow};
use approx::assert_relative_eq;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use solergy_core::model::{ModelConfig, TechnologyConfig, run_model};
use solergy_core::output::{filter_window, validate_output};
use solergy_core::sizing::SizingInput;
use solergy_core::traits::SolarResource;
use solergy_pvgis::{PvProductionRequest, TrackingMode};
use solergy_types::catalogue::{Catalogue, SubRegion, Technology};
use solergy_types::series::{HourlySeries, MeteoSeries};
use std::sync::Arc;

const HOURS: usize = 24;

/// Constant-weather resource. TMY timestamps carry source year 2007 and a
/// ten-minute offset, like the real service.
struct MockResource {
    dni: f64,
    tracked_w: f64,
    fixed_w: f64,
    fail_pv: bool,
}

impl MockResource {
    fn timestamps(year: i32) -> Vec<DateTime<Utc>> {
        (0..HOURS as u32)
            .map(|h| Utc.with_ymd_and_hms(year, 6, 1, h, 10, 0).unwrap())
            .collect()
    }
}

#[async_trait]
impl SolarResource for MockResource {
    async fn fetch_tmy(&self, _latitude: f64, _longitude: f64) -> Result<MeteoSeries> {
        Ok(MeteoSeries {
            timestamps: Self::timestamps(2007),
            dni: vec![self.dni; HOURS],
            temperature: vec![20.0; HOURS],
        })
    }

    async fn fetch_hourly_production(
        &self,
        request: &PvProductionRequest,
    ) -> Result<HourlySeries> {
        if self.fail_pv {
            return Err(anyhow!("connection refused"));
        }
        let watts = match request.tracking {
            TrackingMode::SingleAxis => self.tracked_w,
            TrackingMode::Fixed => self.fixed_w,
        };
        Ok(HourlySeries::new(
            Self::timestamps(request.year),
            vec![watts; HOURS],
        ))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn row(region: &str, threshold: f64, area_m2: f64) -> SubRegion {
    SubRegion {
        region: region.to_owned(),
        threshold,
        area_m2,
        median_radiation: threshold,
        x: -4.7,
        y: 41.5,
    }
}

fn catalogue() -> Catalogue {
    Catalogue::sorted_by_radiation(vec![
        row("ES413", 2200.0, 2.0e6),
        row("ES41", 2100.0, 9.0e6), // region aggregate row, never selected
        row("ES412", 2000.0, 2.0e6),
    ])
}

fn technology(area_m2: f64, land_use: f64, opex: f64) -> TechnologyConfig {
    TechnologyConfig {
        sizing: SizingInput {
            area_m2: Some(area_m2),
            power_mw: None,
            capex_eur: None,
        },
        system_cost_eur_per_w: 4.0,
        land_use_w_per_m2: land_use,
        min_threshold: 1500.0,
        opex_eur_per_kw: opex,
    }
}

fn config(thermal_area_m2: f64, pv_area_m2: f64) -> ModelConfig {
    ModelConfig {
        region_id: "ES41".to_owned(),
        thermal: technology(thermal_area_m2, 50.0, 20_000.0),
        pv: technology(pv_area_m2, 100.0, 15_000.0),
        efficiency_thermal: 0.45,
        efficiency_optical: 0.65,
        aperture_fraction: 0.5,
        tilt: 30.0,
        azimuth: 180.0,
        tracking_fraction: 0.6,
        loss_pct: 14.0,
        convert_coord: false,
        year: 2019,
    }
}

#[tokio::test]
async fn full_run_produces_both_technologies() {
    let resource = Arc::new(MockResource {
        dni: 800.0,
        tracked_w: 2.0e6,
        fixed_w: 1.0e6,
        fail_pv: false,
    });
    let output = run_model(&config(1.0e6, 1.5e6), resource, &catalogue(), &catalogue())
        .await
        .unwrap();

    assert_eq!(output.region, "ES41");
    assert_relative_eq!(output.thermal_sizing.power_mw, 50.0);
    assert_relative_eq!(output.pv_sizing.power_mw, 150.0);

    // Thermal fits inside ES413; PV gets the remaining 1e6 m2 of ES413 plus
    // 0.5e6 m2 of ES412.
    let keys: Vec<String> = output.distributions.iter().map(|d| d.key()).collect();
    assert_eq!(keys, vec!["ES413_thermal", "ES413_pv", "ES412_pv"]);

    // Aperture area is the field-level value (0.5 * 1e6 m2) for the single
    // thermal sub-region: 800 * 5e5 * 0.45 * 0.65 / 1e6 MWh per hour.
    let thermal = output.aggregated.thermal_mw.as_ref().unwrap();
    assert_relative_eq!(thermal[0], 800.0 * 5.0e5 * 0.45 * 0.65 / 1.0e6);

    // Each PV sub-region blends 0.6 * 2 MW + 0.4 * 1 MW = 1.6 MW; two of them.
    assert_relative_eq!(output.aggregated.pv_mw[0], 3.2);

    // TMY hours are restamped into the requested year and rounded.
    assert_eq!(
        output.aggregated.timestamps[0],
        Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap()
    );

    // OPEX: thermal 50 MW at 2e4 EUR per unit; PV 150 MW at 1.5e4.
    assert_relative_eq!(output.opex_thermal_eur, 50.0 * 2.0e4);
    assert_relative_eq!(output.opex_pv_eur, 150.0 * 1.5e4);

    let start = Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2019, 6, 1, 23, 0, 0).unwrap();
    let filtered = filter_window(&output.aggregated, start, end);
    assert_eq!(filtered.time_utc.len(), HOURS);
    validate_output(&filtered).unwrap();
}

#[tokio::test]
async fn pv_only_run_omits_thermal_everywhere() {
    let resource = Arc::new(MockResource {
        dni: 800.0,
        tracked_w: 2.0e6,
        fixed_w: 1.0e6,
        fail_pv: false,
    });
    let output = run_model(&config(0.0, 1.0e6), resource, &catalogue(), &catalogue())
        .await
        .unwrap();

    assert_eq!(output.region, "ES41");
    assert!(output.aggregated.thermal_mw.is_none());
    assert!(
        output
            .distributions
            .iter()
            .all(|d| d.technology == Technology::Pv)
    );
    assert_eq!(output.opex_thermal_eur, 0.0);
    assert_eq!(output.drill_downs.len(), 1);
    assert_eq!(output.drill_downs[0].sub_region, "ES413");
}

#[tokio::test]
async fn thermal_only_run_keeps_a_zero_pv_column() {
    let resource = Arc::new(MockResource {
        dni: 800.0,
        tracked_w: 2.0e6,
        fixed_w: 1.0e6,
        fail_pv: false,
    });
    let output = run_model(&config(1.0e6, 0.0), resource, &catalogue(), &catalogue())
        .await
        .unwrap();

    assert_eq!(output.region, "ES41");
    assert!(output.aggregated.thermal_mw.is_some());
    assert_eq!(output.aggregated.pv_mw, vec![0.0; HOURS]);
    assert!(
        output
            .distributions
            .iter()
            .all(|d| d.technology == Technology::Thermal)
    );

    let start = Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2019, 6, 1, 23, 0, 0).unwrap();
    let filtered = filter_window(&output.aggregated, start, end);
    assert_eq!(filtered.time_utc.len(), HOURS);
    assert_eq!(filtered.pv_mw, vec![0.0; HOURS]);
    validate_output(&filtered).unwrap();
}

#[tokio::test]
async fn resource_failure_aborts_the_run() {
    let resource = Arc::new(MockResource {
        dni: 800.0,
        tracked_w: 2.0e6,
        fixed_w: 1.0e6,
        fail_pv: true,
    });
    let err = run_model(&config(1.0e6, 1.0e6), resource, &catalogue(), &catalogue())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("pv production"));
}

#[tokio::test]
async fn thermal_consumption_shrinks_the_pv_allocation() {
    let resource = Arc::new(MockResource {
        dni: 800.0,
        tracked_w: 1.0e6,
        fixed_w: 1.0e6,
        fail_pv: false,
    });
    // Thermal takes all of ES413; PV must start in ES412.
    let output = run_model(&config(2.0e6, 1.0e6), resource, &catalogue(), &catalogue())
        .await
        .unwrap();

    let pv_keys: Vec<String> = output
        .distributions
        .iter()
        .filter(|d| d.technology == Technology::Pv)
        .map(|d| d.key())
        .collect();
    assert_eq!(pv_keys, vec!["ES412_pv"]);
}
