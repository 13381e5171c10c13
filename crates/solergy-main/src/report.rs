// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Assembly of the result JSON document.

use serde::Serialize;
use serde_json::{Map, Value, json};
use solergy_core::model::ModelOutput;
use solergy_core::output::FilteredResult;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
pub struct Report {
    pub region: String,
    /// Region-level series cut to the requested window
    pub production: FilteredResult,
    /// One table per sub-region, keyed by its identifier
    pub drill_down: Map<String, Value>,
    pub indicators: Indicators,
}

/// Capacity, area, cost and OPEX scalars of the run.
#[derive(Debug, Serialize)]
pub struct Indicators {
    pub area_thermal_m2: f64,
    pub power_thermal_mw: f64,
    pub capex_thermal_eur: f64,
    pub area_pv_m2: f64,
    pub power_pv_mw: f64,
    pub capex_pv_eur: f64,
    pub opex_thermal_eur: f64,
    pub opex_pv_eur: f64,
    /// Installed capacity per `<subregion>_<technology>` key, in kW
    pub capacity_kw: Map<String, Value>,
    /// Consumed area per `<subregion>_<technology>` key, in m2
    pub area_m2: Map<String, Value>,
}

pub fn build(output: &ModelOutput, production: FilteredResult) -> Report {
    let mut drill_down = Map::new();
    for table in &output.drill_downs {
        let mut columns = Map::new();
        columns.insert(
            "time(UTC)".to_owned(),
            json!(
                table
                    .timestamps
                    .iter()
                    .map(|ts| ts.format(TIME_FORMAT).to_string())
                    .collect::<Vec<String>>()
            ),
        );
        for (technology, values) in &table.columns {
            columns.insert(technology.column_label().to_owned(), json!(values));
        }
        drill_down.insert(table.sub_region.clone(), Value::Object(columns));
    }

    let mut capacity_kw = Map::new();
    let mut area_m2 = Map::new();
    for entry in &output.distributions {
        capacity_kw.insert(entry.key(), json!(entry.capacity_kw));
        area_m2.insert(entry.key(), json!(entry.area_m2));
    }

    Report {
        region: output.region.clone(),
        production,
        drill_down,
        indicators: Indicators {
            area_thermal_m2: output.thermal_sizing.area_m2,
            power_thermal_mw: output.thermal_sizing.power_mw,
            capex_thermal_eur: output.thermal_sizing.capex_eur,
            area_pv_m2: output.pv_sizing.area_m2,
            power_pv_mw: output.pv_sizing.power_mw,
            capex_pv_eur: output.pv_sizing.capex_eur,
            opex_thermal_eur: output.opex_thermal_eur,
            opex_pv_eur: output.opex_pv_eur,
            capacity_kw,
            area_m2,
        },
    }
}
