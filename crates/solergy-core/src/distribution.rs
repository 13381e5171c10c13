// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Aggregation of per-sub-region productions up to region and sub-region
//! level outputs.
//!
//! Catalogue rows carry one entry per (sub-region, threshold tier); several
//! rows of one sub-region collapse into a single distribution entry here.
//! Entries keep a structured (sub-region, technology) key all the way to
//! serialization, where the `<subregion>_<technology>` label is rendered.

use crate::production::SubRegionProduction;
use chrono::{DateTime, Utc};
use serde::Serialize;
use solergy_types::catalogue::Technology;
use solergy_types::series::HourlySeries;

/// Summed production, area and installed capacity for one sub-region of one
/// technology.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionEntry {
    pub sub_region: String,
    pub technology: Technology,
    #[serde(skip)]
    pub series: HourlySeries,
    pub area_m2: f64,
    pub capacity_kw: f64,
}

impl DistributionEntry {
    /// Key label rendered in capacity/area dictionaries, e.g. `ES413_pv`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.sub_region, self.technology.key_suffix())
    }
}

/// Group a technology's productions by sub-region identifier, summing their
/// series, areas and capacities. First-seen order is preserved.
pub fn distribute(
    productions: &[SubRegionProduction],
    technology: Technology,
) -> Vec<DistributionEntry> {
    let mut entries: Vec<DistributionEntry> = Vec::new();
    for production in productions {
        let id = &production.sub_region.region;
        if let Some(i) = entries.iter().position(|e| &e.sub_region == id) {
            let entry = &mut entries[i];
            entry.series =
                HourlySeries::sum_pairwise(&[entry.series.clone(), production.series.clone()]);
            entry.area_m2 += production.sub_region.area_m2;
            entry.capacity_kw += production.power_installed_kw;
        } else {
            entries.push(DistributionEntry {
                sub_region: id.clone(),
                technology,
                series: production.series.clone(),
                area_m2: production.sub_region.area_m2,
                capacity_kw: production.power_installed_kw,
            });
        }
    }
    entries
}

/// The region-level combined hourly series, timestamps rounded to whole
/// hours. The thermal column is absent when the thermal allocation was empty.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedProduction {
    pub region: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub thermal_mw: Option<Vec<f64>>,
    pub pv_mw: Vec<f64>,
}

/// Sum both technologies' distribution entries into the region-level series.
pub fn aggregate_region(
    region: &str,
    thermal: &[DistributionEntry],
    pv: &[DistributionEntry],
) -> AggregatedProduction {
    let thermal_total = sum_entries(thermal).map(|s| s.rounded_to_hour());
    let pv_total = sum_entries(pv)
        .map(|s| s.rounded_to_hour())
        .unwrap_or_default();

    let timestamps = match &thermal_total {
        Some(series) if !series.is_empty() => series.timestamps.clone(),
        _ => pv_total.timestamps.clone(),
    };
    // A thermal-only run has no PV entries; the PV column is still emitted,
    // zero-valued over the thermal hours.
    let pv_mw = if pv_total.is_empty() && !timestamps.is_empty() {
        vec![0.0; timestamps.len()]
    } else {
        pv_total.values
    };
    AggregatedProduction {
        region: region.to_owned(),
        timestamps,
        thermal_mw: thermal_total.map(|s| s.values),
        pv_mw,
    }
}

fn sum_entries(entries: &[DistributionEntry]) -> Option<HourlySeries> {
    if entries.is_empty() {
        return None;
    }
    let series: Vec<HourlySeries> = entries.iter().map(|e| e.series.clone()).collect();
    Some(HourlySeries::sum_pairwise(&series))
}

/// Per-sub-region output table: every technology present in that sub-region
/// as one named column, thermal first.
#[derive(Debug, Clone, Serialize)]
pub struct DrillDown {
    pub sub_region: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub columns: Vec<(Technology, Vec<f64>)>,
}

/// Re-split the two per-technology tables into independent per-sub-region
/// tables. Sub-regions appear in first-seen order across the thermal entries
/// then the PV entries; a sub-region hosting both technologies yields one
/// table with two columns.
pub fn drill_downs(thermal: &[DistributionEntry], pv: &[DistributionEntry]) -> Vec<DrillDown> {
    let mut tables: Vec<DrillDown> = Vec::new();
    for entry in thermal.iter().chain(pv) {
        let series = entry.series.rounded_to_hour();
        if let Some(i) = tables.iter().position(|t| t.sub_region == entry.sub_region) {
            tables[i].columns.push((entry.technology, series.values));
        } else {
            tables.push(DrillDown {
                sub_region: entry.sub_region.clone(),
                timestamps: series.timestamps,
                columns: vec![(entry.technology, series.values)],
            });
        }
    }
    tables
}
