// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Solar technologies competing for the same land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    /// Concentrated solar thermal (CSP)
    Thermal,
    /// Photovoltaic
    Pv,
}

impl Technology {
    /// Key suffix used when tagging capacity entries (`<sub>_thermal`, `<sub>_pv`)
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Self::Thermal => "thermal",
            Self::Pv => "pv",
        }
    }

    /// Column label used in rendered production tables
    pub fn column_label(&self) -> &'static str {
        match self {
            Self::Thermal => "Pthermal",
            Self::Pv => "Ppv",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_suffix())
    }
}

/// One row of the per-region solar preprocess result: a geographic sub-region
/// within a resource-quality tier.
///
/// `region` is the sub-region identifier (e.g. "ES413"); the parent region id
/// ("ES41") is obtained by stripping the last character, see
/// [`Catalogue::parent_region`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubRegion {
    #[serde(rename = "Region")]
    pub region: String,
    /// Discretized annual GHI tier (kWh/m2), also the selection floor key
    #[serde(rename = "Threshold")]
    pub threshold: f64,
    #[serde(rename = "Area_m2")]
    pub area_m2: f64,
    /// Annual GHI proxy used for ranking (kWh/m2)
    #[serde(rename = "Median_Radiation")]
    pub median_radiation: f64,
    #[serde(rename = "Median_Radiation_X")]
    pub x: f64,
    #[serde(rename = "Median_Radiation_Y")]
    pub y: f64,
}

/// Resource-ranked catalogue of sub-regions for one technology.
///
/// Rows are kept sorted descending by `median_radiation`; the ordering is the
/// sole basis for greedy selection and is never re-derived downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    pub rows: Vec<SubRegion>,
}

impl Catalogue {
    /// Build a catalogue from raw rows, sorting them descending by median
    /// radiation. The sort is stable so ties keep their source order.
    pub fn sorted_by_radiation(mut rows: Vec<SubRegion>) -> Self {
        rows.sort_by(|a, b| {
            b.median_radiation
                .partial_cmp(&a.median_radiation)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { rows }
    }

    /// Parent region identifier: the first row's id with the last character
    /// removed. This is a data convention of the preprocess output, where the
    /// region-level aggregate row carries the bare parent id.
    pub fn parent_region(&self) -> Option<String> {
        self.rows.first().map(|row| {
            let mut name = row.region.clone();
            name.pop();
            name
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
