// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Sizing resolution: one of (area, power, capex) in, all three out.

use serde::Serialize;

/// The raw sizing triple from the payload; at most one field is expected to
/// be non-null.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizingInput {
    pub area_m2: Option<f64>,
    pub power_mw: Option<f64>,
    pub capex_eur: Option<f64>,
}

/// A fully resolved, mutually consistent sizing triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sizing {
    pub area_m2: f64,
    pub power_mw: f64,
    pub capex_eur: f64,
}

/// Resolve a sizing triple from whichever field is given, using the
/// technology's unit system cost (EUR/W) and land-use ratio (W/m2).
///
/// The first non-null field in the fixed order [area, power, capex] wins;
/// an all-null input defaults to zero area. Identities:
/// `power_MW = area_m2 * land_use / 1e6` and `capex = power_MW * cost * 1e6`.
pub fn resolve(input: SizingInput, system_cost_eur_per_w: f64, land_use_w_per_m2: f64) -> Sizing {
    if let Some(area_m2) = input.area_m2 {
        from_area(area_m2, system_cost_eur_per_w, land_use_w_per_m2)
    } else if let Some(power_mw) = input.power_mw {
        Sizing {
            area_m2: power_mw * 1.0e6 / land_use_w_per_m2,
            power_mw,
            capex_eur: power_mw * system_cost_eur_per_w * 1.0e6,
        }
    } else if let Some(capex_eur) = input.capex_eur {
        let power_mw = capex_eur / (system_cost_eur_per_w * 1.0e6);
        Sizing {
            area_m2: power_mw * 1.0e6 / land_use_w_per_m2,
            power_mw,
            capex_eur,
        }
    } else {
        from_area(0.0, system_cost_eur_per_w, land_use_w_per_m2)
    }
}

fn from_area(area_m2: f64, system_cost_eur_per_w: f64, land_use_w_per_m2: f64) -> Sizing {
    let power_mw = area_m2 * land_use_w_per_m2 / 1.0e6;
    Sizing {
        area_m2,
        power_mw,
        capex_eur: power_mw * system_cost_eur_per_w * 1.0e6,
    }
}
