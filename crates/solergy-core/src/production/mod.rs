// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Technology production models: allocation in, hourly energy series out.

pub mod pv;
pub mod thermal;

use solergy_pvgis::geo;
use solergy_types::catalogue::SubRegion;
use solergy_types::series::HourlySeries;

/// One processed sub-region: its (possibly truncated) catalogue row, the
/// installed capacity derived from its area, and its hourly production
/// series in MWh.
#[derive(Debug, Clone)]
pub struct SubRegionProduction {
    pub sub_region: SubRegion,
    pub power_installed_kw: f64,
    pub series: HourlySeries,
}

/// Resolve a row's coordinates to geodetic (longitude, latitude).
///
/// Conversion from the EPSG:3035 grid happens when the payload asks for it
/// or, for the thermal path only, when the raw latitude is implausible for a
/// geodetic value (> 180 means the catalogue carries projected metres).
pub(crate) fn resolve_coordinates(
    row: &SubRegion,
    convert_coord: bool,
    implausible_latitude_fallback: bool,
) -> (f64, f64) {
    let (lon, lat) = (row.x, row.y);
    if convert_coord || (implausible_latitude_fallback && lat > 180.0) {
        geo::laea_to_wgs84(row.x, row.y)
    } else {
        (lon, lat)
    }
}

/// Installed capacity bookkeeping value for an area: `area * land_use / 1e6`.
pub(crate) fn installed_capacity_kw(area_m2: f64, land_use_w_per_m2: f64) -> f64 {
    area_m2 * land_use_w_per_m2 / 1.0e6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x: f64, y: f64) -> SubRegion {
        SubRegion {
            region: "ES413".to_owned(),
            threshold: 2200.0,
            area_m2: 100.0,
            median_radiation: 2200.0,
            x,
            y,
        }
    }

    #[test]
    fn geodetic_coordinates_pass_through() {
        let (lon, lat) = resolve_coordinates(&row(-4.7, 41.5), false, true);
        assert_eq!((lon, lat), (-4.7, 41.5));
    }

    #[test]
    fn projected_latitude_triggers_the_thermal_fallback() {
        let (lon, lat) = resolve_coordinates(&row(3_000_000.0, 2_100_000.0), false, true);
        assert!(lat < 90.0);
        assert!(lon < 0.0);
    }

    #[test]
    fn pv_path_ignores_the_fallback_without_the_flag() {
        let (lon, lat) = resolve_coordinates(&row(3_000_000.0, 2_100_000.0), false, false);
        assert_eq!((lon, lat), (3_000_000.0, 2_100_000.0));
    }
}
