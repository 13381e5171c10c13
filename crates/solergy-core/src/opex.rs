// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Annual operating-cost accumulation from installed capacities.

use crate::distribution::DistributionEntry;
use solergy_types::catalogue::Technology;

/// Sum every entry's installed capacity per technology and price each total
/// at its per-unit operating cost. Returns (thermal, pv) annual OPEX in EUR.
pub fn accumulate(
    entries: &[DistributionEntry],
    opex_thermal_eur_per_kw: f64,
    opex_pv_eur_per_kw: f64,
) -> (f64, f64) {
    let capacity_of = |technology: Technology| -> f64 {
        entries
            .iter()
            .filter(|e| e.technology == technology)
            .map(|e| e.capacity_kw)
            .sum()
    };
    (
        capacity_of(Technology::Thermal) * opex_thermal_eur_per_kw,
        capacity_of(Technology::Pv) * opex_pv_eur_per_kw,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use solergy_types::series::HourlySeries;

    fn entry(sub_region: &str, technology: Technology, capacity_kw: f64) -> DistributionEntry {
        DistributionEntry {
            sub_region: sub_region.to_owned(),
            technology,
            series: HourlySeries::default(),
            area_m2: 0.0,
            capacity_kw,
        }
    }

    #[test]
    fn prices_each_technology_at_its_own_rate() {
        let entries = vec![
            entry("A", Technology::Thermal, 1000.0),
            entry("B", Technology::Pv, 2000.0),
        ];
        let (thermal, pv) = accumulate(&entries, 10.0, 5.0);
        assert_eq!(thermal, 10_000.0);
        assert_eq!(pv, 10_000.0);
    }

    #[test]
    fn missing_technology_costs_nothing() {
        let entries = vec![entry("A", Technology::Pv, 500.0)];
        let (thermal, pv) = accumulate(&entries, 10.0, 5.0);
        assert_eq!(thermal, 0.0);
        assert_eq!(pv, 2500.0);
    }
}
