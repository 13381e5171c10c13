// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Greedy sub-region selection over a resource-ranked catalogue.

use solergy_types::catalogue::{Catalogue, SubRegion};
use tracing::debug;

/// Result of one selection pass: the consumed sub-regions in catalogue order
/// (the last one possibly area-truncated), the total consumed area and the
/// parent region name.
///
/// An empty `rows` list is a valid, degenerate allocation; the parent region
/// name is still carried for downstream labeling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    pub parent_region: String,
    pub rows: Vec<SubRegion>,
    pub consumed_area_m2: f64,
}

/// Select sub-regions until `target_area_m2` is consumed or the catalogue is
/// exhausted.
///
/// Single forward pass over the pre-sorted catalogue, no backtracking. Rows
/// are skipped when their area is non-positive, when they are the
/// region-level aggregate row (identifier equal to the parent region name),
/// or when their threshold tier is below `min_threshold`. The final selected
/// row is truncated to exactly the remaining budget.
pub fn select_sub_regions(
    catalogue: &Catalogue,
    target_area_m2: f64,
    min_threshold: f64,
) -> Allocation {
    let parent_region = catalogue.parent_region().unwrap_or_default();
    let mut rows: Vec<SubRegion> = Vec::new();
    let mut consumed_area_m2 = 0.0;

    for row in &catalogue.rows {
        let remaining = target_area_m2 - consumed_area_m2;
        if remaining <= 0.0 {
            break;
        }
        if row.area_m2 <= 0.0 || row.region == parent_region || row.threshold < min_threshold {
            continue;
        }
        if row.area_m2 > remaining {
            let mut truncated = row.clone();
            truncated.area_m2 = remaining;
            consumed_area_m2 += truncated.area_m2;
            rows.push(truncated);
            break;
        }
        consumed_area_m2 += row.area_m2;
        rows.push(row.clone());
    }

    debug!(
        "selected {} sub-regions of {} ({consumed_area_m2} m2 of {target_area_m2} m2 target)",
        rows.len(),
        catalogue.len()
    );
    Allocation {
        parent_region,
        rows,
        consumed_area_m2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, threshold: f64, area_m2: f64) -> SubRegion {
        SubRegion {
            region: region.to_owned(),
            threshold,
            area_m2,
            median_radiation: threshold,
            x: 0.0,
            y: 0.0,
        }
    }

    #[test]
    fn truncates_the_final_record_to_the_remaining_budget() {
        let catalogue =
            Catalogue::sorted_by_radiation(vec![row("E1", 2200.0, 500.0), row("E1", 2000.0, 300.0)]);
        let allocation = select_sub_regions(&catalogue, 600.0, 2000.0);

        assert_eq!(allocation.rows.len(), 2);
        assert_eq!(allocation.rows[0].area_m2, 500.0);
        assert_eq!(allocation.rows[1].area_m2, 100.0);
        assert_eq!(allocation.consumed_area_m2, 600.0);
        assert_eq!(allocation.parent_region, "E");
    }

    #[test]
    fn exact_exhaustion_appends_no_zero_area_row() {
        let catalogue =
            Catalogue::sorted_by_radiation(vec![row("E1", 2200.0, 500.0), row("E2", 2000.0, 300.0)]);
        let allocation = select_sub_regions(&catalogue, 500.0, 0.0);

        assert_eq!(allocation.rows.len(), 1);
        assert_eq!(allocation.rows[0].region, "E1");
        assert_eq!(allocation.consumed_area_m2, 500.0);
    }

    #[test]
    fn excludes_rows_below_the_threshold_floor() {
        let catalogue = Catalogue::sorted_by_radiation(vec![
            row("ES413", 2200.0, 400.0),
            row("ES412", 1900.0, 400.0),
            row("ES411", 1700.0, 400.0),
        ]);
        let allocation = select_sub_regions(&catalogue, 1000.0, 2000.0);

        assert_eq!(allocation.rows.len(), 1);
        assert_eq!(allocation.rows[0].region, "ES413");
        assert_eq!(allocation.consumed_area_m2, 400.0);
    }

    #[test]
    fn skips_the_region_aggregate_row_and_empty_areas() {
        let catalogue = Catalogue::sorted_by_radiation(vec![
            row("ES413", 2200.0, 400.0),
            row("ES41", 2100.0, 9999.0), // aggregate row for the parent region
            row("ES412", 2050.0, 0.0),
            row("ES411", 2000.0, 300.0),
        ]);
        let allocation = select_sub_regions(&catalogue, 1000.0, 2000.0);

        let picked: Vec<&str> = allocation.rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(picked, vec!["ES413", "ES411"]);
        assert_eq!(allocation.consumed_area_m2, 700.0);
    }

    #[test]
    fn zero_target_selects_nothing_but_keeps_the_region_name() {
        let catalogue = Catalogue::sorted_by_radiation(vec![row("ES413", 2200.0, 400.0)]);
        let allocation = select_sub_regions(&catalogue, 0.0, 2000.0);

        assert!(allocation.rows.is_empty());
        assert_eq!(allocation.consumed_area_m2, 0.0);
        assert_eq!(allocation.parent_region, "ES41");
    }

    #[test]
    fn never_exceeds_the_target_area() {
        let catalogue = Catalogue::sorted_by_radiation(vec![
            row("ES413", 2200.0, 350.0),
            row("ES412", 2100.0, 350.0),
            row("ES411", 2000.0, 350.0),
        ]);
        let allocation = select_sub_regions(&catalogue, 800.0, 0.0);
        assert!(allocation.consumed_area_m2 <= 800.0);
        assert_eq!(allocation.consumed_area_m2, 800.0);
    }

    #[test]
    fn empty_catalogue_yields_an_empty_allocation() {
        let allocation = select_sub_regions(&Catalogue::default(), 1000.0, 0.0);
        assert!(allocation.rows.is_empty());
        assert!(allocation.parent_region.is_empty());
    }
}
