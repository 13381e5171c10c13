// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Cross-technology area reconciliation.
//!
//! Thermal and photovoltaic compete for the same parcels: the area a thermal
//! allocation consumed must be removed from the photovoltaic catalogue before
//! PV selection runs.

use crate::selection::Allocation;
use solergy_types::catalogue::Catalogue;
use tracing::warn;

/// Return a photovoltaic catalogue with the thermal-consumed area subtracted.
///
/// Rows are matched on the exact (Region, Threshold) pair; all other rows are
/// untouched and no rows are removed. Areas are allowed to go negative when
/// the inputs are inconsistent; the later selection pass skips non-positive
/// areas, so such rows simply become unselectable.
pub fn reconcile_pv_catalogue(pv_catalogue: &Catalogue, thermal: &Allocation) -> Catalogue {
    let mut rows = pv_catalogue.rows.clone();
    for consumed in &thermal.rows {
        for row in rows
            .iter_mut()
            .filter(|r| r.region == consumed.region && r.threshold == consumed.threshold)
        {
            row.area_m2 -= consumed.area_m2;
            if row.area_m2 < 0.0 {
                warn!(
                    "PV catalogue area for ({}, {}) went negative after thermal reconciliation: {}",
                    row.region, row.threshold, row.area_m2
                );
            }
        }
    }
    // Subtraction never reorders: the radiation ranking is untouched.
    Catalogue { rows }
}
