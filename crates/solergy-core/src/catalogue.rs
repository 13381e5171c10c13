// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::error::ModelResult;
use solergy_types::catalogue::{Catalogue, SubRegion};
use std::path::Path;
use tracing::info;

/// Load a per-region catalogue CSV, sorted descending by median radiation.
///
/// The preprocess writes ISO-8859-1 files; all fields the model reads are
/// ASCII, so non-UTF-8 bytes are decoded lossily rather than rejected.
pub fn load_catalogue(path: &Path) -> ModelResult<Catalogue> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let catalogue = read_catalogue(text.as_bytes())?;
    info!(
        "loaded catalogue {} ({} sub-region rows)",
        path.display(),
        catalogue.len()
    );
    Ok(catalogue)
}

/// Parse catalogue rows from any reader (tests feed in-memory CSV).
pub fn read_catalogue(reader: impl std::io::Read) -> ModelResult<Catalogue> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: Vec<SubRegion> = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(Catalogue::sorted_by_radiation(rows))
}
