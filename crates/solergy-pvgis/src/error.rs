// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use thiserror::Error;

pub type PvgisResult<T> = Result<T, PvgisError>;

#[derive(Debug, Error)]
pub enum PvgisError {
    #[error("failed to reach the PVGIS service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PVGIS returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected PVGIS response: {0}")]
    Decode(String),

    #[error("invalid timestamp in PVGIS response: {0}")]
    Timestamp(String),
}
