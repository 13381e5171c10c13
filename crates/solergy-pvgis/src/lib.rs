// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod client;
pub mod error;
pub mod geo;

pub use client::{PEAK_POWER_LIMIT_KW, PvProductionRequest, PvgisClient, TrackingMode};
pub use error::{PvgisError, PvgisResult};
