// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod catalogue;
pub mod config;
pub mod series;
pub mod validator;

// Re-export common types for convenience
pub use catalogue::{Catalogue, SubRegion, Technology};
pub use config::{Payload, RawPayload};
pub use series::{HourlySeries, MeteoSeries, SeriesError};
pub use validator::{ValidationError, validate_payload};
