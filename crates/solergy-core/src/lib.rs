// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Capacity resolution and region allocation engine.
//!
//! The pipeline resolves a single sizing input (area, power or capex) per
//! technology into the full triple, greedily allocates sub-regions from a
//! resource-ranked catalogue, converts each allocation into an hourly
//! production series through the thermal and photovoltaic models, and
//! aggregates the result across the region and sub-region levels with an
//! operating-cost rollup.

pub mod catalogue;
pub mod distribution;
pub mod error;
pub mod model;
pub mod opex;
pub mod output;
pub mod production;
pub mod reconcile;
pub mod selection;
pub mod sizing;
pub mod traits;

mod resource;

pub use catalogue::load_catalogue;
pub use distribution::{AggregatedProduction, DistributionEntry, DrillDown};
pub use error::{ModelError, ModelResult};
pub use model::{ModelConfig, ModelOutput, TechnologyConfig, run_model};
pub use output::{FilteredResult, filter_window, validate_output};
pub use selection::Allocation;
pub use sizing::{Sizing, SizingInput};
pub use traits::SolarResource;
