// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use solergy_types::catalogue::Technology;
use solergy_types::series::SeriesError;
use solergy_types::validator::ValidationError;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid payload: {0}")]
    Config(#[from] ValidationError),

    #[error("could not read the catalogue file: {0}")]
    CatalogueIo(#[from] std::io::Error),

    #[error("could not parse the catalogue file: {0}")]
    CatalogueFormat(#[from] csv::Error),

    #[error("could not get {technology} production because the external server is not responding: {source}")]
    Resource {
        technology: Technology,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("a production fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("the output contains negative values")]
    NegativeOutput,
}
