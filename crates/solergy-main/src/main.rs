// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

mod report;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Parser;
use solergy_core::model::{ModelConfig, run_model};
use solergy_core::output::{filter_window, validate_output};
use solergy_core::{SolarResource, load_catalogue};
use solergy_pvgis::PvgisClient;
use solergy_types::{RawPayload, validate_payload};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Parser)]
#[command(name = "solergy")]
#[command(about = "Estimate hourly solar thermal and PV production for a region", long_about = None)]
struct Cli {
    /// Path to the JSON payload with the process parameters
    payload: PathBuf,

    /// Start of the reporting window (YYYY-MM-DDThh:mm:ss, UTC)
    start: String,

    /// End of the reporting window (YYYY-MM-DDThh:mm:ss, UTC)
    end: String,

    /// Directory holding the per-region catalogue CSV files
    #[arg(long, default_value = "usecases")]
    catalogues: PathBuf,

    /// Write the result JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_window(start: &str, end: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let parse = |s: &str| -> Result<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
            .with_context(|| format!("invalid datetime {s:?}, expected {DATETIME_FORMAT}"))?;
        Ok(naive.and_utc())
    };
    let start = parse(start)?;
    let end = parse(end)?;
    if end <= start {
        bail!("the end of the window must be after its start");
    }
    Ok((start, end))
}

fn catalogue_path(dir: &Path, region: &str) -> PathBuf {
    dir.join(format!("{region}.csv"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;

    let cli = Cli::parse();
    let (start, end) = parse_window(&cli.start, &cli.end)?;

    let raw = std::fs::read_to_string(&cli.payload)
        .with_context(|| format!("could not read payload {}", cli.payload.display()))?;
    let raw: RawPayload = serde_json::from_str(&raw).context("could not parse the payload JSON")?;
    let payload = validate_payload(raw)?;
    info!("payload validated for region {}", payload.nutsid);

    // Thermal and PV selection run over independent copies of the same
    // per-region dataset.
    let path = catalogue_path(&cli.catalogues, &payload.nutsid);
    let thermal_catalogue = load_catalogue(&path)?;
    let pv_catalogue = load_catalogue(&path)?;

    let resource: Arc<dyn SolarResource> = Arc::new(PvgisClient::new()?);
    let config = ModelConfig::from_payload(&payload);
    let output = run_model(&config, resource, &thermal_catalogue, &pv_catalogue).await?;

    let production = filter_window(&output.aggregated, start, end);
    validate_output(&production)?;

    let report = report::build(&output, production);
    let json = serde_json::to_string_pretty(&report)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("could not write {}", path.display()))?;
            info!("result written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
