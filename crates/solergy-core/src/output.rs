// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

//! Final output packaging: window filtering and sanity validation.

use crate::distribution::AggregatedProduction;
use crate::error::{ModelError, ModelResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The region-level series cut to the requested window, ready for
/// serialization. The thermal column disappears from the JSON when the run
/// had no thermal allocation.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredResult {
    #[serde(rename = "time(UTC)")]
    pub time_utc: Vec<String>,
    #[serde(rename = "Pthermal", skip_serializing_if = "Option::is_none")]
    pub thermal_mw: Option<Vec<f64>>,
    #[serde(rename = "Ppv")]
    pub pv_mw: Vec<f64>,
}

/// Keep the hours within `[start, end]`, both bounds inclusive.
pub fn filter_window(
    aggregated: &AggregatedProduction,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> FilteredResult {
    let keep: Vec<usize> = aggregated
        .timestamps
        .iter()
        .enumerate()
        .filter(|(_, ts)| **ts >= start && **ts <= end)
        .map(|(i, _)| i)
        .collect();

    let pick = |values: &Vec<f64>| keep.iter().map(|&i| values[i]).collect::<Vec<f64>>();
    FilteredResult {
        time_utc: keep
            .iter()
            .map(|&i| aggregated.timestamps[i].format(TIME_FORMAT).to_string())
            .collect(),
        thermal_mw: aggregated.thermal_mw.as_ref().map(pick),
        pv_mw: pick(&aggregated.pv_mw),
    }
}

/// A negative value in either production column fails the run.
pub fn validate_output(result: &FilteredResult) -> ModelResult<()> {
    let negative = result
        .thermal_mw
        .iter()
        .flatten()
        .chain(&result.pv_mw)
        .any(|v| *v < 0.0);
    if negative {
        return Err(ModelError::NegativeOutput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn aggregated() -> AggregatedProduction {
        let timestamps = (0..4)
            .map(|h| Utc.with_ymd_and_hms(2019, 6, 1, h, 0, 0).unwrap())
            .collect();
        AggregatedProduction {
            region: "ES41".to_owned(),
            timestamps,
            thermal_mw: Some(vec![1.0, 2.0, 3.0, 4.0]),
            pv_mw: vec![5.0, 6.0, 7.0, 8.0],
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2019, 6, 1, 1, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2019, 6, 1, 2, 0, 0).unwrap();
        let filtered = filter_window(&aggregated(), start, end);

        assert_eq!(
            filtered.time_utc,
            vec!["2019-06-01 01:00:00", "2019-06-01 02:00:00"]
        );
        assert_eq!(filtered.thermal_mw.as_deref(), Some(&[2.0, 3.0][..]));
        assert_eq!(filtered.pv_mw, vec![6.0, 7.0]);
    }

    #[test]
    fn empty_window_yields_empty_columns() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let filtered = filter_window(&aggregated(), start, end);
        assert!(filtered.time_utc.is_empty());
        assert!(filtered.pv_mw.is_empty());
    }

    #[test]
    fn missing_thermal_column_is_skipped_in_json() {
        let result = FilteredResult {
            time_utc: vec!["2019-06-01 00:00:00".to_owned()],
            thermal_mw: None,
            pv_mw: vec![5.0],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("Pthermal").is_none());
        assert!(json.get("Ppv").is_some());
        assert!(json.get("time(UTC)").is_some());
    }

    #[test]
    fn negative_production_fails_validation() {
        let result = FilteredResult {
            time_utc: vec!["2019-06-01 00:00:00".to_owned()],
            thermal_mw: Some(vec![-0.001]),
            pv_mw: vec![5.0],
        };
        assert!(matches!(
            validate_output(&result),
            Err(ModelError::NegativeOutput)
        ));
    }

    #[test]
    fn non_negative_production_passes_validation() {
        let start = Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2019, 6, 1, 3, 0, 0).unwrap();
        let filtered = filter_window(&aggregated(), start, end);
        assert!(validate_output(&filtered).is_ok());
    }
}
