// Copyright (c) 2025 Tecnalia Research & Innovation
//
// This file is part of Solergy.
//
// Licensed under the GNU General Public License, version 2 or (at your option)
// any later version. See <https://www.gnu.org/licenses/>.
//
// This software is provided "AS IS", without warranty of any kind.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("no calendar date {month:02}-{day:02} in year {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// One year of hourly values with their timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlySeries {
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

impl HourlySeries {
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), values.len());
        Self { timestamps, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Multiply every value by `factor`, keeping the timestamps.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            timestamps: self.timestamps.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    /// Per-hour weighted blend of two series: `fraction * a + (1 - fraction) * b`.
    /// Timestamps are taken from `a`; values are zipped up to the shorter length.
    pub fn blend(a: &Self, b: &Self, fraction: f64) -> Self {
        let n = a.len().min(b.len());
        let values = a
            .values
            .iter()
            .zip(&b.values)
            .take(n)
            .map(|(x, y)| fraction * x + (1.0 - fraction) * y)
            .collect();
        Self {
            timestamps: a.timestamps.iter().take(n).copied().collect(),
            values,
        }
    }

    /// Element-wise sum of several series. Timestamps come from the first
    /// series; an empty slice yields an empty series.
    pub fn sum_pairwise(series: &[Self]) -> Self {
        let Some(first) = series.first() else {
            return Self::default();
        };
        let mut values = first.values.clone();
        for s in &series[1..] {
            for (acc, v) in values.iter_mut().zip(&s.values) {
                *acc += v;
            }
        }
        Self {
            timestamps: first.timestamps.clone(),
            values,
        }
    }

    /// Round every timestamp to the nearest whole hour.
    pub fn rounded_to_hour(&self) -> Self {
        Self {
            timestamps: self.timestamps.iter().map(|ts| round_to_hour(*ts)).collect(),
            values: self.values.clone(),
        }
    }
}

/// Round a timestamp to the nearest whole hour (half rounds up).
pub fn round_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    let shifted = ts + Duration::minutes(30);
    let secs = shifted.timestamp();
    let floored = secs - secs.rem_euclid(3600);
    DateTime::from_timestamp(floored, 0).unwrap_or(ts)
}

/// Hourly meteorological series for one location: direct normal irradiance
/// (W/m2) and ambient temperature (degC).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeteoSeries {
    pub timestamps: Vec<DateTime<Utc>>,
    pub dni: Vec<f64>,
    pub temperature: Vec<f64>,
}

impl MeteoSeries {
    pub fn len(&self) -> usize {
        self.dni.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dni.is_empty()
    }

    /// Re-stamp every timestamp into `year`, preserving month, day, hour and
    /// minute. TMY hours come from different source years; the model reports
    /// them all under the requested one.
    pub fn restamped_to_year(&self, year: i32) -> Result<Self, SeriesError> {
        let mut timestamps = Vec::with_capacity(self.timestamps.len());
        for ts in &self.timestamps {
            let date = NaiveDate::from_ymd_opt(year, ts.month(), ts.day()).ok_or(
                SeriesError::InvalidDate {
                    year,
                    month: ts.month(),
                    day: ts.day(),
                },
            )?;
            let stamped = date
                .and_hms_opt(ts.hour(), ts.minute(), 0)
                .ok_or(SeriesError::InvalidDate {
                    year,
                    month: ts.month(),
                    day: ts.day(),
                })?;
            timestamps.push(stamped.and_utc());
        }
        Ok(Self {
            timestamps,
            dni: self.dni.clone(),
            temperature: self.temperature.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn blend_weights_both_series() {
        let a = HourlySeries::new(vec![ts(2019, 1, 1, 0, 0)], vec![10.0]);
        let b = HourlySeries::new(vec![ts(2019, 1, 1, 0, 0)], vec![2.0]);
        let blended = HourlySeries::blend(&a, &b, 0.6);
        assert_relative_eq!(blended.values[0], 0.6 * 10.0 + 0.4 * 2.0);
    }

    #[test]
    fn sum_pairwise_adds_values_in_place() {
        let a = HourlySeries::new(vec![ts(2019, 1, 1, 0, 0); 2], vec![1.0, 2.0]);
        let b = HourlySeries::new(vec![ts(2019, 1, 1, 0, 0); 2], vec![3.0, 4.0]);
        let sum = HourlySeries::sum_pairwise(&[a, b]);
        assert_eq!(sum.values, vec![4.0, 6.0]);
    }

    #[test]
    fn sum_pairwise_of_nothing_is_empty() {
        assert!(HourlySeries::sum_pairwise(&[]).is_empty());
    }

    #[test]
    fn rounds_sarah_minute_offsets_to_whole_hours() {
        assert_eq!(round_to_hour(ts(2019, 6, 1, 11, 10)), ts(2019, 6, 1, 11, 0));
        assert_eq!(round_to_hour(ts(2019, 6, 1, 11, 40)), ts(2019, 6, 1, 12, 0));
    }

    #[test]
    fn restamp_preserves_month_day_hour() {
        let meteo = MeteoSeries {
            timestamps: vec![ts(2007, 3, 15, 13, 0)],
            dni: vec![800.0],
            temperature: vec![21.5],
        };
        let restamped = meteo.restamped_to_year(2019).unwrap();
        assert_eq!(restamped.timestamps[0], ts(2019, 3, 15, 13, 0));
        assert_eq!(restamped.dni, meteo.dni);
    }

    #[test]
    fn restamp_rejects_leap_day_in_common_year() {
        let meteo = MeteoSeries {
            timestamps: vec![ts(2008, 2, 29, 0, 0)],
            dni: vec![0.0],
            temperature: vec![0.0],
        };
        assert!(meteo.restamped_to_year(2019).is_err());
    }
}
