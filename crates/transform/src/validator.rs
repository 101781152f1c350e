use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use meteoflow_core::config::PlausibilityBounds;
use meteoflow_core::{RawRecord, WeatherRecord};

/// Side channel reporting what validation dropped and why.
///
/// Dropped rows are never an error by themselves; callers inspect the
/// report for logging. Only the pipeline turns "everything dropped"
/// into a hard failure.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ValidationReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub dropped_null_mandatory: usize,
    pub dropped_implausible: usize,
    pub dropped_duplicate_date: usize,
}

impl ValidationReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped_null_mandatory + self.dropped_implausible + self.dropped_duplicate_date
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} rows (null: {}, implausible: {}, duplicate: {})",
            self.input_rows,
            self.output_rows,
            self.dropped_null_mandatory,
            self.dropped_implausible,
            self.dropped_duplicate_date
        )
    }
}

/// Clean a raw record set.
///
/// Rows are dropped when a mandatory field (date, temperature_max,
/// temperature_min) is missing, when a temperature falls outside the
/// plausible range, when precipitation or wind speed is negative, or when
/// min exceeds max. Missing precipitation and wind speed are filled with
/// zero rather than dropped. Duplicate dates keep the first occurrence;
/// input order is preserved throughout.
pub fn validate(
    raw: Vec<RawRecord>,
    bounds: &PlausibilityBounds,
) -> (Vec<WeatherRecord>, ValidationReport) {
    let mut report = ValidationReport {
        input_rows: raw.len(),
        ..ValidationReport::default()
    };

    let mut seen_dates: HashSet<NaiveDate> = HashSet::new();
    let mut records = Vec::with_capacity(raw.len());

    for row in raw {
        let (date, temp_max, temp_min) =
            match (row.date, row.temperature_max, row.temperature_min) {
                (Some(d), Some(max), Some(min)) => (d, max, min),
                _ => {
                    report.dropped_null_mandatory += 1;
                    debug!(?row, "dropping row with null mandatory field");
                    continue;
                }
            };

        let precipitation = row.precipitation.unwrap_or(0.0);
        let wind_speed = row.wind_speed.unwrap_or(0.0);

        if !plausible(temp_max, temp_min, precipitation, wind_speed, bounds) {
            report.dropped_implausible += 1;
            debug!(%date, temp_max, temp_min, precipitation, wind_speed, "dropping implausible row");
            continue;
        }

        if !seen_dates.insert(date) {
            report.dropped_duplicate_date += 1;
            debug!(%date, "dropping duplicate date");
            continue;
        }

        records.push(WeatherRecord {
            date,
            temperature_max: temp_max,
            temperature_min: temp_min,
            precipitation,
            wind_speed,
            temperature_mean: None,
            temperature_category: None,
        });
    }

    report.output_rows = records.len();
    if report.dropped_total() > 0 {
        info!(%report, "validation dropped rows");
    }

    (records, report)
}

fn plausible(
    temp_max: f64,
    temp_min: f64,
    precipitation: f64,
    wind_speed: f64,
    bounds: &PlausibilityBounds,
) -> bool {
    let temp_in_range =
        |t: f64| t.is_finite() && t >= bounds.temp_floor && t <= bounds.temp_ceiling;

    temp_in_range(temp_max)
        && temp_in_range(temp_min)
        && temp_min <= temp_max
        && precipitation >= 0.0
        && wind_speed >= 0.0
}
