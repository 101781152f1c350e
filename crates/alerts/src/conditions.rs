use chrono::NaiveDate;

use meteoflow_core::{AlertResult, Severity, WeatherRecord};

/// A named rule evaluated against a clean record set.
///
/// Implementations are pure: no state across evaluations, results in row
/// order, and only triggering rows produce output. Severity is fixed per
/// condition at construction time.
pub trait Condition: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, records: &[WeatherRecord]) -> Vec<AlertResult>;
}

fn row_result(
    name: &str,
    severity: Severity,
    message: String,
    value: f64,
    threshold: f64,
    date: NaiveDate,
) -> AlertResult {
    AlertResult {
        condition_name: name.to_string(),
        triggered: true,
        message,
        severity,
        value: Some(value),
        threshold: Some(threshold),
        date: Some(date),
    }
}

/// Triggers per row where `temperature_max` exceeds the threshold.
pub struct MaxTemperatureExceeds {
    pub threshold: f64,
}

impl Condition for MaxTemperatureExceeds {
    fn name(&self) -> &str {
        "max_temperature_exceeds"
    }

    fn evaluate(&self, records: &[WeatherRecord]) -> Vec<AlertResult> {
        records
            .iter()
            .filter(|r| r.temperature_max > self.threshold)
            .map(|r| {
                row_result(
                    self.name(),
                    Severity::Warning,
                    format!(
                        "max temperature {:.1}°C on {} exceeds {:.1}°C",
                        r.temperature_max, r.date, self.threshold
                    ),
                    r.temperature_max,
                    self.threshold,
                    r.date,
                )
            })
            .collect()
    }
}

/// Triggers per row where `temperature_min` falls below the threshold.
pub struct MinTemperatureBelow {
    pub threshold: f64,
}

impl Condition for MinTemperatureBelow {
    fn name(&self) -> &str {
        "min_temperature_below"
    }

    fn evaluate(&self, records: &[WeatherRecord]) -> Vec<AlertResult> {
        records
            .iter()
            .filter(|r| r.temperature_min < self.threshold)
            .map(|r| {
                row_result(
                    self.name(),
                    Severity::Warning,
                    format!(
                        "min temperature {:.1}°C on {} is below {:.1}°C",
                        r.temperature_min, r.date, self.threshold
                    ),
                    r.temperature_min,
                    self.threshold,
                    r.date,
                )
            })
            .collect()
    }
}

/// Triggers per row where `precipitation` exceeds the threshold.
pub struct PrecipitationExceeds {
    pub threshold: f64,
}

impl Condition for PrecipitationExceeds {
    fn name(&self) -> &str {
        "precipitation_exceeds"
    }

    fn evaluate(&self, records: &[WeatherRecord]) -> Vec<AlertResult> {
        records
            .iter()
            .filter(|r| r.precipitation > self.threshold)
            .map(|r| {
                row_result(
                    self.name(),
                    Severity::Warning,
                    format!(
                        "precipitation {:.1}mm on {} exceeds {:.1}mm",
                        r.precipitation, r.date, self.threshold
                    ),
                    r.precipitation,
                    self.threshold,
                    r.date,
                )
            })
            .collect()
    }
}

/// Triggers per row where `wind_speed` exceeds the threshold.
pub struct WindExceeds {
    pub threshold: f64,
}

impl Condition for WindExceeds {
    fn name(&self) -> &str {
        "wind_exceeds"
    }

    fn evaluate(&self, records: &[WeatherRecord]) -> Vec<AlertResult> {
        records
            .iter()
            .filter(|r| r.wind_speed > self.threshold)
            .map(|r| {
                row_result(
                    self.name(),
                    Severity::Warning,
                    format!(
                        "wind speed {:.1} on {} exceeds {:.1}",
                        r.wind_speed, r.date, self.threshold
                    ),
                    r.wind_speed,
                    self.threshold,
                    r.date,
                )
            })
            .collect()
    }
}

/// Single-shot condition: triggers once when the newest forecast day is
/// older than the allowed window relative to `as_of`.
///
/// `as_of` is injected at construction rather than read from the clock so
/// evaluation stays deterministic and testable.
pub struct StaleData {
    pub max_age_days: i64,
    pub as_of: NaiveDate,
}

impl Condition for StaleData {
    fn name(&self) -> &str {
        "stale_data"
    }

    fn evaluate(&self, records: &[WeatherRecord]) -> Vec<AlertResult> {
        let Some(newest) = records.iter().map(|r| r.date).max() else {
            return Vec::new();
        };

        let age_days = (self.as_of - newest).num_days();
        if age_days <= self.max_age_days {
            return Vec::new();
        }

        vec![AlertResult {
            condition_name: self.name().to_string(),
            triggered: true,
            message: format!(
                "newest forecast day {newest} is {age_days} days old (allowed: {})",
                self.max_age_days
            ),
            severity: Severity::Critical,
            value: Some(age_days as f64),
            threshold: Some(self.max_age_days as f64),
            date: Some(newest),
        }]
    }
}
