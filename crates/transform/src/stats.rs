use chrono::NaiveDate;
use serde::Serialize;

use meteoflow_core::WeatherRecord;

/// Summary statistics over a clean record set, used for run logging.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyStats {
    pub record_count: usize,
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub temp_max_overall: f64,
    pub temp_min_overall: f64,
    pub precipitation_total: f64,
    pub wind_speed_max: f64,
}

/// Compute summary stats. Returns `None` for an empty set.
pub fn compute_daily_stats(records: &[WeatherRecord]) -> Option<DailyStats> {
    let first = records.first()?;

    let mut stats = DailyStats {
        record_count: records.len(),
        date_min: first.date,
        date_max: first.date,
        temp_max_overall: first.temperature_max,
        temp_min_overall: first.temperature_min,
        precipitation_total: 0.0,
        wind_speed_max: first.wind_speed,
    };

    for record in records {
        stats.date_min = stats.date_min.min(record.date);
        stats.date_max = stats.date_max.max(record.date);
        stats.temp_max_overall = stats.temp_max_overall.max(record.temperature_max);
        stats.temp_min_overall = stats.temp_min_overall.min(record.temperature_min);
        stats.precipitation_total += record.precipitation;
        stats.wind_speed_max = stats.wind_speed_max.max(record.wind_speed);
    }

    Some(stats)
}
