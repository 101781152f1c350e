use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use meteoflow_core::RawRecord;

/// Wire shape of an Open-Meteo forecast response (fields we consume).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub daily: DailyBlock,
}

/// Column-oriented daily block: parallel arrays indexed by forecast day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Zip the parallel arrays into one raw record per forecast day.
///
/// Upstream nulls and short arrays become `None` fields; unparseable
/// dates likewise. The validator decides what survives.
pub fn parse_forecast(response: &ForecastResponse) -> Vec<RawRecord> {
    let daily = &response.daily;

    let records: Vec<RawRecord> = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| RawRecord {
            date: NaiveDate::parse_from_str(time, "%Y-%m-%d").ok(),
            temperature_max: column(&daily.temperature_2m_max, i),
            temperature_min: column(&daily.temperature_2m_min, i),
            precipitation: column(&daily.precipitation_sum, i),
            wind_speed: column(&daily.wind_speed_10m_max, i),
        })
        .collect();

    debug!(rows = records.len(), "parsed forecast response");
    records
}

fn column(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}
