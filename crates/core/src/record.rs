use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast row as it arrives from extraction. Any field may be
/// missing upstream, so everything is optional until validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub date: Option<NaiveDate>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// A validated forecast row. Mandatory fields are guaranteed present;
/// the derived fields are `None` until enrichment runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    /// Rainfall sum in mm, never negative.
    pub precipitation: f64,
    /// Daily max wind speed, never negative.
    pub wind_speed: f64,
    /// (max + min) / 2, rounded to one decimal. Set by enrichment.
    pub temperature_mean: Option<f64>,
    /// Categorical temperature bucket. Set by enrichment.
    pub temperature_category: Option<TemperatureCategory>,
}

/// Temperature bucket derived from the day's extremes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Hot,
    Cold,
    Mild,
}

impl std::fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TemperatureCategory::Hot => "hot",
            TemperatureCategory::Cold => "cold",
            TemperatureCategory::Mild => "mild",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TemperatureCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(TemperatureCategory::Hot),
            "cold" => Ok(TemperatureCategory::Cold),
            "mild" => Ok(TemperatureCategory::Mild),
            other => Err(format!("unknown temperature category: {other}")),
        }
    }
}

impl From<&WeatherRecord> for RawRecord {
    /// Project a validated record back to its raw shape. Used to feed
    /// pipeline output through the pipeline again (idempotence checks).
    fn from(record: &WeatherRecord) -> Self {
        RawRecord {
            date: Some(record.date),
            temperature_max: Some(record.temperature_max),
            temperature_min: Some(record.temperature_min),
            precipitation: Some(record.precipitation),
            wind_speed: Some(record.wind_speed),
        }
    }
}
