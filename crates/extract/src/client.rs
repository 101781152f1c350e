use std::time::Duration;

use tracing::info;

use crate::parse::ForecastResponse;
use crate::ExtractError;

const BASE_URL: &str = "https://api.open-meteo.com/v1";

const DAILY_VARIABLES: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Client for the Open-Meteo forecast API (free, no auth required).
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    client: reqwest::Client,
}

impl OpenMeteoClient {
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_base_url(BASE_URL.to_string())
    }

    /// Point the client at an alternate base URL (used by tests).
    pub fn with_base_url(base_url: String) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { base_url, client })
    }

    /// Fetch the daily forecast for the given coordinates.
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        forecast_days: u8,
    ) -> Result<ForecastResponse, ExtractError> {
        let url = format!("{}/forecast", self.base_url);

        info!(latitude, longitude, forecast_days, "fetching forecast");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", forecast_days.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status));
        }

        Ok(response.json().await?)
    }
}
