//! Open-Meteo extraction client.
//!
//! Fetches the daily forecast for a fixed location and parses the
//! column-oriented response into raw records. Parsing is lenient: gaps in
//! the upstream arrays become `None` fields and the validator downstream
//! decides what to drop.

pub mod client;
pub mod parse;

pub use client::OpenMeteoClient;
pub use parse::parse_forecast;

/// Errors from extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Status(reqwest::StatusCode),
}
