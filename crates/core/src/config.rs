use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_f64(key: &str, default: f64) -> f64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_i64(key: &str, default: i64) -> i64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env_opt(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

// ── Top-level settings ────────────────────────────────────────

/// All pipeline configuration, loaded once from the environment and
/// passed explicitly into each stage. Stages never read env themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub location: LocationConfig,
    pub thresholds: AlertThresholds,
    pub categories: CategoryThresholds,
    pub plausibility: PlausibilityBounds,
    pub channels: ChannelConfig,
    pub storage: StorageConfig,
}

impl Settings {
    /// Build settings from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            location: LocationConfig::from_env(),
            thresholds: AlertThresholds::from_env(),
            categories: CategoryThresholds::from_env(),
            plausibility: PlausibilityBounds::from_env(),
            channels: ChannelConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

/// The fixed location the pipeline forecasts for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationConfig {
    fn from_env() -> Self {
        Self {
            name: env_or("LOCATION_NAME", "Paris"),
            latitude: env_f64("LATITUDE", 48.8566),
            longitude: env_f64("LONGITUDE", 2.3522),
        }
    }
}

/// Numeric trigger thresholds for the alert conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Trigger when a day's max temperature exceeds this (°C).
    pub temp_max: f64,
    /// Trigger when a day's min temperature falls below this (°C).
    pub temp_min: f64,
    /// Trigger when a day's precipitation sum exceeds this (mm).
    pub precipitation: f64,
    /// Trigger when a day's max wind speed exceeds this (km/h).
    pub wind_speed: f64,
    /// Trigger when the newest forecast day is older than this many days.
    pub max_age_days: i64,
}

impl AlertThresholds {
    fn from_env() -> Self {
        Self {
            temp_max: env_f64("TEMP_MAX_THRESHOLD", 35.0),
            temp_min: env_f64("TEMP_MIN_THRESHOLD", -10.0),
            precipitation: env_f64("PRECIPITATION_THRESHOLD", 50.0),
            wind_speed: env_f64("WIND_THRESHOLD", 80.0),
            max_age_days: env_i64("STALENESS_MAX_AGE_DAYS", 2),
        }
    }
}

/// Bucket boundaries for the derived temperature category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryThresholds {
    /// temperature_max at or above this is "hot" (°C).
    pub heat: f64,
    /// temperature_min at or below this is "cold" (°C).
    pub cold: f64,
}

impl CategoryThresholds {
    fn from_env() -> Self {
        Self {
            heat: env_f64("CATEGORY_HEAT_THRESHOLD", 30.0),
            cold: env_f64("CATEGORY_COLD_THRESHOLD", 5.0),
        }
    }
}

/// Physically plausible temperature range; readings outside are dropped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlausibilityBounds {
    pub temp_floor: f64,
    pub temp_ceiling: f64,
}

impl PlausibilityBounds {
    fn from_env() -> Self {
        Self {
            temp_floor: env_f64("PLAUSIBLE_TEMP_FLOOR", -90.0),
            temp_ceiling: env_f64("PLAUSIBLE_TEMP_CEILING", 60.0),
        }
    }
}

impl Default for PlausibilityBounds {
    fn default() -> Self {
        Self {
            temp_floor: -90.0,
            temp_ceiling: 60.0,
        }
    }
}

/// Notification channel addressing and enable flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Master switch; when false no dispatch happens at all.
    pub alert_enabled: bool,
    pub slack_webhook_url: Option<String>,
    pub discord_webhook_url: Option<String>,
    /// ntfy.sh topic for push notifications.
    pub push_topic: Option<String>,
    pub email_enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub email_from: Option<String>,
    pub email_to: Vec<String>,
}

impl ChannelConfig {
    fn from_env() -> Self {
        let email_to = env_opt("EMAIL_TO")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            alert_enabled: env_bool("ALERT_ENABLED", true),
            slack_webhook_url: env_opt("SLACK_WEBHOOK_URL"),
            discord_webhook_url: env_opt("DISCORD_WEBHOOK_URL"),
            push_topic: env_opt("PUSH_NOTIFICATION_TOPIC"),
            email_enabled: env_bool("EMAIL_ENABLED", false),
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env_u16("SMTP_PORT", 587),
            email_from: env_opt("EMAIL_FROM"),
            email_to,
        }
    }
}

/// Where parquet output lands on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Files older than this many days get moved to the archive.
    pub archive_after_days: i64,
}

impl StorageConfig {
    fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(env_or("DATA_DIR", "./data")),
            archive_after_days: env_i64("ARCHIVE_AFTER_DAYS", 30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plausibility_defaults_cover_earth_extremes() {
        let bounds = PlausibilityBounds::default();
        assert!(bounds.temp_floor <= -89.2); // Vostok record low
        assert!(bounds.temp_ceiling >= 56.7); // Death Valley record high
    }

    #[test]
    fn email_to_splits_on_commas() {
        std::env::set_var("EMAIL_TO", "a@example.com, b@example.com,");
        let channels = ChannelConfig::from_env();
        assert_eq!(channels.email_to, vec!["a@example.com", "b@example.com"]);
        std::env::remove_var("EMAIL_TO");
    }
}
