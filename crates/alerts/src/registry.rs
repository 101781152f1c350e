use chrono::NaiveDate;
use tracing::warn;

use meteoflow_core::config::Settings;
use meteoflow_core::{AlertResult, WeatherRecord};

use crate::conditions::{
    Condition, MaxTemperatureExceeds, MinTemperatureBelow, PrecipitationExceeds, StaleData,
    WindExceeds,
};

struct Entry {
    enabled: bool,
    condition: Box<dyn Condition>,
}

/// Ordered collection of conditions evaluated as a batch.
///
/// Registration order is evaluation order, and results concatenate in that
/// order (rows within a condition stay in row order), so identical inputs
/// always produce identically-ordered findings. Disabled conditions are
/// skipped entirely rather than producing placeholder results.
#[derive(Default)]
pub struct ConditionRegistry {
    entries: Vec<Entry>,
}

impl ConditionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an enabled condition.
    pub fn register(&mut self, condition: Box<dyn Condition>) {
        self.entries.push(Entry {
            enabled: true,
            condition,
        });
    }

    /// Append a condition with an explicit enable flag.
    pub fn register_with_enabled(&mut self, condition: Box<dyn Condition>, enabled: bool) {
        self.entries.push(Entry { enabled, condition });
    }

    /// Number of enabled conditions.
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }

    /// Evaluate every enabled condition against the record set.
    pub fn evaluate_all(&self, records: &[WeatherRecord]) -> Vec<AlertResult> {
        let mut results = Vec::new();
        for entry in &self.entries {
            if !entry.enabled {
                continue;
            }
            let findings = entry.condition.evaluate(records);
            for finding in &findings {
                warn!(
                    condition = finding.condition_name,
                    severity = %finding.severity,
                    "alert triggered: {}",
                    finding.message
                );
            }
            results.extend(findings);
        }
        results
    }
}

/// Build the standard registry from settings.
///
/// `as_of` anchors the staleness check, normally today's date.
pub fn default_registry(settings: &Settings, as_of: NaiveDate) -> ConditionRegistry {
    let t = &settings.thresholds;
    let mut registry = ConditionRegistry::new();
    registry.register(Box::new(MaxTemperatureExceeds { threshold: t.temp_max }));
    registry.register(Box::new(MinTemperatureBelow { threshold: t.temp_min }));
    registry.register(Box::new(PrecipitationExceeds {
        threshold: t.precipitation,
    }));
    registry.register(Box::new(WindExceeds {
        threshold: t.wind_speed,
    }));
    registry.register(Box::new(StaleData {
        max_age_days: t.max_age_days,
        as_of,
    }));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteoflow_core::Severity;

    fn record(day: u32, max: f64, min: f64) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            temperature_max: max,
            temperature_min: min,
            precipitation: 0.0,
            wind_speed: 10.0,
            temperature_mean: None,
            temperature_category: None,
        }
    }

    struct FixedCondition {
        name: &'static str,
        count: usize,
    }

    impl Condition for FixedCondition {
        fn name(&self) -> &str {
            self.name
        }

        fn evaluate(&self, _records: &[WeatherRecord]) -> Vec<AlertResult> {
            (0..self.count)
                .map(|i| AlertResult {
                    condition_name: self.name.to_string(),
                    triggered: true,
                    message: format!("{} #{i}", self.name),
                    severity: Severity::Info,
                    value: None,
                    threshold: None,
                    date: None,
                })
                .collect()
        }
    }

    #[test]
    fn results_follow_registration_order() {
        let mut registry = ConditionRegistry::new();
        registry.register(Box::new(FixedCondition { name: "a", count: 2 }));
        registry.register(Box::new(FixedCondition { name: "b", count: 1 }));

        let results = registry.evaluate_all(&[]);
        let names: Vec<&str> = results.iter().map(|r| r.condition_name.as_str()).collect();
        assert_eq!(names, vec!["a", "a", "b"]);
    }

    #[test]
    fn disabled_conditions_are_skipped() {
        let mut registry = ConditionRegistry::new();
        registry.register_with_enabled(Box::new(FixedCondition { name: "off", count: 5 }), false);
        registry.register(Box::new(FixedCondition { name: "on", count: 1 }));

        let results = registry.evaluate_all(&[]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].condition_name, "on");
        assert_eq!(registry.enabled_count(), 1);
    }

    #[test]
    fn result_count_is_sum_of_triggering_rows() {
        let records = vec![
            record(18, 38.0, -15.0), // trips both
            record(19, 25.0, 5.0),   // trips neither
            record(20, 36.0, 2.0),   // trips max only
        ];
        let mut registry = ConditionRegistry::new();
        registry.register(Box::new(MaxTemperatureExceeds { threshold: 35.0 }));
        registry.register(Box::new(MinTemperatureBelow { threshold: -10.0 }));

        let results = registry.evaluate_all(&records);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].condition_name, "max_temperature_exceeds");
        assert_eq!(results[2].condition_name, "min_temperature_below");
    }

    #[test]
    fn empty_registry_produces_no_results() {
        let registry = ConditionRegistry::new();
        assert!(registry.evaluate_all(&[record(18, 38.0, 20.0)]).is_empty());
    }

    #[test]
    fn default_registry_covers_all_five_conditions() {
        use meteoflow_core::config::*;
        use std::path::PathBuf;

        let settings = Settings {
            location: LocationConfig {
                name: "Paris".into(),
                latitude: 48.8566,
                longitude: 2.3522,
            },
            thresholds: AlertThresholds {
                temp_max: 35.0,
                temp_min: -10.0,
                precipitation: 50.0,
                wind_speed: 80.0,
                max_age_days: 2,
            },
            categories: CategoryThresholds { heat: 30.0, cold: 5.0 },
            plausibility: PlausibilityBounds::default(),
            channels: ChannelConfig {
                alert_enabled: true,
                slack_webhook_url: None,
                discord_webhook_url: None,
                push_topic: None,
                email_enabled: false,
                smtp_host: "smtp.example.com".into(),
                smtp_port: 587,
                email_from: None,
                email_to: Vec::new(),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("./data"),
                archive_after_days: 30,
            },
        };

        let as_of = NaiveDate::from_ymd_opt(2026, 2, 21).unwrap();
        let registry = default_registry(&settings, as_of);
        assert_eq!(registry.enabled_count(), 5);

        // One extreme row trips everything row-scoped, and the set is stale.
        let extreme = WeatherRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
            temperature_max: 40.0,
            temperature_min: -20.0,
            precipitation: 60.0,
            wind_speed: 95.0,
            temperature_mean: None,
            temperature_category: None,
        };
        let results = registry.evaluate_all(&[extreme]);

        let names: Vec<&str> = results.iter().map(|r| r.condition_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "max_temperature_exceeds",
                "min_temperature_below",
                "precipitation_exceeds",
                "wind_exceeds",
                "stale_data"
            ]
        );
    }
}
