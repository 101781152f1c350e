//! End-to-end flow: raw records through transform, condition checks, and
//! dispatch, with per-channel failures isolated.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use meteoflow_alerts::{ConditionRegistry, MaxTemperatureExceeds, StaleData};
use meteoflow_core::config::{CategoryThresholds, PlausibilityBounds};
use meteoflow_core::{AlertResult, RawRecord, Severity, TemperatureCategory};
use meteoflow_notify::{Dispatcher, Notifier, NotifyError};
use meteoflow_transform::{transform, TransformConfig, TransformError};

struct CountingNotifier {
    name: &'static str,
    calls: Arc<AtomicUsize>,
    should_fail: bool,
}

#[async_trait::async_trait]
impl Notifier for CountingNotifier {
    async fn send(&self, _results: &[AlertResult], _location: &str) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            Err(NotifyError::Smtp("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn channel_name(&self) -> &str {
        self.name
    }
}

fn config() -> TransformConfig {
    TransformConfig {
        bounds: PlausibilityBounds::default(),
        categories: CategoryThresholds {
            heat: 30.0,
            cold: 5.0,
        },
    }
}

fn raw(day: u32, max: f64, min: f64, precip: f64) -> RawRecord {
    RawRecord {
        date: NaiveDate::from_ymd_opt(2026, 2, day),
        temperature_max: Some(max),
        temperature_min: Some(min),
        precipitation: Some(precip),
        wind_speed: Some(10.0),
    }
}

#[tokio::test]
async fn hot_day_flows_to_every_channel() {
    // One 38°C day with a 35°C alert threshold.
    let (records, _) = transform(vec![raw(18, 38.0, 20.0, 0.0)], &config()).unwrap();
    assert_eq!(records[0].temperature_mean, Some(29.0));
    assert_eq!(records[0].temperature_category, Some(TemperatureCategory::Hot));

    let mut registry = ConditionRegistry::new();
    registry.register(Box::new(MaxTemperatureExceeds { threshold: 35.0 }));
    let findings = registry.evaluate_all(&records);

    assert_eq!(findings.len(), 1);
    assert!(findings[0].triggered);
    assert_eq!(findings[0].severity, Severity::Warning);

    let ok_calls = Arc::new(AtomicUsize::new(0));
    let fail_calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = Dispatcher::new(vec![
        Box::new(CountingNotifier {
            name: "broken",
            calls: fail_calls.clone(),
            should_fail: true,
        }),
        Box::new(CountingNotifier {
            name: "healthy",
            calls: ok_calls.clone(),
            should_fail: false,
        }),
    ]);

    let outcomes = dispatcher.dispatch(&findings, "Paris").await;

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].success);
    assert!(outcomes[0].error.as_deref().unwrap().contains("connection refused"));
    assert!(outcomes[1].success);
    assert_eq!(fail_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ok_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fully_rejected_input_never_reaches_dispatch() {
    // Every row has negative precipitation, so validation drops them all.
    let input = vec![raw(18, 12.0, 5.0, -5.0), raw(19, 14.0, 6.0, -5.0)];

    let err = transform(input, &config()).unwrap_err();
    assert!(matches!(err, TransformError::AllRowsRejected { .. }));
    // The caller aborts here; nothing is stored and nothing is dispatched.
}

#[tokio::test]
async fn quiet_run_skips_channels_entirely() {
    let (records, _) = transform(vec![raw(18, 20.0, 10.0, 0.0)], &config()).unwrap();

    let mut registry = ConditionRegistry::new();
    registry.register(Box::new(MaxTemperatureExceeds { threshold: 35.0 }));
    registry.register(Box::new(StaleData {
        max_age_days: 2,
        as_of: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
    }));
    let findings = registry.evaluate_all(&records);
    assert!(findings.is_empty());

    let calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = Dispatcher::new(vec![Box::new(CountingNotifier {
        name: "idle",
        calls: calls.clone(),
        should_fail: false,
    })]);

    let outcomes = dispatcher.dispatch(&findings, "Paris").await;
    assert!(outcomes.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
