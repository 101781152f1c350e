use tracing::info;

use meteoflow_core::config::{CategoryThresholds, PlausibilityBounds, Settings};
use meteoflow_core::{RawRecord, WeatherRecord};

use crate::enricher::enrich;
use crate::error::TransformError;
use crate::validator::{validate, ValidationReport};

/// Tunables for the transform stages, carved out of [`Settings`] so tests
/// and callers can construct them without a full environment.
#[derive(Debug, Clone, Copy)]
pub struct TransformConfig {
    pub bounds: PlausibilityBounds,
    pub categories: CategoryThresholds,
}

impl From<&Settings> for TransformConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            bounds: settings.plausibility,
            categories: settings.categories,
        }
    }
}

/// Run validation then enrichment over a raw record set.
///
/// Returns the clean, enriched records together with the validation report.
/// Fails only when validation rejects every row; partially-dropped input is
/// normal operation and shows up in the report.
pub fn transform(
    raw: Vec<RawRecord>,
    config: &TransformConfig,
) -> Result<(Vec<WeatherRecord>, ValidationReport), TransformError> {
    if raw.is_empty() {
        return Err(TransformError::EmptyInput);
    }

    let (validated, report) = validate(raw, &config.bounds);

    if validated.is_empty() {
        return Err(TransformError::AllRowsRejected {
            input_rows: report.input_rows,
            report,
        });
    }

    let enriched = enrich(validated, &config.categories);
    info!(rows = enriched.len(), "transform complete");

    Ok((enriched, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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

    #[test]
    fn transform_validates_and_enriches() {
        let (records, report) =
            transform(vec![raw(18, 38.0, 20.0, 0.0)], &config()).unwrap();
        assert_eq!(report.output_rows, 1);
        assert_eq!(records[0].temperature_mean, Some(29.0));
        assert_eq!(
            records[0].temperature_category.unwrap().to_string(),
            "hot"
        );
    }

    #[test]
    fn all_rows_rejected_is_an_error() {
        let input = vec![raw(18, 12.0, 5.0, -5.0), raw(19, 14.0, 6.0, -5.0)];
        let err = transform(input, &config()).unwrap_err();
        match err {
            TransformError::AllRowsRejected { input_rows, report } => {
                assert_eq!(input_rows, 2);
                assert_eq!(report.dropped_implausible, 2);
            }
            other => panic!("expected AllRowsRejected, got: {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            transform(Vec::new(), &config()),
            Err(TransformError::EmptyInput)
        ));
    }

    #[test]
    fn partial_drop_still_succeeds() {
        let mut bad = raw(19, 15.0, 7.5, 0.0);
        bad.temperature_max = None;
        let (records, report) =
            transform(vec![raw(18, 12.5, 5.0, 0.0), bad], &config()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(report.dropped_null_mandatory, 1);
    }

    #[test]
    fn transform_is_idempotent_on_clean_data() {
        let input = vec![
            raw(18, 12.5, 5.0, 0.0),
            raw(19, 38.0, 20.0, 5.2),
            raw(20, 10.0, 2.0, 12.5),
        ];
        let (once, _) = transform(input, &config()).unwrap();

        let reinput: Vec<RawRecord> = once.iter().map(RawRecord::from).collect();
        let (twice, report) = transform(reinput, &config()).unwrap();

        assert_eq!(report.dropped_total(), 0);
        assert_eq!(once, twice);
    }
}
