use meteoflow_core::config::CategoryThresholds;
use meteoflow_core::{TemperatureCategory, WeatherRecord};

/// Add derived fields to validated records.
///
/// Sets `temperature_mean` to (max + min) / 2 rounded to one decimal, and
/// `temperature_category` by threshold precedence: max at or above the heat
/// threshold wins ("hot"), then min at or below the cold threshold ("cold"),
/// otherwise "mild". Pure arithmetic over already-validated fields, so this
/// never fails; row order is preserved and re-enriching is a no-op.
pub fn enrich(
    records: Vec<WeatherRecord>,
    thresholds: &CategoryThresholds,
) -> Vec<WeatherRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.temperature_mean = Some(round1(
                (record.temperature_max + record.temperature_min) / 2.0,
            ));
            record.temperature_category = Some(categorize(&record, thresholds));
            record
        })
        .collect()
}

fn categorize(record: &WeatherRecord, thresholds: &CategoryThresholds) -> TemperatureCategory {
    if record.temperature_max >= thresholds.heat {
        TemperatureCategory::Hot
    } else if record.temperature_min <= thresholds.cold {
        TemperatureCategory::Cold
    } else {
        TemperatureCategory::Mild
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
