//! Record set <-> Arrow/Parquet conversion.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::debug;

use meteoflow_core::WeatherRecord;

use crate::error::StorageError;

/// Parquet schema for a forecast record set.
///
/// Dates are stored as ISO-8601 strings; the derived fields are nullable
/// because raw snapshots are written before enrichment.
fn record_schema() -> Schema {
    Schema::new(vec![
        Field::new("date", DataType::Utf8, false),
        Field::new("temperature_max", DataType::Float64, false),
        Field::new("temperature_min", DataType::Float64, false),
        Field::new("precipitation", DataType::Float64, false),
        Field::new("wind_speed", DataType::Float64, false),
        Field::new("temperature_mean", DataType::Float64, true),
        Field::new("temperature_category", DataType::Utf8, true),
    ])
}

/// Convert records into a single Arrow [`RecordBatch`].
pub fn records_to_batch(records: &[WeatherRecord]) -> Result<RecordBatch, StorageError> {
    let schema = Arc::new(record_schema());

    let dates: StringArray = records.iter().map(|r| Some(r.date.to_string())).collect();
    let temp_max: Float64Array = records.iter().map(|r| Some(r.temperature_max)).collect();
    let temp_min: Float64Array = records.iter().map(|r| Some(r.temperature_min)).collect();
    let precipitation: Float64Array = records.iter().map(|r| Some(r.precipitation)).collect();
    let wind_speed: Float64Array = records.iter().map(|r| Some(r.wind_speed)).collect();
    let temp_mean: Float64Array = records.iter().map(|r| r.temperature_mean).collect();
    let category: StringArray = records
        .iter()
        .map(|r| r.temperature_category.map(|c| c.to_string()))
        .collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(dates),
            Arc::new(temp_max),
            Arc::new(temp_min),
            Arc::new(precipitation),
            Arc::new(wind_speed),
            Arc::new(temp_mean),
            Arc::new(category),
        ],
    )?;
    Ok(batch)
}

/// Write records to a Parquet file at the given path (zstd compression).
pub fn write_records(records: &[WeatherRecord], path: &Path) -> Result<u64, StorageError> {
    let batch = records_to_batch(records)?;
    let row_count = batch.num_rows() as u64;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(Default::default()))
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    debug!(path = %path.display(), rows = row_count, "wrote parquet file");
    Ok(row_count)
}

/// Read a Parquet file written by [`write_records`] back into records.
pub fn read_records(path: &Path) -> Result<Vec<WeatherRecord>, StorageError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let dates = string_column(&batch, "date")?;
        let temp_max = float_column(&batch, "temperature_max")?;
        let temp_min = float_column(&batch, "temperature_min")?;
        let precipitation = float_column(&batch, "precipitation")?;
        let wind_speed = float_column(&batch, "wind_speed")?;
        let temp_mean = float_column(&batch, "temperature_mean")?;
        let category = string_column(&batch, "temperature_category")?;

        for i in 0..batch.num_rows() {
            let date = dates.value(i).parse().map_err(|e| {
                StorageError::Malformed(format!("bad date '{}': {e}", dates.value(i)))
            })?;

            let temperature_category = if category.is_null(i) {
                None
            } else {
                Some(
                    category
                        .value(i)
                        .parse()
                        .map_err(StorageError::Malformed)?,
                )
            };

            records.push(WeatherRecord {
                date,
                temperature_max: temp_max.value(i),
                temperature_min: temp_min.value(i),
                precipitation: precipitation.value(i),
                wind_speed: wind_speed.value(i),
                temperature_mean: if temp_mean.is_null(i) {
                    None
                } else {
                    Some(temp_mean.value(i))
                },
                temperature_category,
            });
        }
    }

    Ok(records)
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a StringArray, StorageError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| StorageError::Malformed(format!("missing string column '{name}'")))
}

fn float_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, StorageError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| StorageError::Malformed(format!("missing float column '{name}'")))
}
