use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tracing::{info, warn};

use meteoflow_core::WeatherRecord;

use crate::error::StorageError;
use crate::parquet_io::{read_records, write_records};

/// Handles parquet storage under a base directory.
pub struct Storage {
    raw_path: PathBuf,
    processed_path: PathBuf,
    archive_path: PathBuf,
}

impl Storage {
    /// Create the storage layout, making `raw/`, `processed/`, and
    /// `archive/` under the base directory.
    pub fn new(base_path: &Path) -> Result<Self, StorageError> {
        let storage = Self {
            raw_path: base_path.join("raw"),
            processed_path: base_path.join("processed"),
            archive_path: base_path.join("archive"),
        };
        for path in [&storage.raw_path, &storage.processed_path, &storage.archive_path] {
            std::fs::create_dir_all(path)?;
        }
        Ok(storage)
    }

    /// Save a per-run snapshot with a timestamp in the filename.
    pub fn save_raw(
        &self,
        records: &[WeatherRecord],
        source: &str,
    ) -> Result<PathBuf, StorageError> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filepath = self.raw_path.join(format!("{source}_{timestamp}.parquet"));

        write_records(records, &filepath)?;
        info!(path = %filepath.display(), rows = records.len(), "saved raw data");
        Ok(filepath)
    }

    /// Save (overwrite) the named processed output.
    pub fn save_processed(
        &self,
        records: &[WeatherRecord],
        name: &str,
    ) -> Result<PathBuf, StorageError> {
        let filepath = self.processed_path.join(format!("{name}.parquet"));

        write_records(records, &filepath)?;
        info!(path = %filepath.display(), rows = records.len(), "saved processed data");
        Ok(filepath)
    }

    /// Load the most recently modified processed file whose name starts
    /// with `name`.
    pub fn load_latest(&self, name: &str) -> Result<Vec<WeatherRecord>, StorageError> {
        let mut newest: Option<(SystemTime, PathBuf)> = None;

        for entry in std::fs::read_dir(&self.processed_path)? {
            let entry = entry?;
            let path = entry.path();
            if !matches_prefix(&path, name) {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
                newest = Some((modified, path));
            }
        }

        let (_, path) = newest.ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        info!(path = %path.display(), "loading processed data");
        read_records(&path)
    }

    /// Move parquet files older than `days` from `raw/` and `processed/`
    /// into `archive/`. Returns the number of files moved.
    pub fn archive_old(&self, days: i64) -> Result<usize, StorageError> {
        let cutoff = SystemTime::now() - Duration::from_secs(days.max(0) as u64 * 24 * 60 * 60);
        let mut archived = 0;

        for dir in [&self.raw_path, &self.processed_path] {
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("parquet") {
                    continue;
                }
                let modified = entry.metadata()?.modified()?;
                if modified >= cutoff {
                    continue;
                }

                let Some(file_name) = path.file_name() else {
                    continue;
                };
                let dest = self.archive_path.join(file_name);
                match std::fs::rename(&path, &dest) {
                    Ok(()) => {
                        archived += 1;
                        info!(file = %path.display(), "archived");
                    }
                    Err(e) => warn!(file = %path.display(), error = %e, "failed to archive"),
                }
            }
        }

        Ok(archived)
    }
}

fn matches_prefix(path: &Path, name: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("parquet")
        && path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.starts_with(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            temperature_max: 12.5,
            temperature_min: 5.0,
            precipitation: 0.0,
            wind_speed: 25.0,
            temperature_mean: Some(8.8),
            temperature_category: None,
        }
    }

    #[test]
    fn new_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        Storage::new(dir.path()).unwrap();
        assert!(dir.path().join("raw").is_dir());
        assert!(dir.path().join("processed").is_dir());
        assert!(dir.path().join("archive").is_dir());
    }

    #[test]
    fn save_and_load_processed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let records = vec![record(18), record(19)];
        storage.save_processed(&records, "weather_processed").unwrap();

        let loaded = storage.load_latest("weather_processed").unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn load_latest_missing_name_errors() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        assert!(matches!(
            storage.load_latest("nothing"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn save_raw_is_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        let path = storage.save_raw(&[record(18)], "weather_forecast").unwrap();
        let stem = path.file_stem().unwrap().to_str().unwrap();
        assert!(stem.starts_with("weather_forecast_"));
        assert!(path.starts_with(dir.path().join("raw")));
    }

    #[test]
    fn archive_old_moves_only_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        storage.save_processed(&[record(18)], "fresh").unwrap();

        // Fresh files stay put with any positive cutoff.
        assert_eq!(storage.archive_old(30).unwrap(), 0);
        assert!(dir.path().join("processed/fresh.parquet").exists());

        // A zero-day cutoff archives everything already on disk.
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(storage.archive_old(0).unwrap(), 1);
        assert!(dir.path().join("archive/fresh.parquet").exists());
        assert!(!dir.path().join("processed/fresh.parquet").exists());
    }
}
