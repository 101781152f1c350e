//! Parquet persistence for forecast record sets.
//!
//! Layout under the data directory: `raw/` for timestamped per-run
//! snapshots, `processed/` for the latest named output, `archive/` for
//! aged-out files.

pub mod error;
pub mod parquet_io;
pub mod store;

pub use error::StorageError;
pub use store::Storage;
