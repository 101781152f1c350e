/// Errors from parquet persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Arrow conversion error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No stored file found matching '{0}'")]
    NotFound(String),

    #[error("Stored data is malformed: {0}")]
    Malformed(String),
}
