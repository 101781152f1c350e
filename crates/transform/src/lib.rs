//! Data cleaning and enrichment for forecast records.
//!
//! The pipeline is two pure stages composed by [`transform`]:
//! validation (drop nulls, duplicates, and implausible readings) followed
//! by enrichment (derive mean temperature and a category bucket). Both
//! stages take their tunables from an explicit [`TransformConfig`].

pub mod enricher;
pub mod error;
pub mod pipeline;
pub mod stats;
pub mod validator;

pub use enricher::enrich;
pub use error::TransformError;
pub use pipeline::{transform, TransformConfig};
pub use stats::{compute_daily_stats, DailyStats};
pub use validator::{validate, ValidationReport};
