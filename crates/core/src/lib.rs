pub mod alert;
pub mod config;
pub mod record;

pub use alert::*;
pub use config::Settings;
pub use record::*;
