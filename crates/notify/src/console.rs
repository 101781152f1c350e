//! Console channel: logs findings via tracing. Used as the fallback when
//! no real channel is configured, and for dry runs.

use tracing::info;

use meteoflow_core::AlertResult;

use crate::traits::{render_line, Notifier, NotifyError};

/// Prints findings to the log. Never fails.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, results: &[AlertResult], location: &str) -> Result<(), NotifyError> {
        info!("{}", "=".repeat(50));
        info!("ALERTS FOR {}", location.to_uppercase());
        info!("{}", "=".repeat(50));
        for result in results {
            info!("{}", render_line(result));
        }
        info!("{}", "=".repeat(50));
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "console"
    }
}
