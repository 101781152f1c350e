use std::time::Duration;

use tracing::info;

/// Log a formatted end-of-run summary.
pub fn log_execution_summary(
    status: &str,
    records_processed: usize,
    alerts_triggered: usize,
    duration: Duration,
) {
    info!("{}", "=".repeat(50));
    info!("EXECUTION SUMMARY");
    info!("{}", "=".repeat(50));
    info!("Status: {status}");
    info!("Records processed: {records_processed}");
    info!("Alerts triggered: {alerts_triggered}");
    info!("Duration: {:.2}s", duration.as_secs_f64());
    info!("{}", "=".repeat(50));
}
