//! Notifier trait definition and shared error types.

use meteoflow_core::{AlertResult, Severity};

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Trait for notification channel implementations.
///
/// Each call is independent; notifiers hold no cross-call state beyond
/// their connection pool. Failures never escape the dispatcher.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a batch of findings for one location through this channel.
    async fn send(&self, results: &[AlertResult], location: &str) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "webhook", "email").
    fn channel_name(&self) -> &str;
}

/// Icon used when rendering a finding in a human-facing channel.
pub(crate) fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::Warning => "🟡",
        Severity::Info => "ℹ️",
    }
}

/// One-line rendering of a finding, shared by the plain-text channels.
pub(crate) fn render_line(result: &AlertResult) -> String {
    format!(
        "{} [{}] {}",
        severity_icon(result.severity),
        result.severity.to_string().to_uppercase(),
        result.message
    )
}
