//! Fans findings out to every enabled channel.
//!
//! Channels are invoked sequentially in registration order; a failure in
//! one channel is recorded and the rest still run. Partial failure is the
//! expected steady state, never fatal.

use tracing::{info, warn};

use meteoflow_core::config::Settings;
use meteoflow_core::{AlertResult, DispatchOutcome};

use crate::console::ConsoleNotifier;
use crate::email::EmailNotifier;
use crate::push::PushNotifier;
use crate::traits::Notifier;
use crate::webhook::{WebhookNotifier, WebhookStyle};

/// Delivers a batch of findings to a fixed set of channels.
pub struct Dispatcher {
    channels: Vec<Box<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Deliver findings to every channel, one outcome per channel.
    ///
    /// An empty findings slice skips invocation entirely and returns an
    /// empty outcome list, so channels never send empty notifications.
    /// Zero configured channels is likewise a no-op.
    pub async fn dispatch(
        &self,
        results: &[AlertResult],
        location: &str,
    ) -> Vec<DispatchOutcome> {
        if results.is_empty() {
            info!(location, "no findings, skipping dispatch");
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            let start = std::time::Instant::now();
            let result = channel.send(results, location).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let (success, error) = match result {
                Ok(()) => {
                    info!(
                        channel = channel.channel_name(),
                        findings = results.len(),
                        duration_ms,
                        "notification delivered"
                    );
                    (true, None)
                }
                Err(e) => {
                    warn!(
                        channel = channel.channel_name(),
                        error = %e,
                        duration_ms,
                        "notification delivery failed"
                    );
                    (false, Some(e.to_string()))
                }
            };

            outcomes.push(DispatchOutcome {
                notifier: channel.channel_name().to_string(),
                success,
                error,
                duration_ms,
            });
        }

        outcomes
    }
}

/// Assemble the enabled channels from settings.
///
/// Falls back to the console channel when nothing else is configured, so
/// findings are never silently discarded. Channels that fail to construct
/// (bad addressing) are logged and skipped.
pub fn build_channels(settings: &Settings) -> Vec<Box<dyn Notifier>> {
    let cfg = &settings.channels;
    let mut channels: Vec<Box<dyn Notifier>> = Vec::new();

    if let Some(ref url) = cfg.slack_webhook_url {
        match WebhookNotifier::new(url.clone(), WebhookStyle::Slack) {
            Ok(n) => channels.push(Box::new(n)),
            Err(e) => warn!(error = %e, "skipping slack channel"),
        }
    }
    if let Some(ref url) = cfg.discord_webhook_url {
        match WebhookNotifier::new(url.clone(), WebhookStyle::Discord) {
            Ok(n) => channels.push(Box::new(n)),
            Err(e) => warn!(error = %e, "skipping discord channel"),
        }
    }
    if let Some(ref topic) = cfg.push_topic {
        match PushNotifier::new(topic) {
            Ok(n) => channels.push(Box::new(n)),
            Err(e) => warn!(error = %e, "skipping push channel"),
        }
    }
    if cfg.email_enabled {
        match cfg.email_from.as_deref() {
            Some(from) => match EmailNotifier::from_config(
                &cfg.smtp_host,
                cfg.smtp_port,
                from,
                &cfg.email_to,
            ) {
                Ok(n) => channels.push(Box::new(n)),
                Err(e) => warn!(error = %e, "skipping email channel"),
            },
            None => warn!("email enabled but EMAIL_FROM not set, skipping email channel"),
        }
    }

    if channels.is_empty() {
        channels.push(Box::new(ConsoleNotifier));
    }

    channels
}
