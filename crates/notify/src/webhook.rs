//! Chat webhook notifier.
//!
//! Delivers findings as a JSON payload to a Slack- or Discord-style
//! incoming webhook. The two services want different payload shapes, so
//! the style is picked at construction time; delivery is identical.

use std::time::Duration;

use serde_json::{json, Value};

use meteoflow_core::AlertResult;

use crate::traits::{severity_icon, Notifier, NotifyError};

/// Payload shape expected by the receiving service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStyle {
    /// Slack Block Kit (`blocks` array).
    Slack,
    /// Discord embeds (`embeds` array).
    Discord,
}

/// Posts findings to a chat webhook URL.
#[derive(Debug)]
pub struct WebhookNotifier {
    url: String,
    style: WebhookStyle,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: String, style: WebhookStyle) -> Result<Self, NotifyError> {
        if url.is_empty() {
            return Err(NotifyError::Config("webhook URL is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { url, style, client })
    }

    fn build_payload(&self, results: &[AlertResult], location: &str) -> Value {
        match self.style {
            WebhookStyle::Slack => {
                let mut blocks = vec![
                    json!({
                        "type": "header",
                        "text": { "type": "plain_text", "text": format!("⚠️ Weather Alerts - {location}") },
                    }),
                    json!({ "type": "divider" }),
                ];
                for result in results {
                    blocks.push(json!({
                        "type": "section",
                        "text": {
                            "type": "mrkdwn",
                            "text": format!(
                                "{} *{}*\n{}",
                                severity_icon(result.severity),
                                result.condition_name,
                                result.message
                            ),
                        },
                    }));
                }
                json!({ "blocks": blocks })
            }
            WebhookStyle::Discord => {
                let fields: Vec<Value> = results
                    .iter()
                    .map(|result| {
                        json!({
                            "name": result.condition_name,
                            "value": result.message,
                            "inline": false,
                        })
                    })
                    .collect();
                json!({
                    "embeds": [{
                        "title": format!("⚠️ Weather Alerts - {location}"),
                        "color": 15158332,
                        "fields": fields,
                    }]
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, results: &[AlertResult], location: &str) -> Result<(), NotifyError> {
        let payload = self.build_payload(results, location);

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(url = %self.url, %status, body = %body, "webhook returned non-2xx status");
            return Err(NotifyError::Config(format!(
                "webhook returned {status}: {body}"
            )));
        }

        tracing::debug!(url = %self.url, findings = results.len(), "webhook notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        match self.style {
            WebhookStyle::Slack => "slack",
            WebhookStyle::Discord => "discord",
        }
    }
}
