//! Push notification channel via an ntfy.sh-style topic.
//!
//! Each run posts one plain-text message listing every finding; the topic
//! subscriber gets it as a phone notification.

use std::time::Duration;

use meteoflow_core::AlertResult;

use crate::traits::{render_line, Notifier, NotifyError};

/// Posts findings to `https://ntfy.sh/<topic>`.
#[derive(Debug)]
pub struct PushNotifier {
    endpoint: String,
    client: reqwest::Client,
}

impl PushNotifier {
    pub fn new(topic: &str) -> Result<Self, NotifyError> {
        if topic.is_empty() {
            return Err(NotifyError::Config("push topic is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(6))
            .build()?;
        Ok(Self {
            endpoint: format!("https://ntfy.sh/{topic}"),
            client,
        })
    }

    fn build_body(results: &[AlertResult]) -> String {
        results
            .iter()
            .map(render_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait::async_trait]
impl Notifier for PushNotifier {
    async fn send(&self, results: &[AlertResult], location: &str) -> Result<(), NotifyError> {
        let body = Self::build_body(results);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Title", format!("Weather Alerts - {location}"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Config(format!(
                "push endpoint returned {status}"
            )));
        }

        tracing::debug!(endpoint = %self.endpoint, findings = results.len(), "push notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "push"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteoflow_core::Severity;

    #[test]
    fn empty_topic_is_rejected() {
        assert!(PushNotifier::new("").is_err());
    }

    #[test]
    fn endpoint_includes_topic() {
        let notifier = PushNotifier::new("my-weather-topic").unwrap();
        assert_eq!(notifier.endpoint, "https://ntfy.sh/my-weather-topic");
        assert_eq!(notifier.channel_name(), "push");
    }

    #[test]
    fn body_lists_one_line_per_finding() {
        let result = AlertResult {
            condition_name: "wind_exceeds".into(),
            triggered: true,
            message: "wind speed 95.0 exceeds 80.0".into(),
            severity: Severity::Warning,
            value: Some(95.0),
            threshold: Some(80.0),
            date: None,
        };
        let body = PushNotifier::build_body(&[result.clone(), result]);
        assert_eq!(body.lines().count(), 2);
        assert!(body.contains("95.0"));
    }
}
