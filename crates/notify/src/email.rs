//! SMTP email notifier via `lettre` with TLS support.
//!
//! Sends one plain-text email per run listing every finding.

use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

use meteoflow_core::AlertResult;

use crate::traits::{render_line, Notifier, NotifyError};

/// Sends findings as an email via SMTP.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl EmailNotifier {
    /// Build an `EmailNotifier` from SMTP configuration.
    ///
    /// SMTP credentials are resolved from the `SMTP_USERNAME` and
    /// `SMTP_PASSWORD` environment variables; when both are set they are
    /// attached to the transport, otherwise the connection is
    /// unauthenticated. The connection uses STARTTLS.
    pub fn from_config(
        smtp_host: &str,
        smtp_port: u16,
        from: &str,
        to: &[String],
    ) -> Result<Self, NotifyError> {
        let from_mailbox: Mailbox = from
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Config(e.to_string()))?;

        let to_mailboxes: Vec<Mailbox> = to
            .iter()
            .map(|addr| {
                addr.parse()
                    .map_err(|e: lettre::address::AddressError| NotifyError::Config(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if to_mailboxes.is_empty() {
            return Err(NotifyError::Config(
                "at least one recipient is required".to_string(),
            ));
        }

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_host)
            .map_err(|e| NotifyError::Config(e.to_string()))?
            .port(smtp_port);

        if let (Ok(username), Ok(password)) =
            (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD"))
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            transport: builder.build(),
            from: from_mailbox,
            to: to_mailboxes,
        })
    }

    fn build_body(results: &[AlertResult], location: &str) -> String {
        let mut lines = vec![
            format!("WEATHER ALERTS FOR {}", location.to_uppercase()),
            "=".repeat(40),
        ];
        lines.extend(results.iter().map(render_line));
        lines.join("\n")
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, results: &[AlertResult], location: &str) -> Result<(), NotifyError> {
        let newest_date = results.iter().filter_map(|r| r.date).max();
        let subject = match newest_date {
            Some(date) => format!("Weather Alerts for {location} - {date}"),
            None => format!("Weather Alerts for {location}"),
        };

        let mut builder = Message::builder().from(self.from.clone()).subject(subject);
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }

        let message = builder
            .body(Self::build_body(results, location))
            .map_err(|e| NotifyError::Config(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        tracing::debug!(recipients = self.to.len(), "email notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "email"
    }
}
