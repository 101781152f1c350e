//! Notification delivery for alert findings.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable notification channels
//! - Console, webhook (Slack/Discord payloads), push, and email notifiers
//! - Dispatcher that fans findings out to every enabled channel,
//!   isolating per-channel failures

pub mod console;
pub mod dispatcher;
pub mod email;
pub mod push;
pub mod traits;
pub mod webhook;

pub use console::ConsoleNotifier;
pub use dispatcher::{build_channels, Dispatcher};
pub use email::EmailNotifier;
pub use push::PushNotifier;
pub use traits::{Notifier, NotifyError};
pub use webhook::{WebhookNotifier, WebhookStyle};
