//! Notifier seam.
//!
//! Delivery (push services, webhooks) lives outside the engine. The run loop
//! only hands `(html_message, title)` pairs to a [`Notifier`]; a failed
//! delivery is logged and never interrupts classification.

use std::error::Error;

use tracing::{error, info};

pub type NotifyError = Box<dyn Error + Send + Sync>;

/// Sink for outcome and summary messages.
pub trait Notifier {
    fn notify(&self, message: &str, title: &str) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, title: &str) -> Result<(), NotifyError> {
        info!(title, "{message}");
        Ok(())
    }
}

/// Delivers a notification, logging instead of propagating failures.
pub fn deliver(notifier: &dyn Notifier, message: &str, title: &str) {
    if let Err(e) = notifier.notify(message, title) {
        error!(title, "notification delivery failed: {e}");
    }
}
