//! Outbound notifications.
//!
//! Delivery is best-effort: a [`Notifier`] reports failure as `false` and
//! never returns an error to the poll loop.

mod telegram;

pub use telegram::{TelegramNotifier, TelegramNotifierBuilder, DEFAULT_API_URL};

use async_trait::async_trait;

/// Sends text messages to a fixed destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message`, returning whether it was accepted.
    async fn notify(&self, message: &str) -> bool;
}
