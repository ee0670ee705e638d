//! User-visible cart notifications.
//!
//! Adding to the cart tells the user what happened, with different wording for
//! a new line and for a quantity bump. The actor raises a [`CartNotice`] through
//! whatever [`Notifier`] it was started with.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A short message for the user, e.g. shown as an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartNotice {
    pub title: String,
    pub message: String,
}

impl CartNotice {
    pub fn added(name: &str) -> Self {
        Self {
            title: "Added to Cart".to_string(),
            message: format!("{} added to your cart!", name),
        }
    }

    pub fn quantity_updated(name: &str, quantity: u32) -> Self {
        Self {
            title: "Cart Updated".to_string(),
            message: format!("{} quantity updated to {}", name, quantity),
        }
    }
}

/// Delivers notices to the user. Delivery is fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &CartNotice);
}

/// The cart actor's runtime context: where notices go.
pub type CartContext = Arc<dyn Notifier>;

/// Writes notices to the log. Used by the demo binary.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &CartNotice) {
        info!(title = %notice.title, "{}", notice.message);
    }
}

/// Forwards notices to a receiver owned by the UI layer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<CartNotice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CartNotice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: &CartNotice) {
        if self.sender.send(notice.clone()).is_err() {
            debug!(title = %notice.title, "Notice dropped, no listener");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wording_differs_by_branch() {
        let added = CartNotice::added("Copper Metal Composite PLA");
        assert_eq!(added.title, "Added to Cart");
        assert_eq!(added.message, "Copper Metal Composite PLA added to your cart!");

        let updated = CartNotice::quantity_updated("Copper Metal Composite PLA", 3);
        assert_eq!(updated.title, "Cart Updated");
        assert_eq!(updated.message, "Copper Metal Composite PLA quantity updated to 3");
    }

    #[tokio::test]
    async fn test_channel_notifier_forwards() {
        let (notifier, mut receiver) = ChannelNotifier::new();
        notifier.notify(&CartNotice::added("PLA"));
        assert_eq!(receiver.recv().await, Some(CartNotice::added("PLA")));

        drop(receiver);
        // No listener left; must not panic.
        notifier.notify(&CartNotice::added("PLA"));
    }
}
