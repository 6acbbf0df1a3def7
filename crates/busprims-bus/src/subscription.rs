use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use busprims_broadcast::{Broadcast, SubscriptionToken};
use serde_json::Value;
use tracing::debug;

/// Caller-owned cancellation capability for a single listener registration.
///
/// `cancel` detaches the listener and is idempotent; dropping the handle
/// cancels it too. Cancellation is per-token: it never affects other
/// subscriptions, to the same event name or any other. A cancelled listener
/// receives no further notifications, including from a broadcast already in
/// flight when `cancel` is called.
#[must_use = "dropping the subscription cancels it"]
pub struct Subscription {
    hub: Arc<dyn Broadcast<Value>>,
    token: SubscriptionToken,
    cancelled: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(hub: Arc<dyn Broadcast<Value>>, token: SubscriptionToken) -> Self {
        Self {
            hub,
            token,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Detach the listener. Calling this more than once is a no-op.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.hub.remove_listener(self.token);
            debug!(token = self.token.id(), "subscription cancelled");
        }
    }

    /// Whether `cancel` has already run (explicitly or via drop).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// The token identifying this registration on the hub.
    #[must_use]
    pub fn token(&self) -> SubscriptionToken {
        self.token
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
