use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Cancellation token identifying exactly one listener registration.
///
/// Tokens are process-unique: every call to [`SubscriptionToken::fresh`]
/// returns a token that has never been handed out before, so removing a
/// token can never affect a registration it was not created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    /// Mint a fresh, process-unique token.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric identity, for logging.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}
