use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error};

use crate::envelope::Envelope;
use crate::error::{BroadcastError, ListenerError, Result};
use crate::token::SubscriptionToken;

/// A registered callback. Listeners are fallible: returning `Err` signals
/// that the envelope could not be handled (for example, it failed a decode
/// step in a layer above).
pub type Listener<T> =
    Arc<dyn Fn(&Envelope<T>) -> std::result::Result<(), ListenerError> + Send + Sync>;

/// What a failing listener does to the rest of the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// The first listener error aborts the broadcast; listeners after the
    /// failing one do not run and the error is returned to the broadcaster.
    #[default]
    FailFast,
    /// Listener errors are logged and dispatch continues to the remaining
    /// listeners. The broadcast itself still returns `Ok`.
    Isolate,
}

/// The injectable seam over a broadcast transport.
///
/// [`BroadcastHub`] is the in-process implementation. Layers above depend on
/// this trait so they can be composed over isolated hubs in tests without
/// touching process-global state.
pub trait Broadcast<T>: Send + Sync {
    /// Register `listener` under `name`, cancellable via `token`.
    fn add_listener(&self, name: &str, listener: Listener<T>, token: SubscriptionToken);

    /// Remove the registration made with `token`. Removing an unknown or
    /// already-removed token is a no-op.
    fn remove_listener(&self, token: SubscriptionToken);

    /// Deliver `payload` to every listener registered under `name`.
    fn broadcast(&self, name: &str, payload: T) -> Result<usize>;
}

struct Registration<T> {
    token: SubscriptionToken,
    listener: Listener<T>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token,
            listener: Arc::clone(&self.listener),
        }
    }
}

/// Name-keyed listener registry with synchronous, ordered fan-out.
///
/// For a fixed event name, listeners fire in the order they were registered.
/// `broadcast` snapshots the listener list before invoking anyone, so a
/// listener may re-entrantly add or remove registrations on the same hub:
/// additions never run in the current broadcast, and removals take effect
/// immediately — each token's liveness is re-checked just before its
/// listener is invoked.
///
/// The registry lock is never held across a listener invocation.
pub struct BroadcastHub<T> {
    listeners: RwLock<HashMap<String, Vec<Registration<T>>>>,
    policy: DispatchPolicy,
}

impl<T> BroadcastHub<T> {
    /// Create a hub with the default [`DispatchPolicy::FailFast`] policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    /// Create a hub with an explicit dispatch policy.
    #[must_use]
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// The hub's dispatch policy.
    #[must_use]
    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Whether `token` currently identifies a live registration.
    #[must_use]
    pub fn is_registered(&self, token: SubscriptionToken) -> bool {
        let map = self.read_registry();
        map.values()
            .any(|entries| entries.iter().any(|r| r.token == token))
    }

    /// Number of listeners currently registered under `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.read_registry().get(name).map_or(0, Vec::len)
    }

    /// Number of listeners across all event names.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.read_registry().values().map(Vec::len).sum()
    }

    fn read_registry(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<Registration<T>>>> {
        // Listeners never run under the lock, so a poisoning panic cannot
        // leave the registry half-mutated.
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Registration<T>>>> {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for BroadcastHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Broadcast<T> for BroadcastHub<T> {
    fn add_listener(&self, name: &str, listener: Listener<T>, token: SubscriptionToken) {
        let mut map = self.write_registry();
        map.entry(name.to_string())
            .or_default()
            .push(Registration { token, listener });
        debug!(event = name, token = token.id(), "listener registered");
    }

    fn remove_listener(&self, token: SubscriptionToken) {
        let mut map = self.write_registry();
        let before: usize = map.values().map(Vec::len).sum();
        for entries in map.values_mut() {
            entries.retain(|r| r.token != token);
        }
        map.retain(|_, entries| !entries.is_empty());
        let after: usize = map.values().map(Vec::len).sum();
        if after < before {
            debug!(token = token.id(), "listener removed");
        }
    }

    fn broadcast(&self, name: &str, payload: T) -> Result<usize> {
        let snapshot: Vec<Registration<T>> = self.read_registry().get(name).cloned().unwrap_or_default();

        if snapshot.is_empty() {
            debug!(event = name, "broadcast with no listeners");
            return Ok(0);
        }

        let envelope = Envelope::new(name, payload);
        let mut delivered = 0usize;
        for registration in snapshot {
            // Honors cancellations made earlier in this same broadcast.
            if !self.is_registered(registration.token) {
                continue;
            }
            match (registration.listener)(&envelope) {
                Ok(()) => delivered += 1,
                Err(source) => match self.policy {
                    DispatchPolicy::FailFast => {
                        return Err(BroadcastError::ListenerFailed {
                            event: name.to_string(),
                            source,
                        });
                    }
                    DispatchPolicy::Isolate => {
                        error!(event = name, error = %source, "listener failed, continuing dispatch");
                    }
                },
            }
        }

        debug!(event = name, delivered, "broadcast complete");
        Ok(delivered)
    }
}
