use std::sync::Arc;

use busprims_broadcast::{Broadcast, Listener, SubscriptionToken};
use busprims_schema::{SchemaDescriptor, SchemaRegistry, ValidationIssue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{BusError, Result};
use crate::host::host_hub;
use crate::subscription::Subscription;

/// Validation-gated publish/subscribe over a shared broadcast hub.
///
/// The registry is fixed at construction: every event name used with
/// `subscribe` or `publish` must have a schema, or the call fails with
/// [`BusError::SchemaNotFound`] before any side effect. Payloads are checked
/// on the way out (`publish` refuses to broadcast rejected data) and on the
/// way in (each subscription re-validates before its handler runs), so a
/// handler only ever sees values that satisfy the contract.
pub struct TypedBus {
    registry: SchemaRegistry,
    hub: Arc<dyn Broadcast<Value>>,
}

impl TypedBus {
    /// Create a bus attached to the process-global hub.
    ///
    /// Buses created this way share delivery: a publish on one reaches
    /// subscribers of the same event name on any other.
    #[must_use]
    pub fn new(registry: SchemaRegistry) -> Self {
        Self::with_hub(registry, host_hub())
    }

    /// Create a bus over an explicit hub.
    ///
    /// Use this to compose isolated buses — in tests, or wherever
    /// cross-contamination with the process-global channel is unwanted.
    #[must_use]
    pub fn with_hub(registry: SchemaRegistry, hub: Arc<dyn Broadcast<Value>>) -> Self {
        Self { registry, hub }
    }

    /// The bus's schema registry.
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Register `handler` for `name`.
    ///
    /// Each notification for `name` is run through the schema before the
    /// handler sees it; a payload that fails the decode step is a listener
    /// error, surfaced through the hub's dispatch policy rather than
    /// swallowed. The handler receives the decoded value.
    pub fn subscribe<F>(&self, name: &str, handler: F) -> Result<Subscription>
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        let schema = self.lookup(name)?;
        let event = name.to_string();
        let listener: Listener<Value> = Arc::new(move |envelope| {
            let decoded = schema
                .validate(envelope.payload())
                .map_err(|failure| BusError::Validation {
                    event: event.clone(),
                    failure,
                })?;
            handler(decoded);
            Ok(())
        });
        self.register(name, listener)
    }

    /// Register a typed handler for `name`.
    ///
    /// On top of schema validation, the decoded value is deserialized into
    /// `T`; a deserialization failure is treated exactly like a validation
    /// rejection.
    pub fn subscribe_typed<T, F>(&self, name: &str, handler: F) -> Result<Subscription>
    where
        T: DeserializeOwned + Send + Sync + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let schema = self.lookup(name)?;
        let event = name.to_string();
        let listener: Listener<Value> = Arc::new(move |envelope| {
            let decoded = schema
                .validate(envelope.payload())
                .map_err(|failure| BusError::Validation {
                    event: event.clone(),
                    failure,
                })?;
            let typed: T = serde_json::from_value(decoded).map_err(|err| BusError::Validation {
                event: event.clone(),
                failure: ValidationIssue::new(err.to_string()).into(),
            })?;
            handler(typed);
            Ok(())
        });
        self.register(name, listener)
    }

    /// Validate `payload` against the schema for `name` and broadcast the
    /// decoded value to every current subscriber of `name`, synchronously,
    /// in subscription order. Returns the number of listeners that ran.
    ///
    /// A rejected payload is never broadcast — there is no partial delivery.
    /// Note that under the default fail-fast dispatch policy this can also
    /// return [`BusError::Dispatch`] when a *subscriber's* decode step
    /// fails, even though this caller's payload was valid.
    pub fn publish(&self, name: &str, payload: Value) -> Result<usize> {
        let schema = self.lookup(name)?;
        let decoded = schema
            .validate(&payload)
            .map_err(|failure| BusError::Validation {
                event: name.to_string(),
                failure,
            })?;

        let delivered = self.hub.broadcast(name, decoded)?;
        debug!(event = name, delivered, "event published");
        Ok(delivered)
    }

    /// Serialize `payload` and [`publish`](Self::publish) it.
    pub fn publish_typed<T: Serialize>(&self, name: &str, payload: &T) -> Result<usize> {
        let value = serde_json::to_value(payload).map_err(|err| BusError::Validation {
            event: name.to_string(),
            failure: ValidationIssue::new(err.to_string()).into(),
        })?;
        self.publish(name, value)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn SchemaDescriptor>> {
        self.registry
            .get(name)
            .cloned()
            .ok_or_else(|| BusError::SchemaNotFound(name.to_string()))
    }

    fn register(&self, name: &str, listener: Listener<Value>) -> Result<Subscription> {
        let token = SubscriptionToken::fresh();
        self.hub.add_listener(name, listener, token);
        debug!(event = name, token = token.id(), "subscribed");
        Ok(Subscription::new(Arc::clone(&self.hub), token))
    }
}
