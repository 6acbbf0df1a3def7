use busprims_broadcast::BroadcastError;
use busprims_schema::ValidationFailure;

/// Errors that can occur during bus operations.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// `subscribe` or `publish` was called with an event name absent from
    /// the registry. Caller bug; surfaces before any side effect.
    #[error("no schema registered for event {0:?}")]
    SchemaNotFound(String),

    /// The payload failed schema validation. The `Display` of the failure
    /// lists every violated constraint, one per line.
    #[error("payload rejected for event {event:?}:\n{failure}")]
    Validation {
        event: String,
        failure: ValidationFailure,
    },

    /// A listener failed during dispatch. Under the default fail-fast
    /// policy a subscriber-side decode failure surfaces here — out of
    /// `publish` — even when the publisher's own payload was valid.
    #[error(transparent)]
    Dispatch(#[from] BroadcastError),
}

pub type Result<T> = std::result::Result<T, BusError>;
