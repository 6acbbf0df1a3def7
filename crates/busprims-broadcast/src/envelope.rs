/// A single in-flight message: event name plus opaque payload.
///
/// One envelope is built per broadcast call, shared by reference with every
/// listener in the snapshot, and dropped when fan-out completes. Envelopes
/// are never stored or replayed.
#[derive(Debug)]
pub struct Envelope<T> {
    name: String,
    payload: T,
}

impl<T> Envelope<T> {
    /// Build an envelope for one broadcast.
    pub fn new(name: impl Into<String>, payload: T) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// The event name this envelope was broadcast under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The opaque payload.
    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the envelope, yielding the payload.
    #[must_use]
    pub fn into_payload(self) -> T {
        self.payload
    }
}
