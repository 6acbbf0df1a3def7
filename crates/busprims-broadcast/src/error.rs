/// Boxed error returned by a listener that could not handle an envelope.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during broadcast dispatch.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// A listener returned an error while handling an envelope.
    ///
    /// Under [`DispatchPolicy::FailFast`](crate::DispatchPolicy::FailFast)
    /// this aborts the broadcast: listeners after the failing one do not run.
    #[error("listener failed while handling {event:?}: {source}")]
    ListenerFailed {
        event: String,
        #[source]
        source: ListenerError,
    },
}

pub type Result<T> = std::result::Result<T, BroadcastError>;
