/// Errors that can occur while building a schema registry.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema could not be compiled.
    #[error("failed to compile schema for event {event:?}: {message}")]
    CompileFailed { event: String, message: String },

    /// The schema source is not valid JSON.
    #[error("schema for event {event:?} is not valid JSON: {source}")]
    InvalidJson {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
