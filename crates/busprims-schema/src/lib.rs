//! Schema descriptors and the event-name registry for busprims.
//!
//! Every event name on the bus maps to a schema capability with one job:
//! given a candidate payload, either accept it (yielding the decoded value)
//! or reject it with a structured list of violations. Two bindings are
//! provided — [`JsonSchema`] over compiled JSON Schema 2020-12, and
//! [`TypedSchema`] over serde — and the bus depends only on the
//! [`SchemaDescriptor`] trait, never on a concrete binding.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod json;
pub mod registry;
pub mod typed;

pub use config::RegistryConfig;
pub use descriptor::{SchemaDescriptor, ValidationFailure, ValidationIssue};
pub use error::{Result, SchemaError};
pub use json::JsonSchema;
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use typed::TypedSchema;
