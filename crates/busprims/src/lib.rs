//! Typed, runtime-validated publish/subscribe for a single process.
//!
//! busprims lets independently built components agree on a shared contract
//! of named events and payload shapes, publish values under that contract,
//! and subscribe to receive only values that satisfy it.
//!
//! # Crate Structure
//!
//! - [`broadcast`] — Process-wide broadcast hub with synchronous, ordered fan-out
//! - [`schema`] — Schema descriptors (JSON Schema and serde bindings) and the event registry
//! - [`bus`] — The validation-gated [`TypedBus`](bus::TypedBus)

/// Re-export broadcast types.
pub mod broadcast {
    pub use busprims_broadcast::*;
}

/// Re-export schema types.
pub mod schema {
    pub use busprims_schema::*;
}

/// Re-export bus types.
pub mod bus {
    pub use busprims_bus::*;
}
