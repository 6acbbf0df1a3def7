//! Typed, runtime-validated publish/subscribe.
//!
//! This is the "just works" layer. A [`TypedBus`] holds an immutable
//! event-name → schema registry and gates every payload through it:
//! `publish` validates before broadcasting, `subscribe` validates before
//! forwarding to the handler. Bad data fails loudly on both sides — nothing
//! is silently dropped.

pub mod bus;
pub mod error;
pub mod host;
pub mod subscription;

pub use bus::TypedBus;
pub use error::{BusError, Result};
pub use host::host_hub;
pub use subscription::Subscription;
