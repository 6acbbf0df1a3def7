//! Process-wide broadcast primitive with synchronous, ordered fan-out.
//!
//! This is the transport layer of busprims. A [`BroadcastHub`] keeps a
//! name-keyed registry of listeners and delivers each broadcast to every
//! listener registered under that name, synchronously, in registration order.
//! Each registration carries its own [`SubscriptionToken`], so cancelling one
//! listener never disturbs another.
//!
//! The hub knows nothing about payload shapes or validation — that lives in
//! the layers above. Payloads travel opaquely inside an [`Envelope`].

pub mod envelope;
pub mod error;
pub mod hub;
pub mod token;

pub use envelope::Envelope;
pub use error::{BroadcastError, ListenerError, Result};
pub use hub::{Broadcast, BroadcastHub, DispatchPolicy, Listener};
pub use token::SubscriptionToken;
