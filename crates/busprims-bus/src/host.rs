use std::sync::{Arc, OnceLock};

use busprims_broadcast::BroadcastHub;
use serde_json::Value;

static HOST_HUB: OnceLock<Arc<BroadcastHub<Value>>> = OnceLock::new();

/// The process-global broadcast hub.
///
/// Created on first use, torn down with the process. Every
/// [`TypedBus::new`](crate::TypedBus::new) attaches here, so independently
/// built components in the same process share one notification channel.
/// Availability is guaranteed by construction — there is no runtime
/// "no host environment" failure path.
pub fn host_hub() -> Arc<BroadcastHub<Value>> {
    Arc::clone(HOST_HUB.get_or_init(|| Arc::new(BroadcastHub::new())))
}
