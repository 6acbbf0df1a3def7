//! Typed contract example — two components sharing an order contract.
//!
//! Run with:
//!   cargo run --example typed-orders

use std::sync::Arc;

use busprims::broadcast::BroadcastHub;
use busprims::bus::TypedBus;
use busprims::schema::SchemaRegistry;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize)]
struct OrderPlaced {
    id: u64,
    item: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let registry = SchemaRegistry::builder()
        .typed::<OrderPlaced>("orders::placed")
        .build();
    let hub: Arc<BroadcastHub<serde_json::Value>> = Arc::new(BroadcastHub::new());
    let bus = TypedBus::with_hub(registry, hub);

    let fulfillment = bus.subscribe_typed::<OrderPlaced, _>("orders::placed", |order| {
        eprintln!("[fulfillment] picking item {:?} for order {}", order.item, order.id);
    })?;
    let _billing = bus.subscribe_typed::<OrderPlaced, _>("orders::placed", |order| {
        eprintln!("[billing] invoicing order {}", order.id);
    })?;

    let delivered = bus.publish("orders::placed", json!({"id": 1, "item": "widget"}))?;
    eprintln!("delivered to {delivered} subscribers");

    // A payload that breaks the contract never reaches anyone.
    match bus.publish("orders::placed", json!({"id": "not-a-number"})) {
        Err(err) => eprintln!("rejected as expected:\n{err}"),
        Ok(_) => unreachable!("contract violation must not be delivered"),
    }

    // Fulfillment unsubscribes; billing keeps receiving.
    fulfillment.cancel();
    let delivered = bus.publish("orders::placed", json!({"id": 2, "item": "gadget"}))?;
    eprintln!("delivered to {delivered} subscriber after cancel");

    Ok(())
}
