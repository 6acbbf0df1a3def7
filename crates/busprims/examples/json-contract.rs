//! JSON Schema contract example — strict-mode validation on the bus.
//!
//! Run with:
//!   cargo run --example json-contract

use std::sync::Arc;

use busprims::broadcast::BroadcastHub;
use busprims::bus::TypedBus;
use busprims::schema::{RegistryConfig, SchemaRegistry};
use serde_json::json;

const TELEMETRY_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "sensor": { "type": "string" },
        "reading": { "type": "number" }
    },
    "required": ["sensor", "reading"]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let registry = SchemaRegistry::builder_with_config(RegistryConfig { strict_mode: true })
        .json_schema("telemetry::reading", TELEMETRY_SCHEMA)?
        .build();
    let hub: Arc<BroadcastHub<serde_json::Value>> = Arc::new(BroadcastHub::new());
    let bus = TypedBus::with_hub(registry, hub);

    let _sub = bus.subscribe("telemetry::reading", |value| {
        eprintln!("[collector] {value}");
    })?;

    bus.publish("telemetry::reading", json!({"sensor": "t0", "reading": 21.5}))?;

    // Strict mode: unknown fields violate the contract.
    match bus.publish(
        "telemetry::reading",
        json!({"sensor": "t0", "reading": 21.5, "debug": true}),
    ) {
        Err(err) => eprintln!("rejected:\n{err}"),
        Ok(_) => unreachable!("strict mode must reject unknown fields"),
    }

    Ok(())
}
