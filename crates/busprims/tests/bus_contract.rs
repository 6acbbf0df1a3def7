//! End-to-end contract tests for the typed bus, run over isolated hubs so
//! suites never contaminate each other through the process-global channel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use busprims::broadcast::{Broadcast, BroadcastHub, DispatchPolicy};
use busprims::bus::{BusError, TypedBus};
use busprims::schema::SchemaRegistry;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Order {
    id: u64,
}

fn order_registry() -> SchemaRegistry {
    SchemaRegistry::builder().typed::<Order>("order").build()
}

fn isolated_hub() -> Arc<BroadcastHub<Value>> {
    Arc::new(BroadcastHub::new())
}

#[test]
fn accepted_publish_reaches_every_subscriber_in_order() {
    let bus = TypedBus::with_hub(order_registry(), isolated_hub());
    let log = Arc::new(Mutex::new(Vec::new()));

    let log1 = Arc::clone(&log);
    let _h1 = bus
        .subscribe("order", move |value| {
            log1.lock().unwrap().push(("h1", value));
        })
        .unwrap();
    let log2 = Arc::clone(&log);
    let _h2 = bus
        .subscribe("order", move |value| {
            log2.lock().unwrap().push(("h2", value));
        })
        .unwrap();

    let delivered = bus.publish("order", json!({"id": 2})).unwrap();

    assert_eq!(delivered, 2);
    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec![("h1", json!({"id": 2})), ("h2", json!({"id": 2}))]
    );
}

#[test]
fn rejected_publish_never_broadcasts() {
    let bus = TypedBus::with_hub(order_registry(), isolated_hub());
    let calls = Arc::new(AtomicUsize::new(0));

    let calls_in = Arc::clone(&calls);
    let _sub = bus
        .subscribe("order", move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let err = bus.publish("order", json!({"id": "x"})).unwrap_err();
    assert!(matches!(err, BusError::Validation { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // The same bus still delivers valid payloads afterwards.
    assert_eq!(bus.publish("order", json!({"id": 1})).unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn rejection_on_one_name_leaves_other_names_untouched() {
    let registry = SchemaRegistry::builder()
        .typed::<Order>("order")
        .json_schema("audit", r#"{"type": "object"}"#)
        .unwrap()
        .build();
    let bus = TypedBus::with_hub(registry, isolated_hub());
    let audit_calls = Arc::new(AtomicUsize::new(0));

    let audit = Arc::clone(&audit_calls);
    let _sub = bus
        .subscribe("audit", move |_| {
            audit.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert!(bus.publish("order", json!({"id": "bad"})).is_err());
    assert_eq!(bus.publish("audit", json!({})).unwrap(), 1);
    assert_eq!(audit_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn immediate_unsubscribe_means_handler_never_fires() {
    let bus = TypedBus::with_hub(order_registry(), isolated_hub());
    let calls = Arc::new(AtomicUsize::new(0));

    let calls_in = Arc::clone(&calls);
    let sub = bus
        .subscribe("order", move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    sub.cancel();

    bus.publish("order", json!({"id": 5})).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Second cancel is a no-op.
    sub.cancel();
    assert!(sub.is_cancelled());
}

#[test]
fn unknown_event_name_always_raises_schema_not_found() {
    let bus = TypedBus::with_hub(order_registry(), isolated_hub());

    for payload in [json!({}), json!(null), json!({"id": 1})] {
        let err = bus.publish("unknownEvent", payload).unwrap_err();
        assert!(matches!(err, BusError::SchemaNotFound(_)));
    }

    let err = bus.subscribe("unknownEvent", |_| {}).unwrap_err();
    assert!(matches!(err, BusError::SchemaNotFound(_)));
}

#[test]
fn order_scenario_from_the_contract() {
    let bus = TypedBus::with_hub(order_registry(), isolated_hub());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_in = Arc::clone(&seen);
    let _h = bus
        .subscribe_typed::<Order, _>("order", move |order| {
            seen_in.lock().unwrap().push(order);
        })
        .unwrap();

    bus.publish("order", json!({"id": 1})).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![Order { id: 1 }]);

    let err = bus.publish("order", json!({"id": "x"})).unwrap_err();
    assert!(matches!(err, BusError::Validation { .. }));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn subscriber_side_decode_failure_surfaces_from_publish() {
    // Two buses over one hub with diverging contracts for the same name:
    // the publisher's payload is valid for its own registry but fails the
    // subscriber's decode step.
    #[derive(Debug, Serialize, Deserialize)]
    struct StringId {
        id: String,
    }

    let hub = isolated_hub();
    let publisher = TypedBus::with_hub(
        order_registry(),
        Arc::clone(&hub) as Arc<dyn Broadcast<Value>>,
    );
    let subscriber_bus = TypedBus::with_hub(
        SchemaRegistry::builder().typed::<StringId>("order").build(),
        Arc::clone(&hub) as Arc<dyn Broadcast<Value>>,
    );

    let later_calls = Arc::new(AtomicUsize::new(0));
    let _bad = subscriber_bus.subscribe("order", |_| {}).unwrap();
    let later = Arc::clone(&later_calls);
    let _good = publisher
        .subscribe("order", move |_| {
            later.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let err = publisher.publish("order", json!({"id": 3})).unwrap_err();
    assert!(matches!(err, BusError::Dispatch(_)));
    // Fail-fast: the listener registered after the failing one never ran.
    assert_eq!(later_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn isolate_policy_keeps_delivering_past_a_bad_subscriber() {
    #[derive(Debug, Serialize, Deserialize)]
    struct StringId {
        id: String,
    }

    let hub: Arc<BroadcastHub<Value>> =
        Arc::new(BroadcastHub::with_policy(DispatchPolicy::Isolate));
    let publisher = TypedBus::with_hub(
        order_registry(),
        Arc::clone(&hub) as Arc<dyn Broadcast<Value>>,
    );
    let subscriber_bus = TypedBus::with_hub(
        SchemaRegistry::builder().typed::<StringId>("order").build(),
        Arc::clone(&hub) as Arc<dyn Broadcast<Value>>,
    );

    let later_calls = Arc::new(AtomicUsize::new(0));
    let _bad = subscriber_bus.subscribe("order", |_| {}).unwrap();
    let later = Arc::clone(&later_calls);
    let _good = publisher
        .subscribe("order", move |_| {
            later.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    let delivered = publisher.publish("order", json!({"id": 3})).unwrap();
    assert_eq!(delivered, 1);
    assert_eq!(later_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn buses_on_the_global_hub_share_delivery() {
    // Namespaced so this test cannot collide with anything else using the
    // process-global hub.
    let name = "busprims_test::shared_delivery";
    let registry_a = SchemaRegistry::builder().typed::<Order>(name).build();
    let registry_b = SchemaRegistry::builder().typed::<Order>(name).build();

    let bus_a = TypedBus::new(registry_a);
    let bus_b = TypedBus::new(registry_b);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    let _sub = bus_b
        .subscribe(name, move |_| {
            calls_in.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    bus_a.publish(name, json!({"id": 11})).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
