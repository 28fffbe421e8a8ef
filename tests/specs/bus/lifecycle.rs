//! Lifecycle specs: removal and close

use crate::prelude::*;

#[test]
fn removal_isolation() {
    let bus = bus(4);
    let mut s1 = bus.add_listener("t");
    let mut s2 = bus.add_listener("t");

    bus.remove_listener("t", &[s1.id()]);
    bus.emit("t", vec![json!("next")]).unwrap();

    assert!(s1.blocking_recv().is_none());
    assert_eq!(first_args(&drain_now(&mut s2)), vec![json!("next")]);
}

#[test]
fn remove_all_then_resubscribe() {
    let bus = bus(4);
    let old = bus.add_listener("t");

    bus.remove_listener("t", &[]);
    assert!(old.is_closed());
    assert!(bus.topics().is_empty());

    let mut fresh = bus.add_listener("t");
    bus.emit("t", vec![json!(1)]).unwrap();
    assert_eq!(drain_now(&mut fresh).len(), 1);
}

#[test]
fn idempotent_close() {
    let bus = bus(4);
    let mut listeners: Vec<Listener> = ["a", "b", "a"].iter().map(|t| bus.add_listener(t)).collect();

    bus.close();
    bus.close();

    for listener in &mut listeners {
        assert!(listener.is_closed());
        assert!(listener.blocking_recv().is_none());
    }
}

#[test]
fn closed_bus_stays_closed() {
    let bus = bus(4);
    bus.close();

    let mut late = bus.add_listener("t");
    assert!(bus.emit("t", vec![json!(1)]).is_ok());

    assert!(late.is_closed());
    assert!(matches!(late.try_recv(), Err(TryRecvError::Disconnected)));
    assert_eq!(bus.listener_count("t"), 0);
}

#[test]
fn default_buffer_size() {
    for configured in [0, -1, -100] {
        let bus = bus(configured);
        assert_eq!(bus.add_listener("t").capacity(), 3);
    }
}

#[tokio::test]
async fn close_wakes_waiting_listener() {
    let bus = bus(4);
    let mut listener = bus.add_listener("t");

    let waiter = tokio::spawn(async move { listener.recv().await });
    tokio::task::yield_now().await;
    bus.close();

    assert!(waiter.await.unwrap().is_none());
}

#[test]
fn emitter_trait_object_covers_the_contract() {
    let emitter: Box<dyn Emitter> = Box::new(TracedEmitter::new(bus(2)));
    let mut a = emitter.add_listener("t");
    let b = emitter.add_listener("t");

    emitter.emit("t", vec![json!(1)]).unwrap();
    emitter.remove_listener("t", &[b.id()]);
    emitter.emit("t", vec![json!(2)]).unwrap();

    assert_eq!(first_args(&drain_now(&mut a)), vec![json!(1), json!(2)]);
    assert!(b.is_closed());

    emitter.close();
    assert!(a.is_closed());
}
