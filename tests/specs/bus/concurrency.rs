//! Concurrency specs: many threads against one bus

use crate::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_publishers_never_block() {
    let bus = bus(1);
    // Never drained: every publisher must still finish
    let _stuck = bus.add_listener("t");

    let handles: Vec<_> = (0..8)
        .map(|p| {
            let bus = bus.clone();
            thread::spawn(move || {
                for n in 0..1000 {
                    bus.emit("t", vec![json!([p, n])]).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = bus.stats();
    assert_eq!(stats.emitted, 8000);
    assert_eq!(stats.delivered, 1);
    assert_eq!(stats.dropped, 7999);
}

#[test]
fn concurrent_subscribe_and_emit() {
    let bus = bus(128);
    let barrier = Arc::new(Barrier::new(5));

    let subscribers: Vec<_> = (0..4)
        .map(|_| {
            let bus = bus.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..50).map(|_| bus.add_listener("t")).collect::<Vec<_>>()
            })
        })
        .collect();

    barrier.wait();
    for n in 0..100 {
        bus.emit("t", vec![json!(n)]).unwrap();
    }

    let listeners: Vec<Listener> = subscribers
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(bus.listener_count("t"), 200);

    // Anything emitted after every subscription returned reaches everyone
    bus.emit("t", vec![json!("after")]).unwrap();
    for mut listener in listeners {
        let events = drain_now(&mut listener);
        assert_eq!(events.last().unwrap().args(), &[json!("after")]);
    }
}

#[test]
fn concurrent_remove_and_emit() {
    let bus = bus(8);
    let listeners: Vec<Listener> = (0..100).map(|_| bus.add_listener("t")).collect();
    let ids: Vec<_> = listeners.iter().map(|l| l.id()).collect();

    let publisher = {
        let bus = bus.clone();
        thread::spawn(move || {
            for n in 0..500 {
                bus.emit("t", vec![json!(n)]).unwrap();
            }
        })
    };
    let remover = {
        let bus = bus.clone();
        thread::spawn(move || {
            for id in ids {
                bus.remove_listener("t", &[id]);
            }
        })
    };

    publisher.join().unwrap();
    remover.join().unwrap();

    assert!(bus.topics().is_empty());
    for listener in &listeners {
        assert!(listener.is_closed());
    }
}

#[test]
fn close_while_publishing() {
    let bus = bus(4);
    let mut listener = bus.add_listener("t");

    let publisher = {
        let bus = bus.clone();
        thread::spawn(move || {
            for n in 0..10_000 {
                bus.emit("t", vec![json!(n)]).unwrap();
            }
        })
    };
    let consumer = thread::spawn(move || {
        let mut last = -1;
        while let Some(event) = listener.blocking_recv() {
            let n = event.args()[0].as_i64().unwrap();
            assert!(n > last, "reordered: {n} after {last}");
            last = n;
        }
    });

    thread::sleep(std::time::Duration::from_millis(1));
    bus.close();

    publisher.join().unwrap();
    consumer.join().unwrap();
    assert!(bus.is_closed());
}

#[test]
fn per_topic_fan_out_across_threads() {
    let bus = bus(1000);
    let topics = ["orders", "users", "audit"];
    let consumers: Vec<_> = topics
        .iter()
        .flat_map(|topic| (0..2).map(move |_| *topic))
        .map(|topic| {
            let mut listener = bus.add_listener(topic);
            thread::spawn(move || {
                let mut seen = 0;
                while let Some(event) = listener.blocking_recv() {
                    assert_eq!(event.topic(), listener.topic());
                    seen += 1;
                    if seen == 300 {
                        break;
                    }
                }
                seen
            })
        })
        .collect();

    let publishers: Vec<_> = topics
        .iter()
        .map(|topic| {
            let bus = bus.clone();
            let topic = topic.to_string();
            thread::spawn(move || {
                for n in 0..300 {
                    bus.emit(&topic, vec![json!(n)]).unwrap();
                }
            })
        })
        .collect();

    for publisher in publishers {
        publisher.join().unwrap();
    }
    for consumer in consumers {
        assert_eq!(consumer.join().unwrap(), 300);
    }
}
