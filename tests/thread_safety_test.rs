mod common;

use common::*;
use stac_schema::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_engine_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<StacSchemaEngine>();
    assert_send_sync::<CompositionCache>();
    assert_send_sync::<ItemSchemaFactory>();
    assert_send_sync::<InMemoryExtensionRegistry>();
    assert_send_sync::<Item>();
}

#[test]
fn test_concurrent_compose_converges() {
    init_tracing();
    let engine = Arc::new(default_engine());
    let barrier = Arc::new(Barrier::new(8));
    let key = ids(&["eo", "view", "proj"]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            let key = key.clone();
            thread::spawn(move || {
                barrier.wait();
                engine.compose(&key).unwrap()
            })
        })
        .collect();

    let results: Vec<Arc<ComposedSchema>> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    // racing builders may all miss, but only one entry survives and everyone gets it
    let cached = engine.compose(&key).unwrap();
    for composed in &results {
        assert!(Arc::ptr_eq(composed, &cached));
    }
    assert_eq!(engine.factory().cache().len(), 1);
}

#[test]
fn test_concurrent_validation_across_keys() {
    let engine = Arc::new(default_engine());
    let shapes: [&[&str]; 4] = [&["view"], &["eo"], &["view", "eo"], &["checksum", "view"]];

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let extensions = shapes[i % shapes.len()];
            thread::spawn(move || {
                let raw = item_with_extensions(
                    extensions,
                    serde_json::json!({"datetime": "2020-01-01T00:00:00Z"}),
                );
                engine.validate_item(&raw).map(|item| item.id().to_string())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "a");
    }
    assert_eq!(engine.factory().cache().len(), shapes.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_multithreaded_usage() {
    let engine = Arc::new(default_engine());
    let mut tasks = vec![];

    for i in 0..8 {
        let engine = Arc::clone(&engine);
        tasks.push(tokio::spawn(async move {
            let extensions: &[&str] = if i % 2 == 0 { &["sat"] } else { &["sat", "version"] };
            let raw = item_with_extensions(
                extensions,
                serde_json::json!({"datetime": "2020-01-01T00:00:00Z", "sat:relative_orbit": i}),
            );
            engine.validate_item(&raw).is_ok()
        }));
    }

    for task in tasks {
        assert!(task.await.unwrap());
    }

    let stats = engine.cache_stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.hits + stats.misses, 8);
}
