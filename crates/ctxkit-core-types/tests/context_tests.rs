#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use ctxkit_core_types::{Context, ContextKey, RequestId};
use proptest::prelude::*;

struct SlotKey;

impl ContextKey for SlotKey {
    type Value = i64;
}

struct OtherKey;

impl ContextKey for OtherKey {
    type Value = i64;
}

#[test]
fn test_same_value_type_under_distinct_keys() {
    let ctx = Context::background()
        .with_value::<SlotKey>(1)
        .with_value::<OtherKey>(2);

    assert_eq!(ctx.value::<SlotKey>(), Some(&1));
    assert_eq!(ctx.value::<OtherKey>(), Some(&2));
}

#[test]
fn test_concurrent_readers_share_one_context() {
    let ctx = Context::background()
        .with_request_id(RequestId::from_string("req-shared".to_string()))
        .with_value::<SlotKey>(42);
    let ctx = Arc::new(ctx);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                (
                    *ctx.value::<SlotKey>().unwrap(),
                    ctx.request_id().unwrap().as_str().to_string(),
                )
            })
        })
        .collect();

    for handle in handles {
        let (slot, request_id) = handle.join().unwrap();
        assert_eq!(slot, 42);
        assert_eq!(request_id, "req-shared");
    }
}

#[test]
fn test_clone_shares_bindings() {
    let ctx = Context::background().with_value::<SlotKey>(9);
    let cloned = ctx.clone();

    assert_eq!(cloned.value::<SlotKey>(), Some(&9));
    assert_eq!(cloned.depth(), ctx.depth());
}

#[test]
fn test_dropping_deep_chain_does_not_overflow() {
    let mut ctx = Context::background();
    for i in 0..100_000i64 {
        ctx = ctx.with_value::<SlotKey>(i);
    }
    assert_eq!(ctx.depth(), 100_000);

    drop(ctx);
}

#[test]
fn test_dropping_deep_chain_keeps_shared_ancestors() {
    let mut ctx = Context::background();
    for i in 0..50_000i64 {
        ctx = ctx.with_value::<SlotKey>(i);
    }
    let ancestor = ctx.clone();
    for i in 50_000..100_000i64 {
        ctx = ctx.with_value::<OtherKey>(i);
    }

    drop(ctx);

    assert_eq!(ancestor.depth(), 50_000);
    assert_eq!(ancestor.value::<SlotKey>(), Some(&49_999));
    assert!(ancestor.value::<OtherKey>().is_none());
}

proptest! {
    #[test]
    fn prop_nearest_binding_wins(values in proptest::collection::vec(any::<i64>(), 1..32)) {
        let mut ctx = Context::background();
        let mut snapshots = Vec::new();

        for value in &values {
            ctx = ctx.with_value::<SlotKey>(*value);
            snapshots.push(ctx.clone());
        }

        // Every earlier snapshot still sees its own value
        for (snapshot, value) in snapshots.iter().zip(values.iter()) {
            prop_assert_eq!(snapshot.value::<SlotKey>(), Some(value));
        }
        prop_assert_eq!(ctx.depth(), values.len());
        prop_assert!(ctx.value::<OtherKey>().is_none());
    }
}
