//! Grow/shrink policy specs
//!
//! The pool grows above 60% utilization (up to `maximum`) and discards
//! returned resources below 50% utilization (down to `minimum`).

use crate::prelude::*;
use reservoir_engine::spawn;

#[tokio::test]
async fn pool_grows_as_utilization_crosses_threshold() {
    let handle = spawn(config(2, 4), token_factory()).unwrap();

    handle.acquire().await.unwrap();
    // usage 1/2 after the first lease: unchanged
    assert_eq!(handle.status().await.unwrap().free, 1);

    handle.acquire().await.unwrap();
    // usage 2/2 after the second: one resource added
    let status = handle.status().await.unwrap();
    assert_eq!(status.free, 1);
    assert_eq!(status.used, 2);
}

#[tokio::test]
async fn pool_never_grows_past_maximum() {
    let handle = spawn(config(2, 4), token_factory()).unwrap();

    for _ in 0..4 {
        handle.acquire().await.unwrap();
    }

    // Fully utilized at the ceiling: total stays at maximum
    let status = handle.status().await.unwrap();
    assert_eq!(status.free + status.used, 4);
}

#[tokio::test]
async fn releasing_everything_shrinks_back_to_minimum() {
    let handle = spawn(config(2, 4), token_factory()).unwrap();

    let mut held = Vec::new();
    for _ in 0..4 {
        held.push(handle.acquire().await.unwrap());
    }

    // Releasing in sequence drops utilization; surplus resources are
    // discarded instead of growing free past the floor
    let mut depths = Vec::new();
    for resource in held {
        depths.push(handle.release(resource).await.unwrap());
    }
    assert_eq!(depths, vec![1, 2, 2, 2]);

    let status = handle.status().await.unwrap();
    assert_eq!(status.free, 2);
    assert_eq!(status.used, 0);
}

#[tokio::test]
async fn pool_never_shrinks_below_minimum() {
    let handle = spawn(config(3, 3), token_factory()).unwrap();

    let held = handle.acquire().await.unwrap();
    let depth = handle.release(held).await.unwrap();

    // usage fell to 0 but total == minimum: the resource is kept
    assert_eq!(depth, 3);
    assert_eq!(handle.status().await.unwrap().free, 3);
}
