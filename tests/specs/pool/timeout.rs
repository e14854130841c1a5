//! Deadline specs
//!
//! A timed acquire that sees no release within its deadline resolves to
//! the empty outcome exactly once and leaves the queue clean.

use crate::prelude::*;
use reservoir_engine::spawn;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn timed_acquire_resolves_empty_after_deadline() {
    let handle = spawn(config(0, 2), token_factory()).unwrap();

    let outcome = handle
        .acquire_timeout(Duration::from_millis(200))
        .await
        .unwrap();

    assert_eq!(outcome, None);
    assert_eq!(handle.status().await.unwrap().waiting, 0);
}

#[tokio::test(start_paused = true)]
async fn deadline_does_not_fire_for_a_served_waiter() {
    let handle = spawn(config(1, 1), token_factory()).unwrap();
    let held = handle.acquire().await.unwrap();

    let waiter = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .acquire_timeout(Duration::from_millis(100))
                .await
                .unwrap()
        })
    };
    wait_for_waiting(&handle, 1).await;

    // Release wins the race; the pending deadline must become a no-op
    handle.release(held).await.unwrap();
    assert_eq!(waiter.await.unwrap(), Some(held));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let status = handle.status().await.unwrap();
    assert_eq!(status.waiting, 0);
    assert_eq!(status.used, 1);
}

#[tokio::test(start_paused = true)]
async fn release_after_expiry_replenishes_the_pool() {
    let handle = spawn(config(1, 1), token_factory()).unwrap();
    let held = handle.acquire().await.unwrap();

    let expired = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .acquire_timeout(Duration::from_millis(50))
                .await
                .unwrap()
        })
    };
    assert_eq!(expired.await.unwrap(), None);

    // The waiter already got its empty reply; the release lands in free
    let depth = handle.release(held).await.unwrap();
    assert_eq!(depth, 1);
    assert_eq!(handle.status().await.unwrap().waiting, 0);
}

#[tokio::test(start_paused = true)]
async fn each_timed_waiter_expires_independently() {
    let handle = spawn(config(0, 2), token_factory()).unwrap();

    let short = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .acquire_timeout(Duration::from_millis(50))
                .await
                .unwrap()
        })
    };
    wait_for_waiting(&handle, 1).await;

    let long = {
        let handle = handle.clone();
        tokio::spawn(async move {
            handle
                .acquire_timeout(Duration::from_millis(5_000))
                .await
                .unwrap()
        })
    };
    wait_for_waiting(&handle, 2).await;

    // The short deadline fires first; the long waiter is still queued
    assert_eq!(short.await.unwrap(), None);
    assert_eq!(handle.status().await.unwrap().waiting, 1);

    // A release then serves the surviving waiter
    handle.release(9).await.unwrap();
    assert_eq!(long.await.unwrap(), Some(9));
}
