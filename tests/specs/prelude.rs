//! Shared helpers for pool behavior specs.

use reservoir_core::PoolConfig;
use reservoir_engine::PoolHandle;
use std::sync::atomic::{AtomicU32, Ordering};

pub fn config(minimum: u32, maximum: u32) -> PoolConfig {
    PoolConfig::new("spec-pool", minimum, maximum)
}

/// Factory producing the distinct tokens 1, 2, 3, ...
pub fn token_factory() -> impl FnMut() -> u32 + Send + 'static {
    let counter = AtomicU32::new(0);
    move || counter.fetch_add(1, Ordering::SeqCst) + 1
}

/// Spin until the pool reports `n` waiters
pub async fn wait_for_waiting(handle: &PoolHandle<u32>, n: u32) {
    while handle.status().await.unwrap().waiting != n {
        tokio::task::yield_now().await;
    }
}
