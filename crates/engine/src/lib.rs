// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reservoir-engine: the pool coordinator actor
//!
//! Owns a [`reservoir_core::Pool`] state machine inside a single tokio task,
//! serializing every acquire, release, deadline firing, and status query in
//! arrival order. Callers interact through a cloneable [`PoolHandle`].

mod coordinator;
mod error;
mod handle;
mod protocol;

pub use coordinator::spawn;
pub use error::PoolError;
pub use handle::PoolHandle;
pub use reservoir_core::{ConfigError, PoolConfig, PoolStatus};
