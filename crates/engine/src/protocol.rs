// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Messages between pool handles and the coordinator

use reservoir_core::{PoolStatus, WaiterId};
use std::time::Duration;
use tokio::sync::oneshot;

/// A request processed by the coordinator, one at a time, in arrival order
#[derive(Debug)]
pub enum Request<T> {
    /// Lease a resource; the reply resolves to `None` only when `deadline`
    /// elapses first (the empty outcome)
    Acquire {
        deadline: Option<Duration>,
        reply: oneshot::Sender<Option<T>>,
    },
    /// Return a resource; acknowledged with the resulting pool depth
    Release {
        resource: T,
        reply: oneshot::Sender<u32>,
    },
    /// Snapshot the current counters
    Status { reply: oneshot::Sender<PoolStatus> },
    /// Internal: a waiter's deadline timer fired
    DeadlineFired { waiter_id: WaiterId },
}
