// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool state machine
//!
//! Tracks free resources, the leased count, and the FIFO waiter queue, and
//! applies the grow/shrink policy on every transition. Transitions are pure
//! decisions: side effects (factory calls, replies, timers, reports) are
//! returned as [`PoolEffect`]s for the engine to execute.
//!
//! Resources are opaque and owned, so transitions mutate the pool in place
//! and move resources out through the effects instead of cloning state.

use crate::config::PoolConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Lease utilization above which the pool grows by one (when below maximum)
const GROW_USAGE: f64 = 0.6;

/// Lease utilization below which a returned resource is discarded
/// (when above minimum)
const SHRINK_USAGE: f64 = 0.5;

/// Identity of a pending acquire, unique within one pool
///
/// The coordinator issues these from a monotonic sequence, so a deadline
/// firing can be matched against the waiter queue race-free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaiterId(pub u64);

impl fmt::Display for WaiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pending acquire with no resource assigned yet
///
/// The reply channel and deadline timer live in the engine, keyed by `id`;
/// the state machine only tracks arrival order and identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Waiter {
    pub id: WaiterId,
}

/// Point-in-time pool counters, as reported by `status()`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    /// Resources available for lease
    pub free: u32,
    /// Resources currently checked out
    pub used: u32,
    /// Pending acquires with no resource assigned
    pub waiting: u32,
    /// Pool depth as reported to callers (mirrors `free`)
    pub pool_size: u32,
}

/// Events that drive pool transitions
#[derive(Debug)]
pub enum PoolInput<T> {
    /// A caller wants a resource; `deadline` bounds how long it will wait
    Acquire {
        waiter_id: WaiterId,
        deadline: Option<Duration>,
    },
    /// A caller returns a resource
    Release { resource: T },
    /// A waiter's deadline fired
    Deadline { waiter_id: WaiterId },
    /// The factory produced a resource (growth or initial fill)
    Created { resource: T },
    /// Periodic report trigger
    Tick,
}

/// Side effects requested by a transition
#[derive(Debug)]
pub enum PoolEffect<T> {
    /// Fulfill a waiter's reply slot with a resource
    Lease { waiter_id: WaiterId, resource: T },
    /// Fulfill a waiter's reply slot with the empty outcome
    Expire { waiter_id: WaiterId },
    /// Invoke the factory once; feed the result back as `Created`
    Create,
    /// Schedule a deadline for a queued waiter
    StartDeadline { waiter_id: WaiterId, after: Duration },
    /// Cancel a waiter's deadline, if one was scheduled
    CancelDeadline { waiter_id: WaiterId },
    /// Drop a returned resource (shrink)
    Discard { resource: T },
    /// Emit a usage report
    Report(PoolStatus),
}

/// Pool state machine
///
/// Owned exclusively by the coordinator; every transition is applied one at
/// a time, in arrival order, which is what makes the invariants hold
/// without any locking here.
#[derive(Debug)]
pub struct Pool<T> {
    minimum: u32,
    maximum: u32,
    /// Available resources, most-recently-released first
    free: VecDeque<T>,
    /// Number of resources currently checked out
    leased: u32,
    /// Pending acquires in arrival order
    waiters: VecDeque<Waiter>,
}

impl<T> Pool<T> {
    /// Create an empty pool with the configured bounds
    ///
    /// The initial fill happens through `Created` inputs, one per resource
    /// the factory produces.
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            minimum: config.minimum,
            maximum: config.maximum,
            free: VecDeque::new(),
            leased: 0,
            waiters: VecDeque::new(),
        }
    }

    /// Current counters; no side effects
    pub fn status(&self) -> PoolStatus {
        let free = self.free.len() as u32;
        PoolStatus {
            free,
            used: self.leased,
            waiting: self.waiters.len() as u32,
            pool_size: free,
        }
    }

    /// Total live resources (free plus leased)
    fn total(&self) -> u32 {
        self.free.len() as u32 + self.leased
    }

    /// Apply one input and return the effects to execute
    pub fn apply(&mut self, input: PoolInput<T>) -> Vec<PoolEffect<T>> {
        match input {
            PoolInput::Acquire {
                waiter_id,
                deadline,
            } => self.acquire(waiter_id, deadline),
            PoolInput::Release { resource } => self.release(resource),
            PoolInput::Deadline { waiter_id } => self.deadline_fired(waiter_id),
            PoolInput::Created { resource } => self.created(resource),
            PoolInput::Tick => vec![PoolEffect::Report(self.status())],
        }
    }

    fn acquire(&mut self, waiter_id: WaiterId, deadline: Option<Duration>) -> Vec<PoolEffect<T>> {
        match self.free.pop_front() {
            Some(resource) => {
                self.leased += 1;
                let mut effects = vec![PoolEffect::Lease {
                    waiter_id,
                    resource,
                }];
                if self.should_grow() {
                    effects.push(PoolEffect::Create);
                }
                effects
            }
            None => {
                self.waiters.push_back(Waiter { id: waiter_id });
                match deadline {
                    Some(after) => vec![PoolEffect::StartDeadline { waiter_id, after }],
                    // No deadline: the caller blocks until a release arrives
                    None => vec![],
                }
            }
        }
    }

    fn release(&mut self, resource: T) -> Vec<PoolEffect<T>> {
        // A free resource is never held while a waiter exists: the oldest
        // waiter takes the resource directly, bypassing `free`. One lease
        // ends and another begins, so `leased` is unchanged.
        if let Some(waiter) = self.waiters.pop_front() {
            return vec![
                PoolEffect::CancelDeadline { waiter_id: waiter.id },
                PoolEffect::Lease {
                    waiter_id: waiter.id,
                    resource,
                },
            ];
        }

        let remaining = self.leased.saturating_sub(1);
        let total = self.total();
        let effects = if total > self.minimum && usage(remaining, total) < SHRINK_USAGE {
            // Contract by one: the returned resource is dropped, not pooled
            vec![PoolEffect::Discard { resource }]
        } else {
            self.free.push_front(resource);
            vec![]
        };
        self.leased = remaining;
        effects
    }

    fn deadline_fired(&mut self, waiter_id: WaiterId) -> Vec<PoolEffect<T>> {
        // Only act if the waiter is still queued; a firing that lost the
        // race against a release is a no-op.
        match self.waiters.iter().position(|w| w.id == waiter_id) {
            Some(index) => {
                self.waiters.remove(index);
                vec![PoolEffect::Expire { waiter_id }]
            }
            None => vec![],
        }
    }

    fn created(&mut self, resource: T) -> Vec<PoolEffect<T>> {
        // Asynchronously produced resources re-enter like a release: satisfy
        // the oldest waiter first, otherwise replenish `free`.
        if let Some(waiter) = self.waiters.pop_front() {
            self.leased += 1;
            return vec![
                PoolEffect::CancelDeadline { waiter_id: waiter.id },
                PoolEffect::Lease {
                    waiter_id: waiter.id,
                    resource,
                },
            ];
        }
        self.free.push_front(resource);
        vec![]
    }

    fn should_grow(&self) -> bool {
        let total = self.total();
        total < self.maximum && usage(self.leased, total) > GROW_USAGE
    }
}

fn usage(leased: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(leased) / f64::from(total)
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
