// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pool coordinator task
//!
//! A single task owns the pool state machine and processes requests one at
//! a time in arrival order, so no two transitions ever interleave. Effects
//! produced by a transition are executed before the next request is taken;
//! inputs they generate (factory output, recycled resources) are fed back
//! through the same dispatch loop first.

use crate::handle::PoolHandle;
use crate::protocol::Request;
use reservoir_core::{ConfigError, Pool, PoolConfig, PoolEffect, PoolInput, WaiterId};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Requests queued ahead of the coordinator before senders start waiting
const REQUEST_BUFFER: usize = 64;

/// Spawn a pool coordinator and return a handle to it
///
/// Validates the configuration, invokes the factory exactly
/// `config.minimum` times to fill the pool, then launches the coordinator
/// task on the current tokio runtime. Each call creates an independent
/// pool; there is no process-wide registry.
pub fn spawn<T, F>(config: PoolConfig, mut factory: F) -> Result<PoolHandle<T>, ConfigError>
where
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
{
    config.validate()?;

    let mut pool = Pool::new(&config);
    for _ in 0..config.minimum {
        // No waiters can exist yet, so the fill produces no effects
        let _ = pool.apply(PoolInput::Created {
            resource: factory(),
        });
    }

    let (requests_tx, requests_rx) = mpsc::channel(REQUEST_BUFFER);
    let coordinator = Coordinator {
        name: config.name,
        pool,
        factory,
        next_waiter: 0,
        requests: requests_rx,
        internal: requests_tx.clone(),
        replies: HashMap::new(),
        deadlines: HashMap::new(),
        report_interval: config.report_interval,
    };
    tokio::spawn(coordinator.run());

    Ok(PoolHandle::new(requests_tx))
}

/// The coordinator: sole owner and mutator of the pool state
struct Coordinator<T, F> {
    name: String,
    pool: Pool<T>,
    factory: F,
    /// Monotonic source of waiter identities
    next_waiter: u64,
    requests: mpsc::Receiver<Request<T>>,
    /// Sender handed to deadline timer tasks so firings re-enter the
    /// request stream and are serialized like any other operation
    internal: mpsc::Sender<Request<T>>,
    /// One-shot reply slot per outstanding acquire, keyed by waiter id.
    /// A slot is consumed exactly once, by a lease or by expiry.
    replies: HashMap<WaiterId, oneshot::Sender<Option<T>>>,
    /// Abort handles for pending deadline timers
    deadlines: HashMap<WaiterId, AbortHandle>,
    report_interval: Duration,
}

impl<T, F> Coordinator<T, F>
where
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
{
    async fn run(mut self) {
        let first = tokio::time::Instant::now() + self.report_interval;
        let mut report = tokio::time::interval_at(first, self.report_interval);
        report.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                _ = report.tick() => self.dispatch(PoolInput::Tick),
            }
        }
    }

    fn handle_request(&mut self, request: Request<T>) {
        match request {
            Request::Acquire { deadline, reply } => {
                self.next_waiter += 1;
                let waiter_id = WaiterId(self.next_waiter);
                self.replies.insert(waiter_id, reply);
                self.dispatch(PoolInput::Acquire { waiter_id, deadline });
            }
            Request::Release { resource, reply } => {
                self.dispatch(PoolInput::Release { resource });
                // Ack with the depth after the shrink decision
                let _ = reply.send(self.pool.status().free);
            }
            Request::Status { reply } => {
                let _ = reply.send(self.pool.status());
            }
            Request::DeadlineFired { waiter_id } => {
                self.deadlines.remove(&waiter_id);
                self.dispatch(PoolInput::Deadline { waiter_id });
            }
        }
    }

    /// Run one input through the state machine and execute its effects,
    /// draining any inputs the effects generate before returning
    fn dispatch(&mut self, input: PoolInput<T>) {
        let mut pending = VecDeque::from([input]);
        while let Some(input) = pending.pop_front() {
            for effect in self.pool.apply(input) {
                if let Some(followup) = self.execute(effect) {
                    pending.push_back(followup);
                }
            }
        }
    }

    fn execute(&mut self, effect: PoolEffect<T>) -> Option<PoolInput<T>> {
        match effect {
            PoolEffect::Lease {
                waiter_id,
                resource,
            } => match self.replies.remove(&waiter_id) {
                Some(reply) => match reply.send(Some(resource)) {
                    Ok(()) => None,
                    Err(returned) => {
                        // The caller gave up on the acquire; recycle the
                        // resource so it is not lost.
                        warn!(
                            pool = %self.name,
                            %waiter_id,
                            "acquire abandoned by caller, recycling resource"
                        );
                        returned.map(|resource| PoolInput::Release { resource })
                    }
                },
                None => {
                    // The slot was already consumed; fulfilling twice is a
                    // programming error. Keep the resource accounted for.
                    error!(
                        pool = %self.name,
                        %waiter_id,
                        "reply slot already consumed, recycling resource"
                    );
                    Some(PoolInput::Release { resource })
                }
            },
            PoolEffect::Expire { waiter_id } => {
                match self.replies.remove(&waiter_id) {
                    // The caller may have gone away; an unread empty reply
                    // is harmless
                    Some(reply) => {
                        let _ = reply.send(None);
                    }
                    None => {
                        error!(
                            pool = %self.name,
                            %waiter_id,
                            "expiry for already-consumed reply slot"
                        );
                    }
                }
                None
            }
            PoolEffect::Create => {
                // Inline and blocking: a slow factory delays subsequent
                // requests, the accepted trade-off of the single serializer
                let resource = (self.factory)();
                Some(PoolInput::Created { resource })
            }
            PoolEffect::StartDeadline { waiter_id, after } => {
                let internal = self.internal.clone();
                let timer = tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = internal.send(Request::DeadlineFired { waiter_id }).await;
                });
                self.deadlines.insert(waiter_id, timer.abort_handle());
                None
            }
            PoolEffect::CancelDeadline { waiter_id } => {
                // Absent entry means the waiter had no deadline
                if let Some(timer) = self.deadlines.remove(&waiter_id) {
                    timer.abort();
                }
                None
            }
            PoolEffect::Discard { resource } => {
                drop(resource);
                None
            }
            PoolEffect::Report(status) => {
                info!(
                    pool = %self.name,
                    free = status.free,
                    used = status.used,
                    waiting = status.waiting,
                    "pool usage"
                );
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
