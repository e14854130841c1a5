// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-facing pool handle

use crate::error::PoolError;
use crate::protocol::Request;
use reservoir_core::PoolStatus;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A cloneable handle to a pool coordinator
///
/// All operations are request/response over the coordinator's channel, so
/// every caller observes a state that reflects all previously completed
/// operations.
#[derive(Debug)]
pub struct PoolHandle<T> {
    requests: mpsc::Sender<Request<T>>,
}

// Manual impl: a handle is cloneable regardless of whether T is
impl<T> Clone for PoolHandle<T> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
        }
    }
}

impl<T: Send> PoolHandle<T> {
    pub(crate) fn new(requests: mpsc::Sender<Request<T>>) -> Self {
        Self { requests }
    }

    /// Lease a resource, waiting indefinitely for one to become available
    pub async fn acquire(&self) -> Result<T, PoolError> {
        match self.request_acquire(None).await? {
            Some(resource) => Ok(resource),
            // No deadline was set, so an empty reply cannot be a timeout
            None => Err(PoolError::Closed),
        }
    }

    /// Lease a resource, waiting at most `deadline`
    ///
    /// `Ok(None)` is the empty outcome: no resource became available in
    /// time. It is a normal branch, not a failure.
    pub async fn acquire_timeout(&self, deadline: Duration) -> Result<Option<T>, PoolError> {
        self.request_acquire(Some(deadline)).await
    }

    /// Return a resource to the pool
    ///
    /// The acknowledgement carries the resulting pool depth (number of free
    /// resources).
    pub async fn release(&self, resource: T) -> Result<u32, PoolError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Release { resource, reply })
            .await
            .map_err(|_| PoolError::Closed)?;
        response.await.map_err(|_| PoolError::Closed)
    }

    /// Snapshot the pool counters; no side effects
    pub async fn status(&self) -> Result<PoolStatus, PoolError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Status { reply })
            .await
            .map_err(|_| PoolError::Closed)?;
        response.await.map_err(|_| PoolError::Closed)
    }

    async fn request_acquire(&self, deadline: Option<Duration>) -> Result<Option<T>, PoolError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Acquire { deadline, reply })
            .await
            .map_err(|_| PoolError::Closed)?;
        response.await.map_err(|_| PoolError::Closed)
    }
}
