// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the pool engine

use thiserror::Error;

/// Errors surfaced through the pool handle
///
/// Steady-state operations do not fail: a timed-out acquire resolves to the
/// empty outcome, not an error. `Closed` appears only when the coordinator
/// task is gone, e.g. after a panicking factory tore it down.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool coordinator is closed")]
    Closed,
}
