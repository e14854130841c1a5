// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reservoir-core: Core library for the reservoir resource pool
//!
//! This crate provides:
//! - The pure pool state machine (acquire/release/deadline transitions,
//!   grow/shrink policy)
//! - Pool configuration with validation
//!
//! Nothing here is async or does I/O; the `reservoir-engine` crate drives
//! the state machine and executes its effects.

pub mod config;
pub mod error;
pub mod pool;

// Re-exports
pub use config::PoolConfig;
pub use error::ConfigError;
pub use pool::{Pool, PoolEffect, PoolInput, PoolStatus, Waiter, WaiterId};
