// src/pool/mod.rs
//! Ring pool for reuse across short-lived consumers.

pub(crate) mod config;
pub(crate) mod shared;
pub(crate) mod stats;

pub use config::PoolConfig;
pub use shared::{PooledRing, RingPool};
pub use stats::PoolStats;
