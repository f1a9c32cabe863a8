// src/lib.rs
//! # Growable Ring Buffers for Event-Loop Staging
//!
//! A small FIFO toolkit for reactor-style servers: tiny fixed-size records
//! (pending connections, buffered work items) get staged between event-loop
//! stages through a contiguous, allocation-predictable ring that doubles in
//! place when it fills.
//!
//! Features:
//! - [`RingBuffer<T>`]: growable circular FIFO with amortized-O(1) push,
//!   O(1) pop, and order-preserving doubling growth
//! - [`Stage<T>`]: bounded staging queue with back-pressure, watermark and
//!   lifetime counters for the producing/consuming reactor stages
//! - [`RingPool<T>`]: lock-free ring reuse so grown capacity outlives any
//!   single consumer
//! - [`LiveSnapshot<T>`]: ticker-refreshed shared state as an explicit
//!   handle instead of a process-wide global
//! - Secure wipe of staged records via the [`zeroize`] crate (`burn`)
//!
//! The core ring is intentionally **not** thread-safe: it is meant to live
//! inside one event-loop tick or behind the caller's own lock. The pool
//! and snapshot types are the shareable pieces around it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod pool;
pub mod ring;
pub mod stage;

// Re-export main types
pub use clock::{LiveSnapshot, RefreshHandle};
pub use error::{Result, ResultExt, RingError};
pub use pool::{PoolConfig, PoolStats, PooledRing, RingPool};
pub use ring::RingBuffer;
pub use stage::{Stage, StageConfig, StageStats};

/// Commonly used imports.
pub mod prelude {
    pub use crate::clock::{LiveSnapshot, RefreshHandle};
    pub use crate::error::{Result, ResultExt, RingError};
    pub use crate::pool::{PoolConfig, PoolStats, PooledRing, RingPool};
    pub use crate::ring::RingBuffer;
    pub use crate::stage::{Stage, StageConfig, StageStats};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_basic_ring() {
        let mut ring = RingBuffer::new(2);
        ring.push(1u32);
        ring.push(2);
        ring.push(3); // grows

        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_stage_backpressure() {
        let mut stage = Stage::with_config(StageConfig {
            initial_capacity: 2,
            max_staged: 2,
        });
        stage.stage(1u8).unwrap();
        stage.stage(2).unwrap();
        assert!(stage.stage(3).is_err());
    }

    #[test]
    fn test_pooled_stage_pipeline() {
        let pool: RingPool<u32> = RingPool::new(PoolConfig::default());

        let mut ring = pool.acquire();
        for i in 0..100 {
            ring.push(i);
        }
        let mut next = 0;
        while let Some(v) = ring.pop() {
            assert_eq!(v, next);
            next += 1;
        }
        assert_eq!(next, 100);
    }

    #[test]
    fn test_snapshot_handle() {
        let snapshot = LiveSnapshot::new(String::from("Mon, 01 Jan 2024 00:00:00 GMT"));
        let reader = snapshot.clone();
        snapshot.store(String::from("Tue, 02 Jan 2024 00:00:00 GMT"));
        assert!(reader.load().starts_with("Tue"));
    }
}
