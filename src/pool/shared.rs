// src/pool/shared.rs
//! Lock-free shared ring pool.
//!
//! # Why pool rings at all
//!
//! Ring capacity never shrinks. A ring that served one busy connection has
//! already paid its growth cost; recycling it hands the next consumer a
//! ring that will likely never grow again. The pool turns a per-connection
//! amortized cost into a process-lifetime one.
//!
//! # Concurrency
//!
//! Acquire and return go through a `crossbeam::queue::SegQueue`, so the
//! pool itself is safe to share across threads via `Arc`. The rings it
//! hands out are still single-owner structures — the pool moves ownership,
//! it does not add synchronization to the ring.
//!
//! The idle counter and the queue are not updated in a single transaction,
//! so the pool may transiently exceed `max_pool_size` by a small constant
//! under heavy concurrency. This is a documented best-effort bound.

use super::config::PoolConfig;
use super::stats::PoolStats;
use crate::ring::RingBuffer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wrapper around `crossbeam::SegQueue` that tracks an approximate length.
///
/// The counter and the queue are **not** updated atomically, so `len()`
/// may be briefly stale. This is acceptable for pool-sizing heuristics.
struct LockFreeQueue<T> {
    items: crossbeam::queue::SegQueue<T>,
    size: AtomicUsize,
}

impl<T> LockFreeQueue<T> {
    fn new() -> Self {
        Self {
            items: crossbeam::queue::SegQueue::new(),
            size: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn push(&self, item: T) {
        self.items.push(item);
        self.size.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn pop(&self) -> Option<T> {
        self.items.pop().inspect(|_| {
            self.size.fetch_sub(1, Ordering::Relaxed);
        })
    }

    /// Approximate queue length — may be briefly stale.
    #[inline]
    fn len(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }
}

pub(crate) struct PoolStatsInner {
    pub(crate) allocated: AtomicUsize,
    pub(crate) acquired: AtomicUsize,
    pub(crate) returned: AtomicUsize,
}

impl PoolStatsInner {
    fn new() -> Self {
        Self {
            allocated: AtomicUsize::new(0),
            acquired: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
        }
    }
}

/// Thread-safe pool of [`RingBuffer`]s.
///
/// # Example
///
/// ```rust
/// use evring::prelude::*;
/// use std::sync::Arc;
/// use std::thread;
///
/// let pool: Arc<RingPool<u32>> = Arc::new(RingPool::new(PoolConfig::default()));
///
/// let handles: Vec<_> = (0..4).map(|_| {
///     let pool = Arc::clone(&pool);
///     thread::spawn(move || {
///         for i in 0..100u32 {
///             let mut ring = pool.acquire();
///             ring.push(i);
///             ring.pop();
///         }
///     })
/// }).collect();
/// for h in handles { h.join().unwrap(); }
///
/// assert_eq!(pool.stats().acquired, 400);
/// ```
pub struct RingPool<T> {
    idle: Arc<LockFreeQueue<RingBuffer<T>>>,
    config: PoolConfig,
    stats: Arc<PoolStatsInner>,
}

impl<T: Copy + Default> RingPool<T> {
    /// Creates a new pool and pre-warms it with `config.min_pool_size` rings.
    pub fn new(config: PoolConfig) -> Self {
        let idle = Arc::new(LockFreeQueue::new());
        for _ in 0..config.min_pool_size {
            idle.push(RingBuffer::new(config.ring_capacity));
        }
        Self {
            idle,
            config,
            stats: Arc::new(PoolStatsInner::new()),
        }
    }

    /// Acquires a ring from the pool, allocating a fresh one if none is idle.
    ///
    /// The returned [`PooledRing`] is cleared and handed back to the pool
    /// when it goes out of scope.
    pub fn acquire(&self) -> PooledRing<T> {
        self.stats.acquired.fetch_add(1, Ordering::Relaxed);

        let ring = self.idle.pop().unwrap_or_else(|| {
            self.stats.allocated.fetch_add(1, Ordering::Relaxed);
            RingBuffer::new(self.config.ring_capacity)
        });

        PooledRing {
            ring: Some(ring),
            idle: Arc::clone(&self.idle),
            max_pool_size: self.config.max_pool_size,
            stats: Arc::clone(&self.stats),
        }
    }

    /// Pre-allocates rings until approximately `target_size` are idle
    /// (capped at `max_pool_size`).
    ///
    /// **Note:** `len()` and the pushes are not atomic, so concurrent calls
    /// may transiently push the pool slightly above the target. Callers
    /// should not rely on the pool size being exact.
    pub fn warm(&self, target_size: usize) {
        let target = target_size.min(self.config.max_pool_size);
        let current = self.idle.len();
        for _ in current..target {
            self.idle.push(RingBuffer::new(self.config.ring_capacity));
        }
    }
}

impl<T> RingPool<T> {
    /// Number of rings currently idle in the pool.
    #[inline]
    pub fn available(&self) -> usize {
        self.idle.len()
    }

    /// Returns a snapshot of pool statistics.
    ///
    /// All counters use `Relaxed` ordering; values are eventually consistent.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            available: self.idle.len(),
            allocated: self.stats.allocated.load(Ordering::Relaxed),
            acquired: self.stats.acquired.load(Ordering::Relaxed),
            returned: self.stats.returned.load(Ordering::Relaxed),
        }
    }

    /// Drains the idle pool to zero.
    ///
    /// Rings currently on loan are unaffected; they are dropped instead of
    /// returned only if the pool is full when they come back.
    pub fn clear(&self) {
        while self.idle.pop().is_some() {}
    }
}

impl<T: Copy + Default> Default for RingPool<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

/// A ring borrowed from a [`RingPool`].
///
/// On drop the ring is cleared and returned to the pool if space permits,
/// otherwise dropped. The ring keeps any capacity it grew while on loan —
/// that retained capacity is the point of pooling.
///
/// Use [`leak`](Self::leak) to opt out of automatic return.
pub struct PooledRing<T> {
    ring: Option<RingBuffer<T>>,
    idle: Arc<LockFreeQueue<RingBuffer<T>>>,
    max_pool_size: usize,
    stats: Arc<PoolStatsInner>,
}

impl<T> PooledRing<T> {
    /// Extracts the ring from the pool wrapper without returning it.
    pub fn leak(mut self) -> RingBuffer<T> {
        self.ring.take().unwrap()
    }
}

impl<T> std::ops::Deref for PooledRing<T> {
    type Target = RingBuffer<T>;
    fn deref(&self) -> &Self::Target {
        self.ring.as_ref().unwrap()
    }
}

impl<T> std::ops::DerefMut for PooledRing<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ring.as_mut().unwrap()
    }
}

impl<T> Drop for PooledRing<T> {
    /// Clears the ring and returns it to the pool if space is available.
    ///
    /// `clear` resets the cursors only; stale element copies remain in the
    /// slots. Callers staging sensitive records should call
    /// [`RingBuffer::burn`] before dropping the guard.
    fn drop(&mut self) {
        if let Some(mut ring) = self.ring.take() {
            ring.clear();
            self.stats.returned.fetch_add(1, Ordering::Relaxed);

            // Best-effort size cap — see module docs.
            if self.idle.len() < self.max_pool_size {
                self.idle.push(ring);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_basic() {
        let pool: RingPool<u32> = RingPool::new(PoolConfig {
            ring_capacity: 8,
            max_pool_size: 10,
            min_pool_size: 2,
        });
        assert_eq!(pool.available(), 2);
        let _ring = pool.acquire();
        assert_eq!(pool.stats().acquired, 1);
    }

    #[test]
    fn test_returned_ring_is_reset() {
        let pool: RingPool<u32> = RingPool::new(PoolConfig {
            ring_capacity: 4,
            max_pool_size: 2,
            min_pool_size: 0,
        });

        {
            let mut ring = pool.acquire();
            ring.push(1);
            ring.push(2);
        } // dropped → cleared → returned to pool

        let ring = pool.acquire();
        assert!(ring.is_empty());
        assert_eq!(pool.stats().returned, 1);
    }

    #[test]
    fn test_grown_capacity_retained_across_reuse() {
        let pool: RingPool<u32> = RingPool::new(PoolConfig {
            ring_capacity: 2,
            max_pool_size: 4,
            min_pool_size: 0,
        });

        {
            let mut ring = pool.acquire();
            for i in 0..10 {
                ring.push(i);
            }
            assert!(ring.capacity() >= 10);
        }

        let ring = pool.acquire();
        assert!(ring.capacity() >= 10);
        assert_eq!(pool.stats().allocated, 1);
    }

    #[test]
    fn test_leak() {
        let pool: RingPool<u8> = RingPool::new(PoolConfig {
            ring_capacity: 4,
            max_pool_size: 10,
            min_pool_size: 1,
        });
        let pooled = pool.acquire();
        let _owned = pooled.leak();
        assert_eq!(pool.stats().returned, 0);
    }

    #[test]
    fn test_max_size_enforcement() {
        let pool: RingPool<u8> = RingPool::new(PoolConfig {
            ring_capacity: 4,
            max_pool_size: 5,
            min_pool_size: 2,
        });

        for _ in 0..20 {
            let ring = pool.acquire();
            drop(ring);
        }

        assert!(pool.available() <= 5);
    }

    #[test]
    fn test_warm_and_clear() {
        let pool: RingPool<u16> = RingPool::new(PoolConfig {
            ring_capacity: 4,
            max_pool_size: 20,
            min_pool_size: 0,
        });
        pool.warm(10);
        assert!(pool.available() <= 10);
        assert!(pool.available() > 0);
        pool.clear();
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_multi_thread() {
        use std::sync::Arc;
        use std::thread;

        let pool: Arc<RingPool<u32>> = Arc::new(RingPool::new(PoolConfig {
            ring_capacity: 8,
            max_pool_size: 64,
            min_pool_size: 4,
        }));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..100u32 {
                        let mut ring = p.acquire();
                        ring.push(i);
                        assert_eq!(ring.pop(), Some(i));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let s = pool.stats();
        assert_eq!(s.acquired, 400);
        assert_eq!(s.returned, 400);
        assert!(s.hit_rate() >= 0.0);
    }
}
