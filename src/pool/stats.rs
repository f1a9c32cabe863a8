// src/pool/stats.rs
//! Statistics tracking for ring pools.

/// Statistics snapshot for a [`RingPool`](crate::pool::RingPool).
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Number of rings currently idle in the pool
    pub available: usize,
    /// Total number of new rings allocated since pool creation
    pub allocated: usize,
    /// Total number of acquire() calls
    pub acquired: usize,
    /// Total number of rings returned to the pool
    pub returned: usize,
}

impl PoolStats {
    /// Returns the number of rings currently in use (acquired but not returned).
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::prelude::*;
    ///
    /// let pool: RingPool<u32> = RingPool::new(PoolConfig::default());
    /// let _ring = pool.acquire();
    ///
    /// let stats = pool.stats();
    /// assert_eq!(stats.in_use(), 1);
    /// ```
    pub fn in_use(&self) -> usize {
        self.acquired.saturating_sub(self.returned)
    }

    /// Returns the pool hit rate as a percentage (0.0-100.0).
    ///
    /// A higher hit rate indicates better ring reuse and fewer allocations.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::prelude::*;
    ///
    /// let pool: RingPool<u32> = RingPool::new(PoolConfig::default());
    /// for _ in 0..10 {
    ///     let _ring = pool.acquire();
    /// }
    ///
    /// let stats = pool.stats();
    /// assert!(stats.hit_rate() >= 0.0);
    /// assert!(stats.hit_rate() <= 100.0);
    /// ```
    pub fn hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        let reused = self.acquired.saturating_sub(self.allocated);
        (reused as f64 / self.acquired as f64) * 100.0
    }
}
