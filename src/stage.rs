// src/stage.rs
//! Staging queues for handing records between event-loop stages.
//!
//! A reactor rarely uses a bare ring directly: the acceptor stages pending
//! connections for the poller threads, an event handler stages small work
//! records for the next tick. [`Stage`] wraps a [`RingBuffer`] with a
//! configured hard cap and lifetime counters so that the producing side
//! gets back-pressure ([`RingError::StageFull`]) instead of unbounded
//! growth, while the ring underneath still grows freely up to that cap.

use crate::error::{Result, RingError};
use crate::ring::RingBuffer;
use zeroize::Zeroize;

/// Configuration for a staging queue.
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Ring capacity allocated up front
    pub initial_capacity: usize,
    /// Hard cap on staged elements (prevents unbounded growth)
    pub max_staged: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_staged: 4096,
        }
    }
}

impl StageConfig {
    /// Configuration with no element limit.
    ///
    /// The ring still stops doubling at
    /// [`MAX_RING_CAPACITY`](crate::ring::MAX_RING_CAPACITY).
    pub fn unbounded() -> Self {
        Self {
            initial_capacity: 16,
            max_staged: usize::MAX,
        }
    }
}

/// A bounded staging queue between event-loop stages.
///
/// FIFO semantics come from the [`RingBuffer`] underneath; the stage adds
/// the limit, the watermark check and the counters a reactor wants for
/// monitoring.
///
/// # Examples
///
/// ```
/// use evring::prelude::*;
///
/// let mut stage = Stage::new();
/// stage.stage(17u32)?;
/// stage.stage(18)?;
///
/// assert_eq!(stage.take(), Some(17));
/// assert_eq!(stage.take(), Some(18));
/// assert_eq!(stage.take(), None);
/// # Ok::<(), evring::RingError>(())
/// ```
pub struct Stage<T> {
    ring: RingBuffer<T>,
    config: StageConfig,
    /// Elements accepted since creation
    total_staged: u64,
    /// Elements handed out since creation
    total_drained: u64,
}

impl<T: Copy + Default> Stage<T> {
    /// Creates a staging queue with default limits.
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    /// Creates a staging queue with custom limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::prelude::*;
    ///
    /// let config = StageConfig {
    ///     initial_capacity: 4,
    ///     max_staged: 64,
    /// };
    /// let stage: Stage<u32> = Stage::with_config(config);
    /// assert_eq!(stage.len(), 0);
    /// ```
    pub fn with_config(config: StageConfig) -> Self {
        Self {
            ring: RingBuffer::new(config.initial_capacity),
            config,
            total_staged: 0,
            total_drained: 0,
        }
    }

    /// Stages an element for the next pipeline stage.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::StageFull`] if the queue already holds
    /// `max_staged` elements. The element is not enqueued; the caller
    /// decides whether to drop, retry, or shed load.
    pub fn stage(&mut self, item: T) -> Result<()> {
        if self.ring.len() >= self.config.max_staged {
            return Err(RingError::StageFull);
        }
        self.ring.push(item);
        self.total_staged += 1;
        Ok(())
    }

    /// Takes the oldest staged element, or `None` if the stage is empty.
    pub fn take(&mut self) -> Option<T> {
        let item = self.ring.pop();
        if item.is_some() {
            self.total_drained += 1;
        }
        item
    }

    /// Drains every staged element into `f`, in FIFO order.
    ///
    /// Returns the number of elements handed out. Typical use is one
    /// event-loop tick consuming everything the previous stage queued.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::prelude::*;
    ///
    /// let mut stage = Stage::new();
    /// for i in 0..5u32 {
    ///     stage.stage(i)?;
    /// }
    ///
    /// let mut out = Vec::new();
    /// let n = stage.drain_with(|v| out.push(v));
    /// assert_eq!(n, 5);
    /// assert_eq!(out, [0, 1, 2, 3, 4]);
    /// # Ok::<(), evring::RingError>(())
    /// ```
    pub fn drain_with<F: FnMut(T)>(&mut self, mut f: F) -> usize {
        let mut drained = 0;
        while let Some(item) = self.ring.pop() {
            f(item);
            drained += 1;
        }
        self.total_drained += drained as u64;
        drained
    }
}

impl<T> Stage<T> {
    /// Number of elements currently staged.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if nothing is staged.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Checks if the stage is near its configured limit.
    ///
    /// Returns `true` at 80% or more of `max_staged`; producers can use
    /// this to start shedding load before hitting [`RingError::StageFull`].
    pub fn is_near_full(&self) -> bool {
        let threshold = (self.config.max_staged / 5 * 4).max(1);
        self.ring.len() >= threshold
    }

    /// Returns a snapshot of staging statistics.
    pub fn stats(&self) -> StageStats {
        StageStats {
            staged: self.total_staged,
            drained: self.total_drained,
            in_flight: self.ring.len(),
            ring_capacity: self.ring.capacity(),
        }
    }

    /// Empties the stage without touching the ring storage or counters.
    pub fn reset(&mut self) {
        self.ring.clear();
    }
}

impl<T: Zeroize> Stage<T> {
    /// Zeroizes every ring slot and empties the stage.
    ///
    /// Call before dropping when staged records are sensitive; popped
    /// elements leave stale copies in the ring otherwise.
    pub fn burn(&mut self) {
        self.ring.burn();
    }
}

impl<T: Copy + Default> Default for Stage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics snapshot for a staging queue.
#[derive(Debug, Clone)]
pub struct StageStats {
    /// Elements accepted since creation
    pub staged: u64,
    /// Elements handed out since creation
    pub drained: u64,
    /// Elements currently staged
    pub in_flight: usize,
    /// Current capacity of the underlying ring
    pub ring_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_take_roundtrip() {
        let mut stage = Stage::new();
        stage.stage(1u32).unwrap();
        stage.stage(2).unwrap();
        assert_eq!(stage.len(), 2);
        assert_eq!(stage.take(), Some(1));
        assert_eq!(stage.take(), Some(2));
        assert_eq!(stage.take(), None);
    }

    #[test]
    fn test_stage_limit() {
        let mut stage = Stage::with_config(StageConfig {
            initial_capacity: 2,
            max_staged: 3,
        });
        stage.stage(1u32).unwrap();
        stage.stage(2).unwrap();
        stage.stage(3).unwrap();
        assert_eq!(stage.stage(4), Err(RingError::StageFull));
        // Draining frees room again.
        assert_eq!(stage.take(), Some(1));
        stage.stage(4).unwrap();
    }

    #[test]
    fn test_ring_grows_under_limit() {
        let mut stage = Stage::with_config(StageConfig {
            initial_capacity: 2,
            max_staged: 100,
        });
        for i in 0..50u32 {
            stage.stage(i).unwrap();
        }
        assert!(stage.stats().ring_capacity >= 50);
        for i in 0..50u32 {
            assert_eq!(stage.take(), Some(i));
        }
    }

    #[test]
    fn test_near_full_watermark() {
        let mut stage = Stage::with_config(StageConfig {
            initial_capacity: 16,
            max_staged: 100,
        });
        for i in 0..79u32 {
            stage.stage(i).unwrap();
        }
        assert!(!stage.is_near_full());
        stage.stage(79).unwrap();
        assert!(stage.is_near_full());
    }

    #[test]
    fn test_stats() {
        let mut stage = Stage::new();
        for i in 0..10u32 {
            stage.stage(i).unwrap();
        }
        stage.take();
        stage.take();
        let stats = stage.stats();
        assert_eq!(stats.staged, 10);
        assert_eq!(stats.drained, 2);
        assert_eq!(stats.in_flight, 8);
    }

    #[test]
    fn test_drain_with_counts() {
        let mut stage = Stage::new();
        for i in 0..7u32 {
            stage.stage(i).unwrap();
        }
        let mut sum = 0u32;
        let n = stage.drain_with(|v| sum += v);
        assert_eq!(n, 7);
        assert_eq!(sum, 21);
        assert!(stage.is_empty());
        assert_eq!(stage.stats().drained, 7);
    }

    #[test]
    fn test_reset_keeps_counters() {
        let mut stage = Stage::new();
        stage.stage(1u32).unwrap();
        stage.reset();
        assert!(stage.is_empty());
        assert_eq!(stage.stats().staged, 1);
    }

    #[test]
    fn test_burn() {
        let mut stage = Stage::new();
        stage.stage(0xFFFF_FFFFu32).unwrap();
        stage.burn();
        assert!(stage.is_empty());
    }
}
