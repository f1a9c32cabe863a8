// src/clock.rs
//! Shared snapshot state refreshed on a ticker.
//!
//! Event-loop servers often keep a read-mostly value that many handlers
//! load on every request but that only changes on a coarse clock — the
//! classic example is a preformatted `Date:` header string refreshed once
//! per second. Making that a process-wide mutable global invites races and
//! hidden initialization order; [`LiveSnapshot`] is the same idea as an
//! explicitly passed handle instead: clone it into whatever stage needs
//! it, and let one [`RefreshHandle`] ticker thread own the updates.
//!
//! Reads go through a `crossbeam::sync::ShardedLock`, which is optimized
//! for exactly this read-mostly pattern.

use crossbeam::sync::ShardedLock;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A cloneable handle to a shared, periodically refreshed value.
///
/// # Examples
///
/// ```
/// use evring::LiveSnapshot;
///
/// let snapshot = LiveSnapshot::new(String::from("boot"));
/// let reader = snapshot.clone();
///
/// snapshot.store(String::from("tick-1"));
/// assert_eq!(reader.load(), "tick-1");
/// ```
pub struct LiveSnapshot<T> {
    slot: Arc<ShardedLock<T>>,
}

impl<T> Clone for LiveSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Clone> LiveSnapshot<T> {
    /// Creates a snapshot holding `initial`.
    ///
    /// The value is valid immediately; readers never observe an
    /// uninitialized state.
    pub fn new(initial: T) -> Self {
        Self {
            slot: Arc::new(ShardedLock::new(initial)),
        }
    }

    /// Returns a clone of the current value.
    pub fn load(&self) -> T {
        self.slot.read().unwrap().clone()
    }

    /// Replaces the current value.
    pub fn store(&self, value: T) {
        *self.slot.write().unwrap() = value;
    }
}

impl<T: Clone + Send + Sync + 'static> LiveSnapshot<T> {
    /// Spawns a background thread that stores `refresh()` every `interval`.
    ///
    /// The thread stops when the returned [`RefreshHandle`] is dropped or
    /// [`stop`](RefreshHandle::stop)ped.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::LiveSnapshot;
    /// use std::time::Duration;
    ///
    /// let snapshot = LiveSnapshot::new(0u64);
    /// let refresher = snapshot.spawn_refresher(Duration::from_millis(5), || 42);
    ///
    /// std::thread::sleep(Duration::from_millis(50));
    /// assert_eq!(snapshot.load(), 42);
    /// refresher.stop();
    /// ```
    pub fn spawn_refresher<F>(&self, interval: Duration, refresh: F) -> RefreshHandle
    where
        F: Fn() -> T + Send + 'static,
    {
        let slot = Arc::clone(&self.slot);
        let (stop_tx, stop_rx) = crossbeam::channel::bounded::<()>(1);

        let thread = thread::spawn(move || {
            let ticks = crossbeam::channel::tick(interval);
            loop {
                crossbeam::select! {
                    recv(ticks) -> _ => {
                        *slot.write().unwrap() = refresh();
                    }
                    // Err means the handle was dropped without an explicit
                    // stop; either way the thread shuts down.
                    recv(stop_rx) -> _ => break,
                }
            }
        });

        RefreshHandle {
            stop_tx,
            thread: Some(thread),
        }
    }
}

/// Owner of a snapshot refresher thread.
///
/// Dropping the handle signals the thread and joins it.
pub struct RefreshHandle {
    stop_tx: crossbeam::channel::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl RefreshHandle {
    /// Stops the refresher thread and waits for it to exit.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
