// src/ring/buffer.rs
//! Growable ring (circular) buffer implementation.
//!
//! # Design
//!
//! [`RingBuffer`] stores its elements in one contiguous allocation and
//! treats it as a circular queue via two wrapping cursors plus an explicit
//! length counter. When a push finds the buffer full it doubles the
//! backing storage, re-linearizing the live range so `head` returns to
//! index 0. Capacity therefore never shrinks over a buffer's lifetime —
//! an intentional amortization trade-off that keeps a hot reactor path
//! free of allocation churn.
//!
//! # Element types
//!
//! The buffer is meant for tiny fixed-size records (pending connections,
//! small staging structs) and requires `T: Copy + Default`. Storage is
//! fully initialized with `T::default()`, so slots outside the live range
//! hold stale-but-initialized values; they are never handed out.
//!
//! # Performance
//!
//! - Power-of-2 capacities use fast bitwise modulo (recommended)
//! - Non-power-of-2 capacities use standard modulo (slightly slower)
//! - Doubling keeps `push` amortized O(1); `pop` is always O(1)
//!
//! # Thread safety
//!
//! None, by design. All operations assume a single logical owner; wrap the
//! buffer in a mutex or confine it to one thread if it must be shared.

use zeroize::Zeroize;

/// Maximum ring capacity in slots (2^28).
///
/// Doubling stops here; a `push` that would need more panics, the same way
/// an allocation failure would.
pub const MAX_RING_CAPACITY: usize = 1 << 28;

/// Minimum ring capacity in slots.
///
/// A requested capacity of 0 is promoted to this value so that doubling
/// always makes progress (doubling 0 would yield 0 forever).
pub const MIN_RING_CAPACITY: usize = 1;

/// Capacity used by [`RingBuffer::default`].
pub const DEFAULT_RING_CAPACITY: usize = 16;

/// A growable circular FIFO queue for tiny `Copy` values.
///
/// Elements come back out in exactly the order they went in; a push on a
/// full buffer grows the storage instead of failing, and a pop on an empty
/// buffer returns `None` instead of erroring so callers can poll cheaply.
///
/// # Example
///
/// ```rust
/// use evring::RingBuffer;
///
/// let mut ring = RingBuffer::new(2);
/// ring.push(1u32);
/// ring.push(2);
/// assert!(ring.is_full());
///
/// ring.push(3); // grows to capacity 4
/// assert_eq!(ring.capacity(), 4);
///
/// assert_eq!(ring.pop(), Some(1));
/// assert_eq!(ring.pop(), Some(2));
/// assert_eq!(ring.pop(), Some(3));
/// assert_eq!(ring.pop(), None);
/// ```
pub struct RingBuffer<T> {
    /// Backing storage; slots outside the live range hold stale values
    storage: Box<[T]>,
    /// Index of the oldest live element (meaningless when empty)
    head: usize,
    /// Index where the next pushed element is written
    tail: usize,
    /// Number of live elements
    len: usize,
    /// Whether capacity is power-of-2 (enables fast modulo)
    is_pow2: bool,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Creates a new empty ring with at least `initial_capacity` slots.
    ///
    /// A requested capacity of 0 is silently promoted to
    /// [`MIN_RING_CAPACITY`]; growth doubles the capacity, and doubling 0
    /// would never produce a positive capacity.
    ///
    /// # Panics
    ///
    /// Panics if `initial_capacity` exceeds [`MAX_RING_CAPACITY`].
    /// Use [`try_new`](Self::try_new) for a fallible variant.
    pub fn new(initial_capacity: usize) -> Self {
        assert!(
            initial_capacity <= MAX_RING_CAPACITY,
            "Ring capacity {} exceeds maximum {}",
            initial_capacity,
            MAX_RING_CAPACITY
        );
        let capacity = initial_capacity.max(MIN_RING_CAPACITY);
        Self {
            storage: vec![T::default(); capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
            is_pow2: capacity.is_power_of_two(),
        }
    }

    /// Fallible variant of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`RingError::CapacityTooLarge`](crate::RingError::CapacityTooLarge)
    /// if `initial_capacity` exceeds [`MAX_RING_CAPACITY`].
    pub fn try_new(initial_capacity: usize) -> crate::Result<Self> {
        if initial_capacity > MAX_RING_CAPACITY {
            return Err(crate::RingError::CapacityTooLarge);
        }
        Ok(Self::new(initial_capacity))
    }

    /// Enqueues `value` at the tail.
    ///
    /// Always succeeds; a full buffer doubles its storage first, so the
    /// cost is amortized O(1) across a push sequence. No element is ever
    /// dropped or reordered.
    ///
    /// # Panics
    ///
    /// Panics if growth would exceed [`MAX_RING_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(4);
    /// ring.push(7u8);
    /// assert_eq!(ring.len(), 1);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.storage.len() {
            self.grow();
        }
        self.storage[self.tail] = value;
        self.tail = self.wrap_next(self.tail);
        self.len += 1;
    }

    /// Dequeues the oldest element, or `None` if the buffer is empty.
    ///
    /// Empty-pop is an expected, frequent condition in event-driven code,
    /// not an error; polling an empty ring costs one branch and mutates
    /// nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(4);
    /// assert_eq!(ring.pop(), None::<u8>);
    ///
    /// ring.push(7u8);
    /// assert_eq!(ring.pop(), Some(7));
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.storage[self.head];
        self.head = self.wrap_next(self.head);
        self.len -= 1;
        Some(value)
    }

    /// Doubles the backing storage, copying live elements in logical order
    /// so that `head` lands back on index 0.
    ///
    /// Only called when the buffer is full. The non-wrapping branch is kept
    /// for the general tail-ahead-of-head layout even though a full buffer
    /// always has `tail == head`.
    fn grow(&mut self) {
        let capacity = self.storage.len();
        let new_capacity = capacity * 2;
        assert!(
            new_capacity <= MAX_RING_CAPACITY,
            "Ring capacity {} exceeds maximum {}",
            new_capacity,
            MAX_RING_CAPACITY
        );

        let mut storage = vec![T::default(); new_capacity].into_boxed_slice();
        let n = if self.tail > self.head {
            // Live range is contiguous: head..tail
            storage[..self.len].copy_from_slice(&self.storage[self.head..self.tail]);
            self.len
        } else {
            // Live range wraps: head..capacity, then 0..tail
            let first = capacity - self.head;
            storage[..first].copy_from_slice(&self.storage[self.head..]);
            storage[first..first + self.tail].copy_from_slice(&self.storage[..self.tail]);
            first + self.tail
        };
        debug_assert_eq!(n, self.len);

        self.storage = storage;
        self.head = 0;
        self.tail = n;
        self.is_pow2 = new_capacity.is_power_of_two();
    }
}

impl<T> RingBuffer<T> {
    /// Returns the current allocated slot count.
    ///
    /// Capacity is monotonically non-decreasing; there is no shrink path.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is live.
    ///
    /// "Full" only reflects the current capacity: pushing onto a full
    /// buffer grows it rather than failing.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.storage.len()
    }

    /// Returns a reference to the oldest element without consuming it.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(4);
    /// ring.push(1u32);
    /// ring.push(2);
    /// assert_eq!(ring.peek(), Some(&1));
    /// assert_eq!(ring.len(), 2);
    /// ```
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            Some(&self.storage[self.head])
        }
    }

    /// Empties the buffer without touching the storage.
    ///
    /// Stale element copies remain in the slots; use
    /// [`burn`](Self::burn) if they are sensitive.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Wraps a cursor one step forward around the current capacity.
    ///
    /// Uses fast bitwise AND for power-of-2 capacities, standard modulo
    /// otherwise.
    #[inline(always)]
    fn wrap_next(&self, pos: usize) -> usize {
        let next = pos + 1;
        if self.is_pow2 {
            next & (self.storage.len() - 1)
        } else {
            next % self.storage.len()
        }
    }
}

impl<T: Zeroize> RingBuffer<T> {
    /// Zeroizes every slot (live and stale) and empties the buffer.
    ///
    /// Stale slots keep copies of popped elements, so a plain
    /// [`clear`](Self::clear) is not enough when the records are
    /// sensitive (keys, tokens, peer addresses). Uses compiler-resistant
    /// clearing via the [`zeroize`] crate.
    ///
    /// # Examples
    ///
    /// ```
    /// use evring::RingBuffer;
    ///
    /// let mut ring = RingBuffer::new(4);
    /// ring.push(0xDEAD_BEEFu32);
    /// ring.burn();
    /// assert!(ring.is_empty());
    /// ```
    pub fn burn(&mut self) {
        for slot in self.storage.iter_mut() {
            slot.zeroize();
        }
        self.clear();
    }
}

impl<T: Copy + Default> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_RING_CAPACITY)
    }
}
