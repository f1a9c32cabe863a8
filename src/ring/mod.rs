// src/ring/mod.rs
//! Growable ring (circular) buffer for tiny value types

pub mod buffer;

pub use buffer::RingBuffer;
pub use buffer::{DEFAULT_RING_CAPACITY, MAX_RING_CAPACITY, MIN_RING_CAPACITY};
