// src/error.rs
//! Error types for ring and staging operations with conversion support.
//!
//! The taxonomy is deliberately small. An empty pop is **not** an error —
//! polling an empty ring is an expected, frequent condition in event-driven
//! code and stays an `Option`. The only failure conditions are an invalid
//! construction parameter and a staging queue at its configured limit.

use std::fmt;

/// Errors that can occur during ring and staging operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// Requested or doubled capacity exceeds the maximum slot count
    CapacityTooLarge,
    /// Staging queue is at its configured element limit
    StageFull,
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityTooLarge => write!(f, "Ring capacity too large"),
            Self::StageFull => write!(f, "Staging queue is full"),
        }
    }
}

impl std::error::Error for RingError {}

/// Convert RingError to std::io::Error
///
/// `StageFull` maps to `WouldBlock` so reactor code can treat a saturated
/// stage exactly like a socket that is not ready.
impl From<RingError> for std::io::Error {
    fn from(err: RingError) -> Self {
        use std::io::ErrorKind;
        match err {
            RingError::StageFull => std::io::Error::new(ErrorKind::WouldBlock, err),
            RingError::CapacityTooLarge => std::io::Error::new(ErrorKind::InvalidInput, err),
        }
    }
}

/// Result type alias for ring operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`evring::Result<T>`) or use the conversion
/// traits below.
pub type Result<T> = std::result::Result<T, RingError>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(anyhow::Error::from)
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

/// Convenience macro for converting ring operations to any Result type.
///
/// Requires an explicit target error type as the second argument so the
/// conversion is unambiguous — error types like `anyhow::Error` have
/// multiple overlapping `From` impls.
///
/// # Example
/// ```ignore
/// use evring::prelude::*;
/// use evring::ring_op;
///
/// fn handler_function() -> anyhow::Result<()> {
///     let mut stage = Stage::new();
///     ring_op!(stage.stage(42u32), anyhow::Error)?;
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ring_op {
    // Two-arg form: explicit target type (use this with anyhow, Box<dyn Error>, etc.)
    ($expr:expr, $target:ty) => {
        $expr.map_err(|e: $crate::RingError| -> $target { e.into() })
    };
    // One-arg form: defaults to std::io::Error (unambiguous, no overlapping impls)
    ($expr:expr) => {
        $expr.map_err(|e: $crate::RingError| -> std::io::Error { e.into() })
    };
}
