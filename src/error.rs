//! Error types for the framesim library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when simulation configuration parameters are
//!   invalid (e.g. zero frame capacity).
//!
//! A zero-length trace is deliberately *not* an error: the driver reports it
//! through a NaN hit-rate (see [`crate::sim::RunReport::hit_rate`]) instead of
//! failing, so callers comparing many traces don't have to special-case it.
//!
//! ## Example Usage
//!
//! ```
//! use framesim::error::ConfigError;
//! use framesim::policy::fifo::FifoPolicy;
//!
//! // Fallible constructor for user-configurable parameters
//! let ok: Result<FifoPolicy<u64>, ConfigError> = FifoPolicy::new(4);
//! assert!(ok.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = FifoPolicy::<u64>::new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

/// Error returned when simulation configuration parameters are invalid.
///
/// Produced by policy constructors such as
/// [`FifoPolicy::new`](crate::policy::fifo::FifoPolicy::new) when
/// `capacity < 1`. Carries a human-readable description of which parameter
/// failed validation.
///
/// # Example
///
/// ```
/// use framesim::policy::lru::LruPolicy;
///
/// let err = LruPolicy::<u64>::new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Error for a frame capacity below the minimum of 1.
    #[inline]
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self(format!("frame capacity must be at least 1, got {capacity}"))
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Validates a frame capacity, shared by every policy constructor.
#[inline]
pub(crate) fn check_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity < 1 {
        Err(ConfigError::invalid_capacity(capacity))
    } else {
        Ok(capacity)
    }
}
