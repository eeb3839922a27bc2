//! Error types for nbitset operations.
//!
//! Caller-visible errors are: inserting past the end of a fixed-capacity set,
//! constructing a block-structured set with a block size that is not a power
//! of two, and builder parameters out of range. Querying the minimum or
//! maximum of an empty set is not an error; those queries return `None`.
//!
//! # Error Propagation
//!
//! ```
//! use nbitset::{FixedBlock, Result};
//!
//! fn fill(keys: &[u64]) -> Result<FixedBlock<1024>> {
//!     let mut block = FixedBlock::<1024>::new()?;
//!     for &key in keys {
//!         block.insert(key)?;
//!     }
//!     Ok(block)
//! }
//! # assert!(fill(&[1, 2, 3]).is_ok());
//! # assert!(fill(&[1, 2, 4096]).is_err());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for nbitset operations.
///
/// All fallible operations return [`Result<T>`] where the error type is [`NbitError`].
pub type Result<T> = std::result::Result<T, NbitError>;

/// Errors that can occur during bit set operations.
///
/// `Clone` + `PartialEq` so tests can compare errors directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NbitError {
    /// A key was inserted into a fixed-capacity set beyond its capacity.
    ///
    /// Fixed-capacity sets never grow, so the write is rejected instead of
    /// touching memory outside the word array.
    CapacityViolation {
        /// The rejected key.
        key: u64,
        /// Number of keys the set can address (`[0, capacity)`).
        capacity: u64,
    },

    /// A block size that is not a power of two was requested.
    ///
    /// Block-structured sets split keys with a shift and a mask, which only
    /// works for power-of-two block sizes.
    InvalidConfiguration {
        /// The rejected block size.
        block_size: usize,
        /// Description of the constraint that failed.
        reason: String,
    },

    /// Builder or constructor parameters that cannot describe a valid set.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },
}

impl fmt::Display for NbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityViolation { key, capacity } => {
                write!(
                    f,
                    "Key {} exceeds fixed capacity of {} keys. Fixed-capacity sets do not grow.",
                    key, capacity
                )
            }
            Self::InvalidConfiguration { block_size, reason } => {
                write!(f, "Invalid block size {}: {}.", block_size, reason)
            }
            Self::InvalidParameters { message } => {
                write!(f, "Invalid bit set parameters: {}.", message)
            }
        }
    }
}

impl std::error::Error for NbitError {}

impl NbitError {
    /// Create a `CapacityViolation` error.
    #[must_use]
    pub fn capacity_violation(key: u64, capacity: u64) -> Self {
        Self::CapacityViolation { key, capacity }
    }

    /// Create an `InvalidConfiguration` error.
    ///
    /// # Examples
    /// ```
    /// use nbitset::NbitError;
    ///
    /// let err = NbitError::invalid_configuration(1000, "block size must be a power of two");
    /// assert!(err.to_string().contains("1000"));
    /// ```
    #[must_use]
    pub fn invalid_configuration(block_size: usize, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            block_size,
            reason: reason.into(),
        }
    }

    /// Create an `InvalidParameters` error with a formatted message.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Returns `true` for errors raised by a fixed-capacity bound check.
    #[must_use]
    pub fn is_capacity_violation(&self) -> bool {
        matches!(self, Self::CapacityViolation { .. })
    }
}
