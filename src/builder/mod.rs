//! Builders for set construction.
//!
//! Bulk-loading a set usually means choosing a capacity, a batch of keys
//! and (for sparse sets) a block map. The builders collect those choices
//! and validate them in one `build()` call.
//!
//! # Error Handling
//!
//! - **Compile-time**: block size and map strategy are type parameters.
//! - **Runtime**: block sizes that are not a power of two, and dense
//!   capacities too large to allocate, are reported from `build()`.
//!
//! # Builder Comparison
//!
//! | Builder | Produces | Options |
//! |---------|----------|---------|
//! | [`DenseSetBuilder`] | `DenseSet`, `ParDenseSet` | max_value, keys, sorted_keys, shrink_to_fit |
//! | [`SparseSetBuilder`] | `SparseSet<N, M>` | keys, sorted_keys, dense, hashed/ordered |

#![allow(clippy::module_name_repetitions)]

pub mod dense;
pub mod sparse;

pub use dense::DenseSetBuilder;
pub use sparse::SparseSetBuilder;

/// Largest key a builder accepts for a dense set: `2^40 - 1`, i.e. a
/// 128 GiB word array.
pub const MAX_DENSE_VALUE: u64 = (1 << 40) - 1;

/// Common validation functions for all builders.
pub(crate) mod validation {
    use super::MAX_DENSE_VALUE;
    use crate::error::{NbitError, Result};
    use crate::util::bitops::GROUP_SHIFT;

    /// Validate the largest key a dense set must address.
    ///
    /// # Errors
    ///
    /// Returns error if `max_value` exceeds [`MAX_DENSE_VALUE`] or the word
    /// array would not fit in the address space.
    #[inline]
    pub fn validate_max_value(max_value: u64) -> Result<()> {
        let words = (max_value >> GROUP_SHIFT) + 1;
        let addressable = isize::MAX as u64 / std::mem::size_of::<u64>() as u64;
        if max_value > MAX_DENSE_VALUE || words > addressable {
            return Err(NbitError::invalid_parameters(format!(
                "max value {} exceeds the dense limit of {}",
                max_value, MAX_DENSE_VALUE
            )));
        }
        Ok(())
    }
}
