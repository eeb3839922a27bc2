//! Builder for dense sets.
//!
//! # Examples
//!
//! ## Pre-sized with Keys
//!
//! ```
//! use nbitset::builder::DenseSetBuilder;
//! use nbitset::prelude::*;
//!
//! let set = DenseSetBuilder::new()
//!     .max_value(4095)
//!     .keys([1u64, 2, 3])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(set.max_size(), 4096);
//! assert_eq!(set.decode(), vec![1, 2, 3]);
//! ```
//!
//! ## Sorted Bulk Load, Shrunk Afterwards
//!
//! ```
//! use nbitset::builder::DenseSetBuilder;
//! use nbitset::prelude::*;
//!
//! let set = DenseSetBuilder::new()
//!     .max_value(1 << 20)
//!     .sorted_keys(&[10u32, 11, 12])
//!     .shrink_to_fit(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(set.max_size(), 64);
//! ```

use super::validation;
use crate::core::dense::DenseSet;
use crate::core::key::Key;
use crate::core::set::ResizableBitSet;
use crate::error::Result;

/// Builder for [`DenseSet`] (and [`ParDenseSet`](crate::ParDenseSet) with
/// the `rayon` feature).
///
/// Every parameter is optional; `DenseSetBuilder::new().build()` gives an
/// empty set with no words allocated.
#[derive(Debug, Clone, Default)]
pub struct DenseSetBuilder {
    max_value: Option<u64>,
    keys: Vec<u64>,
    sorted_keys: Vec<u64>,
    shrink: bool,
}

impl DenseSetBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the set so keys `0..=max_value` fit without growing.
    #[must_use]
    pub fn max_value(mut self, max_value: u64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Keys inserted one at a time.
    #[must_use]
    pub fn keys<K, I>(mut self, keys: I) -> Self
    where
        K: Key,
        I: IntoIterator<Item = K>,
    {
        self.keys.extend(keys.into_iter().map(Key::to_u64));
        self
    }

    /// Keys inserted through the batched path. Need not be sorted, but
    /// sorted input is fastest.
    #[must_use]
    pub fn sorted_keys<K: Key>(mut self, keys: &[K]) -> Self {
        self.sorted_keys.extend(keys.iter().map(|k| k.to_u64()));
        self
    }

    /// Release unused trailing words once all keys are in.
    #[must_use]
    pub fn shrink_to_fit(mut self, shrink: bool) -> Self {
        self.shrink = shrink;
        self
    }

    /// Build the set.
    ///
    /// # Errors
    ///
    /// [`NbitError::InvalidParameters`](crate::NbitError::InvalidParameters)
    /// if `max_value` or any key needs more words than can be allocated.
    ///
    /// ```
    /// use nbitset::builder::DenseSetBuilder;
    ///
    /// assert!(DenseSetBuilder::new().max_value(u64::MAX).build().is_err());
    /// ```
    pub fn build(self) -> Result<DenseSet> {
        let largest = self.keys.iter().chain(&self.sorted_keys).copied().max();
        for max in self.max_value.into_iter().chain(largest) {
            validation::validate_max_value(max)?;
        }

        let mut set = match self.max_value {
            Some(max) => DenseSet::with_max_value(max),
            None => DenseSet::new(),
        };
        set.insert_sorted(&self.sorted_keys);
        set.extend(self.keys);
        if self.shrink {
            set.shrink_to_fit();
        }
        Ok(set)
    }

    /// Build a [`ParDenseSet`](crate::ParDenseSet); the sorted keys go
    /// through the parallel batched insert.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    #[cfg(feature = "rayon")]
    pub fn build_parallel(mut self) -> Result<crate::parallel::ParDenseSet> {
        let sorted_keys = std::mem::take(&mut self.sorted_keys);
        if let Some(&max) = sorted_keys.iter().max() {
            validation::validate_max_value(max)?;
        }
        let shrink = std::mem::replace(&mut self.shrink, false);

        let mut set = crate::parallel::ParDenseSet::from(self.build()?);
        set.insert_sorted(&sorted_keys);
        if shrink {
            set.shrink_to_fit();
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::set::BitSet;
    use crate::error::NbitError;

    #[test]
    fn test_builder_empty() {
        let set = DenseSetBuilder::new().build().unwrap();
        assert!(set.is_empty());
        assert_eq!(set.max_size(), 0);
    }

    #[test]
    fn test_builder_mixed_keys() {
        let set = DenseSetBuilder::new()
            .keys([900u16, 4])
            .sorted_keys(&[1u64, 2, 64])
            .build()
            .unwrap();
        assert_eq!(set.decode(), vec![1, 2, 4, 64, 900]);
        assert_eq!(set.max_size(), 960);
    }

    #[test]
    fn test_builder_max_value() {
        let set = DenseSetBuilder::new().max_value(2047).build().unwrap();
        assert_eq!(set.max_size(), 2048);
        assert!(set.is_empty());
    }

    #[test]
    fn test_builder_rejects_huge_values() {
        let err = DenseSetBuilder::new().max_value(u64::MAX).build().unwrap_err();
        assert!(matches!(err, NbitError::InvalidParameters { .. }));

        let err = DenseSetBuilder::new().keys([u64::MAX]).build().unwrap_err();
        assert!(matches!(err, NbitError::InvalidParameters { .. }));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_build_parallel() {
        let keys: Vec<u64> = (0..5_000).map(|i| i * 11).collect();
        let par = DenseSetBuilder::new()
            .max_value(1 << 20)
            .sorted_keys(&keys)
            .keys([3u64])
            .shrink_to_fit(true)
            .build_parallel()
            .unwrap();
        assert_eq!(par.count(), 5_001);
        assert_eq!(par.maximum(), Some(4_999 * 11));
        assert_eq!(par.max_size(), 55_040);
    }
}
