//! Builder for block-sparse sets.
//!
//! # Type-State Map Selection
//!
//! The block map is part of the builder's type. The builder starts on the
//! ordered map and switches with [`hashed`](SparseSetBuilder::hashed) or
//! back with [`ordered`](SparseSetBuilder::ordered):
//!
//! ```text
//! SparseSetBuilder<N, OrderedBlocks<N>> ──.hashed()──→ SparseSetBuilder<N, HashedBlocks<N>>
//!                                      ←─.ordered()──
//! ```
//!
//! # Examples
//!
//! ```
//! use nbitset::builder::SparseSetBuilder;
//! use nbitset::prelude::*;
//!
//! let set: HashedSparseSet<4096> = SparseSetBuilder::<4096>::new()
//!     .hashed()
//!     .sorted_keys(&[1u64, 2, 3, 1_000_000])
//!     .keys([42u32])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(set.block_count(), 2);
//! assert_eq!(set.decode(), vec![1, 2, 3, 42, 1_000_000]);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use nbitset::builder::SparseSetBuilder;
//!
//! assert!(SparseSetBuilder::<1000>::new().build().is_err());
//! ```

use crate::core::dense::DenseSet;
use crate::core::key::Key;
use crate::core::DEFAULT_BLOCK_SIZE;
use crate::error::Result;
use crate::sparse::{BlockMap, HashedBlocks, OrderedBlocks, SparseSet};
use std::marker::PhantomData;

/// Builder for [`SparseSet`] with block size `N` and block map `M`.
#[derive(Debug, Clone)]
pub struct SparseSetBuilder<const N: usize = DEFAULT_BLOCK_SIZE, M = OrderedBlocks<N>> {
    keys: Vec<u64>,
    sorted_keys: Vec<u64>,
    dense: Option<DenseSet>,
    _map: PhantomData<M>,
}

impl<const N: usize> SparseSetBuilder<N, OrderedBlocks<N>> {
    /// Create a builder for an ordered-map sparse set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            sorted_keys: Vec::new(),
            dense: None,
            _map: PhantomData,
        }
    }
}

impl<const N: usize> Default for SparseSetBuilder<N, OrderedBlocks<N>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, M> SparseSetBuilder<N, M> {
    /// Switch to the hashed block map.
    #[must_use]
    pub fn hashed(self) -> SparseSetBuilder<N, HashedBlocks<N>> {
        self.with_map()
    }

    /// Switch to the ordered block map.
    #[must_use]
    pub fn ordered(self) -> SparseSetBuilder<N, OrderedBlocks<N>> {
        self.with_map()
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

    /// Keys inserted through the per-block batched path.
    #[must_use]
    pub fn sorted_keys<K: Key>(mut self, keys: &[K]) -> Self {
        self.sorted_keys.extend(keys.iter().map(|k| k.to_u64()));
        self
    }

    /// Seed the set with the contents of a dense set, copied word by word.
    #[must_use]
    pub fn dense(mut self, dense: &DenseSet) -> Self {
        self.dense = Some(dense.clone());
        self
    }

    fn with_map<T>(self) -> SparseSetBuilder<N, T> {
        SparseSetBuilder {
            keys: self.keys,
            sorted_keys: self.sorted_keys,
            dense: self.dense,
            _map: PhantomData,
        }
    }
}

impl<const N: usize, M: BlockMap<N>> SparseSetBuilder<N, M> {
    /// Build the set.
    ///
    /// # Errors
    ///
    /// [`NbitError::InvalidConfiguration`](crate::NbitError::InvalidConfiguration)
    /// if `N` is not a power of two.
    pub fn build(self) -> Result<SparseSet<N, M>> {
        let mut set = match &self.dense {
            Some(dense) => SparseSet::from_dense(dense)?,
            None => SparseSet::new()?,
        };
        set.insert_sorted(&self.sorted_keys);
        set.extend(self.keys);
        Ok(set)
    }
}
