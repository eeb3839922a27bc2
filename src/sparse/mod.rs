//! Block-sparse bitmap.
//!
//! A [`SparseSet`] splits the key space into blocks of `N` keys and keeps a
//! [`FixedBlock<N>`] only for blocks that have been written to. Key `k` lives
//! in block `k >> log2(N)` at offset `k & (N - 1)`. Memory scales with the
//! number of occupied blocks, not with the largest key.
//!
//! The block map is pluggable through [`BlockMap`]:
//!
//! - [`OrderedSparseSet`] uses a `BTreeMap`: ordered scans for free.
//! - [`HashedSparseSet`] uses an `FxHashMap`: constant-time block lookup.
//!
//! Both produce identical results for every operation.
//!
//! # Block Lifetime
//!
//! Blocks are created by insert and union. Erase and clear never remove a
//! block, so `max_size()` (`N` times the number of blocks) stays put until
//! [`shrink_to_fit`](SparseSet::shrink_to_fit) drops the empty ones.
//! Intersection, symmetric difference and difference prune any block they
//! leave empty. Equality ignores empty blocks.
//!
//! # Examples
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let mut set = OrderedSparseSet::<2048>::new().unwrap();
//! set.insert(1_000_004u64);
//! set.insert(1_000_005u64);
//! set.insert(1_000_006u64);
//! assert_eq!(set.max_size(), 2048);
//!
//! set.insert(13u64);
//! assert_eq!(set.max_size(), 4096);
//! assert_eq!(set.decode(), vec![13, 1_000_004, 1_000_005, 1_000_006]);
//!
//! set.erase(13u64);
//! assert_eq!(set.max_size(), 4096);
//! set.shrink_to_fit();
//! assert_eq!(set.max_size(), 2048);
//! ```

pub mod map;

pub use map::{BlockMap, HashedBlocks, OrderedBlocks};

use crate::builder::validation::validate_max_value;
use crate::core::dense::DenseSet;
use crate::core::fixed::{validate_block_size, FixedBlock};
use crate::core::key::Key;
use crate::core::set::{impl_set_operators, BitSet, MergeableBitSet};
use crate::core::DEFAULT_BLOCK_SIZE;
use crate::error::Result;
use crate::util::bitops::{log2_of_power_of_two, GROUP_SIZE};

/// Bitmap made of `N`-key blocks, allocated on demand.
#[derive(Debug, Clone)]
pub struct SparseSet<const N: usize = DEFAULT_BLOCK_SIZE, M = OrderedBlocks<N>>
where
    M: BlockMap<N>,
{
    blocks: M,
}

/// Sparse set over a `BTreeMap` of blocks.
pub type OrderedSparseSet<const N: usize> = SparseSet<N, OrderedBlocks<N>>;

/// Sparse set over an `FxHashMap` of blocks.
pub type HashedSparseSet<const N: usize> = SparseSet<N, HashedBlocks<N>>;

impl<const N: usize, M: BlockMap<N>> SparseSet<N, M> {
    /// Number of keys per block.
    pub const BLOCK_SIZE: u64 = N as u64;

    const SHIFT: u32 = log2_of_power_of_two(N);
    const MASK: u64 = (N as u64).wrapping_sub(1);

    /// Create an empty set.
    ///
    /// This is the only way to get an empty set; there is no `Default`, so
    /// every set has had its block size checked.
    ///
    /// # Errors
    ///
    /// [`NbitError::InvalidConfiguration`](crate::NbitError::InvalidConfiguration)
    /// if `N` is not a power of two.
    ///
    /// ```compile_fail
    /// use nbitset::OrderedSparseSet;
    ///
    /// let set = OrderedSparseSet::<1000>::default();
    /// ```
    pub fn new() -> Result<Self> {
        validate_block_size(N)?;
        Ok(Self {
            blocks: M::default(),
        })
    }

    /// Create a set holding every key of `keys`.
    ///
    /// # Errors
    ///
    /// Fails only on an invalid `N`.
    pub fn from_keys<K, I>(keys: I) -> Result<Self>
    where
        K: Key,
        I: IntoIterator<Item = K>,
    {
        let mut set = Self::new()?;
        set.extend(keys);
        Ok(set)
    }

    /// Copy a dense set into blocks of `N` keys.
    ///
    /// Blocks are only created for words holding at least one key.
    ///
    /// # Errors
    ///
    /// Fails only on an invalid `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbitset::prelude::*;
    ///
    /// let dense: DenseSet = [3u64, 70_000, 70_001].into_iter().collect();
    /// let sparse = OrderedSparseSet::<1024>::from_dense(&dense).unwrap();
    /// assert_eq!(sparse.block_count(), 2);
    /// assert_eq!(sparse.to_dense().unwrap(), dense);
    /// ```
    pub fn from_dense(dense: &DenseSet) -> Result<Self> {
        let mut set = Self::new()?;
        let per_block = Self::words_per_block();
        if per_block == 0 {
            set.extend(dense.iter());
            return Ok(set);
        }

        for (group, &word) in dense.words().iter().enumerate() {
            if word == 0 {
                continue;
            }
            let index = (group / per_block) as u64;
            set.block_for(index).words_mut()[group % per_block] = word;
        }
        Ok(set)
    }

    /// Flatten into a dense set sized to the largest key.
    ///
    /// # Errors
    ///
    /// [`NbitError::InvalidParameters`](crate::NbitError::InvalidParameters)
    /// if the largest key is past
    /// [`MAX_DENSE_VALUE`](crate::builder::MAX_DENSE_VALUE).
    pub fn to_dense(&self) -> Result<DenseSet> {
        let Some(max) = self.maximum() else {
            return Ok(DenseSet::new());
        };
        validate_max_value(max)?;

        let mut dense = DenseSet::with_max_value(max);
        let per_block = Self::words_per_block();
        for (index, block) in self.blocks.sorted() {
            if block.is_empty() {
                continue;
            }
            if per_block == 0 {
                let base = index * Self::BLOCK_SIZE;
                for offset in block.iter() {
                    dense.insert(base + offset);
                }
                continue;
            }
            let first = index as usize * per_block;
            let words = dense.word_array_mut().as_mut_slice();
            for (i, &word) in block.words().iter().enumerate() {
                if word != 0 {
                    words[first + i] = word;
                }
            }
        }
        Ok(dense)
    }

    /// Insert a key, creating its block if needed.
    ///
    /// Returns `true` if the key was not already present.
    #[inline]
    pub fn insert<K: Key>(&mut self, key: K) -> bool {
        let (index, offset) = Self::split(key.to_u64());
        self.block_for(index).insert_offset(offset)
    }

    /// Insert `f(key)` instead of `key`.
    pub fn insert_mapped<K, F>(&mut self, key: K, f: F) -> bool
    where
        K: Key,
        F: FnOnce(u64) -> u64,
    {
        self.insert(f(key.to_u64()))
    }

    /// Insert a slice of keys, one block lookup per run of keys sharing a block.
    ///
    /// Each run is handed to the block's batched insert. Unsorted input is
    /// still correct; it just produces shorter runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbitset::prelude::*;
    ///
    /// let mut set = HashedSparseSet::<64>::new().unwrap();
    /// set.insert_sorted(&[1u32, 2, 63, 64, 1000, 1001]);
    /// assert_eq!(set.block_count(), 3);
    /// assert_eq!(set.decode(), vec![1, 2, 63, 64, 1000, 1001]);
    /// ```
    pub fn insert_sorted<K: Key>(&mut self, keys: &[K]) {
        let mut rest = keys;
        while let Some(first) = rest.first() {
            let index = first.to_u64() >> Self::SHIFT;
            let end = rest
                .iter()
                .position(|k| k.to_u64() >> Self::SHIFT != index)
                .unwrap_or(rest.len());
            let (run, tail) = rest.split_at(end);
            self.block_for(index)
                .insert_offsets(run.iter().map(|k| k.to_u64() & Self::MASK));
            rest = tail;
        }
    }

    /// Drop every block that holds no keys.
    pub fn shrink_to_fit(&mut self) {
        #[cfg(feature = "trace")]
        let before = self.blocks.len();
        self.blocks.retain(|_, block| !block.is_empty());
        #[cfg(feature = "trace")]
        tracing::debug!(
            removed = before - self.blocks.len(),
            blocks = self.blocks.len(),
            "SparseSet shrunk"
        );
    }

    /// Number of block entries, including empty blocks not yet shrunk away.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Block at `index`, if present.
    #[must_use]
    pub fn block(&self, index: u64) -> Option<&FixedBlock<N>> {
        self.blocks.get(index)
    }

    /// The underlying block map.
    #[must_use]
    pub fn blocks(&self) -> &M {
        &self.blocks
    }

    /// Ascending iterator over the keys.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.blocks
            .sorted()
            .into_iter()
            .flat_map(|(index, block)| {
                let base = index * Self::BLOCK_SIZE;
                block.iter().map(move |offset| base + offset)
            })
    }

    #[inline]
    fn split(key: u64) -> (u64, u64) {
        (key >> Self::SHIFT, key & Self::MASK)
    }

    const fn words_per_block() -> usize {
        N / GROUP_SIZE as usize
    }

    fn block_for(&mut self, index: u64) -> &mut FixedBlock<N> {
        #[cfg(feature = "trace")]
        if self.blocks.get(index).is_none() {
            tracing::trace!(block = index, block_size = N, "SparseSet block created");
        }
        self.blocks.get_or_create(index)
    }

    /// Remove the listed blocks if they ended up empty.
    fn prune(&mut self, touched: &[u64]) {
        for &index in touched {
            if self.blocks.get(index).is_some_and(BitSet::is_empty) {
                self.blocks.remove(index);
            }
        }
    }
}

impl<const N: usize, M: BlockMap<N>> BitSet for SparseSet<N, M> {
    fn try_insert<K: Key>(&mut self, key: K) -> Result<bool> {
        Ok(self.insert(key))
    }

    fn erase<K: Key>(&mut self, key: K) -> bool {
        let (index, offset) = Self::split(key.to_u64());
        self.blocks
            .get_mut(index)
            .is_some_and(|block| block.erase(offset))
    }

    fn contains<K: Key>(&self, key: K) -> bool {
        let (index, offset) = Self::split(key.to_u64());
        self.blocks
            .get(index)
            .is_some_and(|block| block.contains(offset))
    }

    fn count(&self) -> usize {
        self.blocks.iter().map(|(_, block)| block.count()).sum()
    }

    fn is_empty(&self) -> bool {
        self.blocks.iter().all(|(_, block)| block.is_empty())
    }

    fn max_size(&self) -> u64 {
        Self::BLOCK_SIZE * self.blocks.len() as u64
    }

    fn minimum(&self) -> Option<u64> {
        let (index, block) = self.blocks.first_nonempty()?;
        Some(index * Self::BLOCK_SIZE + block.minimum()?)
    }

    fn maximum(&self) -> Option<u64> {
        let (index, block) = self.blocks.last_nonempty()?;
        Some(index * Self::BLOCK_SIZE + block.maximum()?)
    }

    /// Empties every block but keeps the entries, so `max_size()` is unchanged.
    fn clear(&mut self) {
        self.blocks.for_each_mut(|_, block| block.clear());
    }

    fn decode_with<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(u64) -> T,
    {
        let mut out = Vec::with_capacity(self.count());
        for (index, block) in self.blocks.sorted() {
            let base = index * Self::BLOCK_SIZE;
            out.extend(block.iter().map(|offset| f(base + offset)));
        }
        out
    }
}

impl<const N: usize, M: BlockMap<N>> MergeableBitSet for SparseSet<N, M> {
    fn intersect_with(&mut self, other: &Self) {
        self.blocks.retain(|index, block| match other.blocks.get(*index) {
            Some(theirs) => {
                block.intersect_with(theirs);
                !block.is_empty()
            }
            None => false,
        });
    }

    fn union_with(&mut self, other: &Self) {
        for (&index, theirs) in other.blocks.iter() {
            if !theirs.is_empty() {
                self.block_for(index).union_with(theirs);
            }
        }
    }

    fn symmetric_difference_with(&mut self, other: &Self) {
        let mut touched = Vec::new();
        for (&index, theirs) in other.blocks.iter() {
            if !theirs.is_empty() {
                self.block_for(index).symmetric_difference_with(theirs);
                touched.push(index);
            }
        }
        self.prune(&touched);
    }
}

impl_set_operators!([const N: usize, M] SparseSet<N, M> where M: BlockMap<N>);

/// Sets are equal when they hold the same keys; empty blocks are ignored,
/// as is the choice of block map.
impl<const N: usize, A, B> PartialEq<SparseSet<N, B>> for SparseSet<N, A>
where
    A: BlockMap<N>,
    B: BlockMap<N>,
{
    fn eq(&self, other: &SparseSet<N, B>) -> bool {
        fn occupied<const S: usize, T: BlockMap<S>>(blocks: &T) -> usize {
            blocks.iter().filter(|(_, block)| !block.is_empty()).count()
        }

        occupied(&self.blocks) == occupied(&other.blocks)
            && self
                .blocks
                .iter()
                .filter(|(_, block)| !block.is_empty())
                .all(|(&index, block)| other.blocks.get(index) == Some(block))
    }
}

impl<const N: usize, M: BlockMap<N>> Eq for SparseSet<N, M> {}

impl<K: Key, const N: usize, M: BlockMap<N>> Extend<K> for SparseSet<N, M> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
