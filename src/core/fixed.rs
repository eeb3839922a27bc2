//! Fixed-capacity bitmap block.
//!
//! `FixedBlock<N>` is the dense word layout frozen at exactly `ceil(N / 64)`
//! words, covering the key range `[0, N)`. It is the building block of
//! [`SparseSet`](crate::SparseSet) and is also usable on its own wherever a
//! hard upper bound on keys is known up front.
//!
//! Unlike [`DenseSet`](crate::DenseSet) it never grows: inserting a key at or
//! past `N` fails with [`NbitError::CapacityViolation`] and leaves the block
//! untouched. It does not implement [`ResizableBitSet`](crate::ResizableBitSet).
//!
//! # Examples
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let mut block = FixedBlock::<1024>::new().unwrap();
//! for key in [1u64, 4, 2, 15, 25, 20, 1, 64] {
//!     block.insert(key).unwrap();
//! }
//! block.erase(15u64);
//!
//! assert_eq!(block.count(), 6);
//! assert_eq!(block.max_size(), 1024);
//! assert_eq!(block.decode(), vec![1, 2, 4, 20, 25, 64]);
//!
//! assert!(block.insert(1024u64).unwrap_err().is_capacity_violation());
//! ```

use crate::core::key::Key;
use crate::core::set::{impl_set_operators, BitSet, MergeableBitSet};
use crate::core::words::{Iter, WordArray};
use crate::core::DEFAULT_BLOCK_SIZE;
use crate::error::{NbitError, Result};
use crate::util::bitops::{is_power_of_two, GROUP_SIZE};

/// Reject block sizes that are not a power of two.
pub(crate) fn validate_block_size(block_size: usize) -> Result<()> {
    if is_power_of_two(block_size) {
        Ok(())
    } else {
        Err(NbitError::invalid_configuration(
            block_size,
            "block size must be a power of two",
        ))
    }
}

/// Bitmap over the key range `[0, N)`; `N` must be a power of two.
#[derive(Debug, Clone)]
pub struct FixedBlock<const N: usize = DEFAULT_BLOCK_SIZE> {
    words: WordArray,
}

impl<const N: usize> FixedBlock<N> {
    /// Number of keys the block addresses.
    pub const CAPACITY: u64 = N as u64;

    /// Create an empty block.
    ///
    /// # Errors
    ///
    /// [`NbitError::InvalidConfiguration`] if `N` is not a power of two.
    ///
    /// ```
    /// use nbitset::FixedBlock;
    ///
    /// assert!(FixedBlock::<2048>::new().is_ok());
    /// assert!(FixedBlock::<1000>::new().is_err());
    /// ```
    pub fn new() -> Result<Self> {
        validate_block_size(N)?;
        Ok(Self::empty())
    }

    /// Empty block; `N` has already been validated by the caller.
    pub(crate) fn empty() -> Self {
        Self {
            words: WordArray::with_words(N.div_ceil(GROUP_SIZE as usize)),
        }
    }

    /// Create a block holding every key of `keys`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid `N` or on the first key at or past `N`.
    pub fn from_keys<K, I>(keys: I) -> Result<Self>
    where
        K: Key,
        I: IntoIterator<Item = K>,
    {
        let mut block = Self::new()?;
        block.try_extend(keys)?;
        Ok(block)
    }

    /// Insert a key in `[0, N)`.
    ///
    /// Returns `Ok(true)` if the key was not already present.
    ///
    /// # Errors
    ///
    /// [`NbitError::CapacityViolation`] if `key >= N`; the block is unchanged.
    #[inline]
    pub fn insert<K: Key>(&mut self, key: K) -> Result<bool> {
        let key = Self::check(key.to_u64())?;
        Ok(self.words.set(key))
    }

    /// Batched insert of a slice of keys, one word write per run.
    ///
    /// Every key is bound-checked before anything is written, so a failing
    /// call leaves the block unchanged.
    ///
    /// # Errors
    ///
    /// [`NbitError::CapacityViolation`] for the first key at or past `N`.
    pub fn insert_sorted<K: Key>(&mut self, keys: &[K]) -> Result<()> {
        if let Some(max) = keys.iter().map(|k| k.to_u64()).max() {
            Self::check(max)?;
        }
        self.words.set_runs(keys.iter().map(|k| k.to_u64()));
        Ok(())
    }

    /// Insert an offset already known to lie in `[0, N)`.
    #[inline]
    pub(crate) fn insert_offset(&mut self, offset: u64) -> bool {
        self.words.set(offset)
    }

    /// Batched insert of offsets already known to lie in `[0, N)`.
    pub(crate) fn insert_offsets<I>(&mut self, offsets: I)
    where
        I: IntoIterator<Item = u64>,
    {
        self.words.set_runs(offsets);
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        self.words.as_mut_slice()
    }

    /// Ascending iterator over the keys.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        self.words.iter()
    }

    /// Raw words; bit `i` of word `g` is key `g * 64 + i`.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        self.words.as_slice()
    }

    #[inline]
    fn check(key: u64) -> Result<u64> {
        if key < Self::CAPACITY {
            Ok(key)
        } else {
            Err(NbitError::capacity_violation(key, Self::CAPACITY))
        }
    }
}

impl<const N: usize> BitSet for FixedBlock<N> {
    fn try_insert<K: Key>(&mut self, key: K) -> Result<bool> {
        self.insert(key)
    }

    fn erase<K: Key>(&mut self, key: K) -> bool {
        self.words.unset(key.to_u64())
    }

    fn contains<K: Key>(&self, key: K) -> bool {
        self.words.get(key.to_u64())
    }

    fn count(&self) -> usize {
        self.words.count()
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn max_size(&self) -> u64 {
        Self::CAPACITY
    }

    fn minimum(&self) -> Option<u64> {
        self.words.minimum()
    }

    fn maximum(&self) -> Option<u64> {
        self.words.maximum()
    }

    fn clear(&mut self) {
        self.words.clear();
    }

    fn decode_with<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(u64) -> T,
    {
        self.words.decode_with(f)
    }
}

impl<const N: usize> MergeableBitSet for FixedBlock<N> {
    fn intersect_with(&mut self, other: &Self) {
        self.words.and_assign(other.words.as_slice());
    }

    fn union_with(&mut self, other: &Self) {
        self.words.or_assign(other.words.as_slice());
    }

    fn symmetric_difference_with(&mut self, other: &Self) {
        self.words.xor_assign(other.words.as_slice());
    }
}

impl_set_operators!([const N: usize] FixedBlock<N>);

impl<const N: usize> PartialEq for FixedBlock<N> {
    fn eq(&self, other: &Self) -> bool {
        self.words.same_members(&other.words)
    }
}

impl<const N: usize> Eq for FixedBlock<N> {}

impl<'a, const N: usize> IntoIterator for &'a FixedBlock<N> {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_size_block() {
        let mut block = FixedBlock::<1024>::from_keys([1u64, 4, 2, 15, 25, 20, 1, 64]).unwrap();
        assert!(!block.is_empty());
        block.erase(15u64);
        assert_eq!(block.count(), 6);
        assert_eq!(block.max_size(), 1024);
        assert_eq!(block.words().len(), 16);
        assert_eq!(block.decode(), vec![1, 2, 4, 20, 25, 64]);
    }

    #[test]
    fn test_invalid_block_size() {
        let err = FixedBlock::<1000>::new().unwrap_err();
        assert!(matches!(
            err,
            NbitError::InvalidConfiguration {
                block_size: 1000,
                ..
            }
        ));
        assert!(FixedBlock::<0>::new().is_err());
    }

    #[test]
    fn test_small_block_uses_one_word() {
        let mut block = FixedBlock::<16>::new().unwrap();
        assert_eq!(block.words().len(), 1);
        block.insert(15u64).unwrap();
        assert!(block.insert(16u64).is_err());
        assert_eq!(block.decode(), vec![15]);
    }

    #[test]
    fn test_capacity_violation_leaves_block_unchanged() {
        let mut block = FixedBlock::<128>::new().unwrap();
        block.insert(5u64).unwrap();
        let err = block.insert(128u64).unwrap_err();
        assert_eq!(err, NbitError::capacity_violation(128, 128));
        assert_eq!(block.decode(), vec![5]);

        let err = block.insert_sorted(&[1u64, 2, 300]).unwrap_err();
        assert!(err.is_capacity_violation());
        assert_eq!(block.decode(), vec![5]);
    }

    #[test]
    fn test_insert_sorted() {
        let mut block = FixedBlock::<256>::new().unwrap();
        block.insert_sorted(&[0u8, 1, 2, 70, 71, 255]).unwrap();
        assert_eq!(block.decode(), vec![0, 1, 2, 70, 71, 255]);
        assert_eq!(block.minimum(), Some(0));
        assert_eq!(block.maximum(), Some(255));
    }

    #[test]
    fn test_erase_out_of_range_is_noop() {
        let mut block = FixedBlock::<64>::from_keys([3u64]).unwrap();
        assert!(!block.erase(4096u64));
        assert_eq!(block.count(), 1);
    }

    #[test]
    fn test_algebra() {
        let a = FixedBlock::<512>::from_keys([1u64, 5, 7, 42, 300]).unwrap();
        let b = FixedBlock::<512>::from_keys([1u64, 5, 188]).unwrap();

        assert_eq!((&a & &b).decode(), vec![1, 5]);
        assert_eq!((&a | &b).decode(), vec![1, 5, 7, 42, 188, 300]);
        assert_eq!((&a ^ &b).decode(), vec![7, 42, 188, 300]);
        assert_eq!((&a - &b).decode(), vec![7, 42, 300]);

        let mut c = a.clone();
        c &= &a;
        assert_eq!(c, a);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut block = FixedBlock::<4096>::from_keys([4000u64]).unwrap();
        block.clear();
        assert!(block.is_empty());
        assert_eq!(block.max_size(), 4096);
        assert_eq!(block.minimum(), None);
    }
}
