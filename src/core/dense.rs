//! Dynamically resizable dense bitmap.
//!
//! `DenseSet` keeps one word per 64 consecutive keys from 0 up to its
//! capacity and grows on insert whenever a key lands past the end. Growth
//! never happens on erase, clear or intersection; capacity only goes down
//! through [`ResizableBitSet::shrink_to_fit`].
//!
//! # Examples
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let mut set = DenseSet::new();
//! for key in [1u64, 4, 2, 15, 25, 20, 1, 64] {
//!     set.insert(key);
//! }
//!
//! assert_eq!(set.count(), 7);
//! assert_eq!(set.max_size(), 128);
//! assert_eq!(set.decode(), vec![1, 2, 4, 15, 20, 25, 64]);
//! ```
//!
//! ## Set Algebra
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let a: DenseSet = [1u64, 5, 7, 42, 555, 1700].into_iter().collect();
//! let b: DenseSet = [1u64, 5, 188].into_iter().collect();
//!
//! assert_eq!((&a & &b).decode(), vec![1, 5]);
//! assert_eq!((&a - &b).decode(), vec![7, 42, 555, 1700]);
//! ```

use crate::builder::validation::validate_max_value;
use crate::core::key::Key;
use crate::core::set::{impl_set_operators, BitSet, MergeableBitSet, ResizableBitSet};
use crate::core::words::{Iter, WordArray};
use crate::error::Result;
use crate::util::bitops::words_for_max;

/// Growable bitmap over the key range `[0, max_size())`.
#[derive(Debug, Clone, Default)]
pub struct DenseSet {
    words: WordArray,
}

impl DenseSet {
    /// Create an empty set with no allocated words.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: WordArray::new(),
        }
    }

    /// Create an empty set able to hold keys `0..=max_value` without growing.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbitset::prelude::*;
    ///
    /// let set = DenseSet::with_max_value(1023);
    /// assert_eq!(set.max_size(), 1024);
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn with_max_value(max_value: u64) -> Self {
        Self {
            words: WordArray::with_max(max_value),
        }
    }

    pub(crate) fn word_array_mut(&mut self) -> &mut WordArray {
        &mut self.words
    }

    /// Insert a key, growing the word array if needed.
    ///
    /// Returns `true` if the key was not already present.
    ///
    /// # Panics
    ///
    /// Aborts on allocation failure when the key needs a word array larger
    /// than memory allows. Use [`BitSet::try_insert`] for keys that may lie
    /// past [`MAX_DENSE_VALUE`](crate::builder::MAX_DENSE_VALUE).
    #[inline]
    pub fn insert<K: Key>(&mut self, key: K) -> bool {
        let key = key.to_u64();
        self.grow_to_fit(key);
        self.words.set(key)
    }

    /// Insert `f(key)` instead of `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbitset::prelude::*;
    ///
    /// let mut set = DenseSet::new();
    /// set.insert_mapped(10u32, |k| k * 2);
    /// assert!(set.contains(20u64));
    /// assert!(!set.contains(10u64));
    /// ```
    pub fn insert_mapped<K, F>(&mut self, key: K, f: F) -> bool
    where
        K: Key,
        F: FnOnce(u64) -> u64,
    {
        self.insert(f(key.to_u64()))
    }

    /// Insert a slice of keys, one word write per run of keys sharing a word.
    ///
    /// Sorted input gives one write per touched word. Unsorted input is still
    /// correct and yields exactly the same words as repeated [`insert`](Self::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use nbitset::prelude::*;
    ///
    /// let mut set = DenseSet::new();
    /// set.insert_sorted(&[2u64, 3, 5, 64, 65, 1000]);
    /// assert_eq!(set.decode(), vec![2, 3, 5, 64, 65, 1000]);
    /// ```
    pub fn insert_sorted<K: Key>(&mut self, keys: &[K]) {
        let Some(max) = keys.iter().map(|k| k.to_u64()).max() else {
            return;
        };
        self.grow_to_fit(max);
        self.words.set_runs(keys.iter().map(|k| k.to_u64()));
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

    /// Index of the first word holding a key.
    #[must_use]
    pub fn first_nonzero_group(&self) -> Option<usize> {
        self.words.first_nonzero_group()
    }

    /// Index of the last word holding a key.
    #[must_use]
    pub fn last_nonzero_group(&self) -> Option<usize> {
        self.words.last_nonzero_group()
    }

    /// Bytes used by the word array plus the struct itself.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.words.num_words() * std::mem::size_of::<u64>() + std::mem::size_of::<Self>()
    }

    fn grow_to_fit(&mut self, key: u64) {
        if self.words.grow_to_fit(key) {
            #[cfg(feature = "trace")]
            tracing::trace!(key, max_size = self.words.max_size(), "DenseSet grew");
        }
    }
}

impl BitSet for DenseSet {
    fn try_insert<K: Key>(&mut self, key: K) -> Result<bool> {
        let key = key.to_u64();
        validate_max_value(key)?;
        Ok(self.insert(key))
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
        self.words.max_size()
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

impl ResizableBitSet for DenseSet {
    fn resize(&mut self, new_max: u64) {
        self.words.grow_to_words(words_for_max(new_max));
    }

    fn shrink_to_fit(&mut self) {
        self.words.shrink_to_fit();
        #[cfg(feature = "trace")]
        tracing::debug!(max_size = self.words.max_size(), "DenseSet shrunk");
    }
}

impl MergeableBitSet for DenseSet {
    fn intersect_with(&mut self, other: &Self) {
        self.words.and_assign(other.words.as_slice());
    }

    fn union_with(&mut self, other: &Self) {
        if let Some(max) = other.maximum() {
            self.grow_to_fit(max);
        }
        self.words.or_assign(other.words.as_slice());
    }

    fn symmetric_difference_with(&mut self, other: &Self) {
        if let Some(max) = other.maximum() {
            self.grow_to_fit(max);
        }
        self.words.xor_assign(other.words.as_slice());
    }
}

impl_set_operators!([] DenseSet);

/// Two dense sets are equal when they hold the same keys, whatever their capacity.
impl PartialEq for DenseSet {
    fn eq(&self, other: &Self) -> bool {
        self.words.same_members(&other.words)
    }
}

impl Eq for DenseSet {}

impl<K: Key> FromIterator<K> for DenseSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Key> Extend<K> for DenseSet {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> IntoIterator for &'a DenseSet {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [u64; 8] = [1, 4, 2, 15, 25, 20, 1, 64];

    #[test]
    fn test_insert_dynamic_resizing() {
        let mut set = DenseSet::new();
        assert!(set.is_empty());
        assert_eq!(set.max_size(), 0);

        set.extend(KEYS);
        assert!(!set.is_empty());
        assert_eq!(set.count(), 7);
        assert_eq!(set.max_size(), 128);
        assert_eq!(set.decode(), vec![1, 2, 4, 15, 20, 25, 64]);

        assert!(set.erase(15u64));
        assert_eq!(set.count(), 6);
        assert_eq!(set.decode(), vec![1, 2, 4, 20, 25, 64]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DenseSet::new();
        assert!(set.insert(42u64));
        assert!(!set.insert(42u64));
        assert_eq!(set.count(), 1);
        assert_eq!(set.decode(), vec![42]);
    }

    #[test]
    fn test_erase_out_of_range_is_noop() {
        let mut set: DenseSet = KEYS.into_iter().collect();
        let before = set.count();
        assert!(!set.erase(1_000_000u64));
        assert!(!set.erase(3u64));
        assert_eq!(set.count(), before);
        assert_eq!(set.max_size(), 128);
    }

    #[test]
    fn test_erase_clears_rather_than_toggles() {
        let mut set: DenseSet = KEYS.into_iter().collect();
        set.erase(4u64);
        set.erase(4u64);
        assert!(!set.contains(4u64));
    }

    #[test]
    fn test_clear_resize_shrink() {
        let mut set: DenseSet = KEYS.into_iter().collect();
        set.insert(1023u64);
        assert_eq!(set.count(), 8);
        assert_eq!(set.max_size(), 1024);

        set.clear();
        assert_eq!(set.count(), 0);
        assert_eq!(set.max_size(), 1024);
        assert!(set.is_empty());

        set.resize(2047);
        assert_eq!(set.max_size(), 2048);
        set.resize(10);
        assert_eq!(set.max_size(), 2048);

        set.insert(13u64);
        set.shrink_to_fit();
        assert_eq!(set.max_size(), 64);
        assert_eq!(set.decode(), vec![13]);
    }

    #[test]
    fn test_try_insert_rejects_keys_past_dense_limit() {
        use crate::builder::MAX_DENSE_VALUE;
        use crate::error::NbitError;

        let mut set = DenseSet::new();
        let err = set.try_insert(u64::MAX).unwrap_err();
        assert!(matches!(err, NbitError::InvalidParameters { .. }));
        assert!(set.try_insert(MAX_DENSE_VALUE + 1).is_err());
        assert_eq!(set.max_size(), 0);

        assert_eq!(set.try_insert(70u64), Ok(true));
        assert_eq!(set.try_insert(70u64), Ok(false));
        assert!(set.try_extend([1u64, u64::MAX, 2]).is_err());
        assert_eq!(set.decode(), vec![1, 70]);
    }

    #[test]
    fn test_min_max() {
        let set = DenseSet::with_max_value(4096);
        assert_eq!(set.minimum(), None);
        assert_eq!(set.maximum(), None);

        let set: DenseSet = [700u64, 65, 3000].into_iter().collect();
        assert_eq!(set.minimum(), Some(65));
        assert_eq!(set.maximum(), Some(3000));
    }

    #[test]
    fn test_insert_sorted_matches_insert() {
        let sorted = [0u64, 1, 2, 63, 64, 127, 128, 4095, 4096];
        let mut batched = DenseSet::new();
        batched.insert_sorted(&sorted);
        let single: DenseSet = sorted.into_iter().collect();
        assert_eq!(batched.words(), single.words());

        let unsorted = [900u64, 3, 64, 2, 900, 65];
        let mut batched = DenseSet::new();
        batched.insert_sorted(&unsorted);
        let single: DenseSet = unsorted.into_iter().collect();
        assert_eq!(batched.words(), single.words());
    }

    #[test]
    fn test_insert_sorted_empty_slice() {
        let mut set = DenseSet::new();
        set.insert_sorted::<u64>(&[]);
        assert_eq!(set.max_size(), 0);
    }

    #[test]
    fn test_equality_and_copy() {
        let set1: DenseSet = KEYS.into_iter().collect();
        let mut set2 = set1.clone();
        assert_eq!(set1, set2);

        set2.erase(64u64);
        set2.shrink_to_fit();
        assert_ne!(set1, set2);

        set2.insert(64u64);
        set2.resize(10_000);
        assert_eq!(set1, set2);
    }

    #[test]
    fn test_intersection() {
        let mut a: DenseSet = [1u64, 5, 7, 42, 555, 1700].into_iter().collect();
        let b: DenseSet = [1u64, 5, 188].into_iter().collect();
        a &= &b;
        assert_eq!(a.decode(), vec![1, 5]);
    }

    #[test]
    fn test_intersection_zeroes_words_beyond_other() {
        let mut a: DenseSet = [1u64, 5000].into_iter().collect();
        let b: DenseSet = [1u64].into_iter().collect();
        a.intersect_with(&b);
        assert_eq!(a.decode(), vec![1]);
        assert_eq!(a.maximum(), Some(1));
    }

    #[test]
    fn test_union() {
        let mut a: DenseSet = [1u64].into_iter().collect();
        let mut b: DenseSet = [1u64, 5, 188].into_iter().collect();
        a |= &b;
        assert_eq!(a.decode(), vec![1, 5, 188]);

        b.insert(17u64);
        let c: DenseSet = [800u64].into_iter().collect();
        b |= &c;
        assert_eq!(b.decode(), vec![1, 5, 17, 188, 800]);

        let s1: DenseSet = [2u64, 155].into_iter().collect();
        let s2: DenseSet = [4u64, 16, 25].into_iter().collect();
        assert_eq!((&s1 | &s2).decode(), vec![2, 4, 16, 25, 155]);
    }

    #[test]
    fn test_symmetric_difference() {
        let mut a: DenseSet = [1u64].into_iter().collect();
        let b: DenseSet = [1u64, 2, 10_000].into_iter().collect();
        a ^= &b;
        assert_eq!(a.decode(), vec![2, 10_000]);

        let mut c = &a ^ &b;
        c.insert(5u64);
        assert_eq!(c.decode(), vec![1, 5]);
    }

    #[test]
    fn test_difference() {
        let a: DenseSet = [1u64, 2, 3, 300].into_iter().collect();
        let b: DenseSet = [2u64, 300, 9000].into_iter().collect();
        assert_eq!((&a - &b).decode(), vec![1, 3]);
        assert_eq!((&b - &a).decode(), vec![9000]);
    }

    #[test]
    fn test_iter_and_into_iter() {
        let set: DenseSet = [9u64, 3, 130].into_iter().collect();
        let keys: Vec<u64> = (&set).into_iter().collect();
        assert_eq!(keys, vec![3, 9, 130]);
        assert_eq!(set.first_nonzero_group(), Some(0));
        assert_eq!(set.last_nonzero_group(), Some(2));
    }

    #[test]
    fn test_decode_with_offset() {
        let set: DenseSet = [1u64, 2].into_iter().collect();
        let shifted: Vec<u32> = set.decode_with(|k| (k + 100) as u32);
        assert_eq!(shifted, vec![101, 102]);
    }
}
