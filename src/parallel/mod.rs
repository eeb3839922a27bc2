//! Data-parallel dense bitmap (requires the `rayon` feature).
//!
//! [`ParDenseSet`] has exactly the word layout of [`DenseSet`] and converts
//! to and from it for free. Word-wide operations run on the rayon thread
//! pool:
//!
//! - `count` / `is_empty`: parallel popcount reduce.
//! - `insert_sorted`: runs of keys sharing a word are folded into masks in
//!   parallel, then applied.
//! - `&`, `|`, `^`: index-aligned parallel transforms. Each output word
//!   depends only on the input words at the same index, so workers never
//!   touch each other's words.
//!
//! Single-key operations delegate to the sequential implementation.
//!
//! # Examples
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let keys: Vec<u64> = (0..100_000).map(|i| i * 3).collect();
//!
//! let mut a = ParDenseSet::new();
//! a.insert_sorted(&keys);
//! let b: ParDenseSet = (0..300_000u64).step_by(2).collect();
//!
//! let both = &a & &b;
//! assert_eq!(both.count(), 50_000);
//! assert_eq!(both.minimum(), Some(0));
//! assert_eq!(both.maximum(), Some(299_994));
//! ```

use crate::core::dense::DenseSet;
use crate::core::key::Key;
use crate::core::set::{impl_set_operators, BitSet, MergeableBitSet, ResizableBitSet};
use crate::core::words::Iter;
use crate::error::Result;
use crate::util::bitops::{bit_mask, count_ones, word_index};
use rayon::prelude::*;

/// [`DenseSet`] whose bulk operations run in parallel.
#[derive(Debug, Clone, Default)]
pub struct ParDenseSet {
    inner: DenseSet,
}

impl ParDenseSet {
    /// Create an empty set with no allocated words.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: DenseSet::new(),
        }
    }

    /// Create an empty set able to hold keys `0..=max_value` without growing.
    #[must_use]
    pub fn with_max_value(max_value: u64) -> Self {
        Self {
            inner: DenseSet::with_max_value(max_value),
        }
    }

    /// Borrow the sequential view.
    #[must_use]
    pub fn as_dense(&self) -> &DenseSet {
        &self.inner
    }

    /// Unwrap into the sequential set.
    #[must_use]
    pub fn into_inner(self) -> DenseSet {
        self.inner
    }

    /// Insert a key, growing if needed. Returns `true` if it was absent.
    ///
    /// # Panics
    ///
    /// Aborts on allocation failure for keys far past
    /// [`MAX_DENSE_VALUE`](crate::builder::MAX_DENSE_VALUE); see
    /// [`BitSet::try_insert`].
    #[inline]
    pub fn insert<K: Key>(&mut self, key: K) -> bool {
        self.inner.insert(key)
    }

    /// Insert `f(key)` instead of `key`.
    pub fn insert_mapped<K, F>(&mut self, key: K, f: F) -> bool
    where
        K: Key,
        F: FnOnce(u64) -> u64,
    {
        self.inner.insert_mapped(key, f)
    }

    /// Parallel batched insert.
    ///
    /// The slice is split into runs of keys sharing a word; every run is
    /// folded into one mask in parallel and the masks are OR-ed in once the
    /// parallel step has joined. Sorted input gives one mask per touched
    /// word; unsorted input is still correct.
    pub fn insert_sorted<K: Key + Sync>(&mut self, keys: &[K]) {
        let Some(max) = keys.par_iter().map(|k| k.to_u64()).max() else {
            return;
        };
        trace_region("insert_sorted", keys.len());
        self.inner.resize(max);

        let masks: Vec<(usize, u64)> = keys
            .par_chunk_by(|a, b| word_index(a.to_u64()) == word_index(b.to_u64()))
            .map(|run| {
                let group = word_index(run[0].to_u64());
                let mask = run.iter().fold(0, |mask, k| mask | bit_mask(k.to_u64()));
                (group, mask)
            })
            .collect();

        let words = self.inner.word_array_mut().as_mut_slice();
        for (group, mask) in masks {
            words[group] |= mask;
        }
    }

    /// Ascending iterator over the keys.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        self.inner.iter()
    }

    /// Raw words; bit `i` of word `g` is key `g * 64 + i`.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        self.inner.words()
    }

    fn words_mut(&mut self) -> &mut [u64] {
        self.inner.word_array_mut().as_mut_slice()
    }

    fn grow_for(&mut self, other: &Self) {
        if let Some(max) = other.maximum() {
            self.inner.resize(max);
        }
    }
}

#[inline]
fn trace_region(_op: &'static str, _len: usize) {
    #[cfg(feature = "trace")]
    tracing::trace!(op = _op, len = _len, "ParDenseSet parallel region");
}

impl BitSet for ParDenseSet {
    fn try_insert<K: Key>(&mut self, key: K) -> Result<bool> {
        self.inner.try_insert(key)
    }

    fn erase<K: Key>(&mut self, key: K) -> bool {
        self.inner.erase(key)
    }

    fn contains<K: Key>(&self, key: K) -> bool {
        self.inner.contains(key)
    }

    fn count(&self) -> usize {
        trace_region("count", self.words().len());
        self.words()
            .par_iter()
            .map(|&word| count_ones(word) as usize)
            .sum()
    }

    fn is_empty(&self) -> bool {
        self.words().par_iter().all(|&word| word == 0)
    }

    fn max_size(&self) -> u64 {
        self.inner.max_size()
    }

    fn minimum(&self) -> Option<u64> {
        self.inner.minimum()
    }

    fn maximum(&self) -> Option<u64> {
        self.inner.maximum()
    }

    fn clear(&mut self) {
        self.words_mut().par_iter_mut().for_each(|word| *word = 0);
    }

    fn decode_with<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(u64) -> T,
    {
        self.inner.decode_with(f)
    }
}

impl ResizableBitSet for ParDenseSet {
    fn resize(&mut self, new_max: u64) {
        self.inner.resize(new_max);
    }

    fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit();
    }
}

impl MergeableBitSet for ParDenseSet {
    fn intersect_with(&mut self, other: &Self) {
        trace_region("intersect", self.words().len());
        let words = self.words_mut();
        let overlap = words.len().min(other.words().len());
        let (head, tail) = words.split_at_mut(overlap);
        head.par_iter_mut()
            .zip(other.words().par_iter())
            .for_each(|(mine, &theirs)| *mine &= theirs);
        // Words past `other` must go to zero; only after the join.
        tail.fill(0);
    }

    fn union_with(&mut self, other: &Self) {
        trace_region("union", other.words().len());
        self.grow_for(other);
        self.words_mut()
            .par_iter_mut()
            .zip(other.words().par_iter())
            .for_each(|(mine, &theirs)| *mine |= theirs);
    }

    fn symmetric_difference_with(&mut self, other: &Self) {
        trace_region("symmetric_difference", other.words().len());
        self.grow_for(other);
        self.words_mut()
            .par_iter_mut()
            .zip(other.words().par_iter())
            .for_each(|(mine, &theirs)| *mine ^= theirs);
    }
}

impl_set_operators!([] ParDenseSet);

/// Equal when both hold the same keys, whatever their capacity.
impl PartialEq for ParDenseSet {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.words(), other.words());
        let overlap = a.len().min(b.len());
        let (longer, _) = if a.len() >= b.len() { (a, b) } else { (b, a) };

        a[..overlap]
            .par_iter()
            .zip(b[..overlap].par_iter())
            .all(|(x, y)| x == y)
            && longer[overlap..].par_iter().all(|&word| word == 0)
    }
}

impl Eq for ParDenseSet {}

impl From<DenseSet> for ParDenseSet {
    fn from(inner: DenseSet) -> Self {
        Self { inner }
    }
}

impl From<ParDenseSet> for DenseSet {
    fn from(set: ParDenseSet) -> Self {
        set.inner
    }
}

impl<K: Key> FromIterator<K> for ParDenseSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K: Key> Extend<K> for ParDenseSet {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ParDenseSet {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
