//! Word array shared by the dense representations.
//!
//! `WordArray` holds every piece of single-block logic: bit set/clear, bulk
//! run insertion, population count, first/last nonzero scans, decode and the
//! element-wise set algebra. [`DenseSet`](crate::DenseSet),
//! [`FixedBlock`](crate::FixedBlock) and the parallel variant differ only in
//! how they size the array before calling into it.
//!
//! # Memory Layout
//!
//! ```text
//! Word 0: [key 0][key 1]...[key 63]
//! Word 1: [key 64][key 65]...[key 127]
//! Word g: [key g*64]...[key g*64+63]
//! ```

use crate::util::bitops::{
    bit_mask, clear_lowest_bit, count_ones, count_ones_slice, highest_bit, key_of, lowest_bit,
    word_index, words_for_max, GROUP_SIZE,
};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Default)]
pub(crate) struct WordArray {
    words: Vec<u64>,
}

impl WordArray {
    pub(crate) const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Zero-filled array addressing keys `0..=max_value`.
    pub(crate) fn with_max(max_value: u64) -> Self {
        Self::with_words(words_for_max(max_value))
    }

    pub(crate) fn with_words(num_words: usize) -> Self {
        Self {
            words: vec![0; num_words],
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.words
    }

    #[inline]
    pub(crate) fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Keys addressable without growth: `64 * num_words`.
    #[inline]
    pub(crate) fn max_size(&self) -> u64 {
        self.words.len() as u64 * GROUP_SIZE
    }

    /// Grow so `key` is addressable. Returns `true` if the array grew.
    #[inline]
    pub(crate) fn grow_to_fit(&mut self, key: u64) -> bool {
        if key < self.max_size() {
            return false;
        }
        self.words.resize(words_for_max(key), 0);
        true
    }

    /// Grow to exactly `num_words` words; never shrinks.
    pub(crate) fn grow_to_words(&mut self, num_words: usize) {
        if num_words > self.words.len() {
            self.words.resize(num_words, 0);
        }
    }

    /// Drop trailing zero words and release the spare allocation.
    pub(crate) fn shrink_to_fit(&mut self) {
        let keep = self.last_nonzero_group().map_or(0, |g| g + 1);
        self.words.truncate(keep);
        self.words.shrink_to_fit();
    }

    /// Set the bit for `key`. The caller guarantees `key < max_size()`.
    #[inline]
    pub(crate) fn set(&mut self, key: u64) -> bool {
        let word = &mut self.words[word_index(key)];
        let before = *word;
        *word |= bit_mask(key);
        *word != before
    }

    /// Clear the bit for `key`; keys past the end are ignored.
    #[inline]
    pub(crate) fn unset(&mut self, key: u64) -> bool {
        match self.words.get_mut(word_index(key)) {
            Some(word) => {
                let before = *word;
                *word &= !bit_mask(key);
                *word != before
            }
            None => false,
        }
    }

    #[inline]
    pub(crate) fn get(&self, key: u64) -> bool {
        self.words
            .get(word_index(key))
            .is_some_and(|word| word & bit_mask(key) != 0)
    }

    /// Batched insert: consecutive keys that land in the same word are folded
    /// into one local mask and written with a single read-modify-write.
    ///
    /// Any input order gives the same words as per-key insertion; sorted input
    /// just produces the longest runs. The caller guarantees every key is
    /// addressable.
    pub(crate) fn set_runs<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = u64>,
    {
        let mut run: Option<(usize, u64)> = None;
        for key in keys {
            let group = word_index(key);
            if let Some((current, mask)) = run.as_mut() {
                if *current == group {
                    *mask |= bit_mask(key);
                    continue;
                }
            }
            if let Some((current, mask)) = run.replace((group, bit_mask(key))) {
                self.words[current] |= mask;
            }
        }
        if let Some((current, mask)) = run {
            self.words[current] |= mask;
        }
    }

    pub(crate) fn count(&self) -> usize {
        count_ones_slice(&self.words)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.first_nonzero_group().is_none()
    }

    pub(crate) fn first_nonzero_group(&self) -> Option<usize> {
        self.words.iter().position(|&w| w != 0)
    }

    pub(crate) fn last_nonzero_group(&self) -> Option<usize> {
        self.words.iter().rposition(|&w| w != 0)
    }

    pub(crate) fn minimum(&self) -> Option<u64> {
        let group = self.first_nonzero_group()?;
        Some(key_of(group, lowest_bit(self.words[group])))
    }

    pub(crate) fn maximum(&self) -> Option<u64> {
        let group = self.last_nonzero_group()?;
        Some(key_of(group, highest_bit(self.words[group])))
    }

    pub(crate) fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Ascending decode of every set key through `f`.
    pub(crate) fn decode_with<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(u64) -> T,
    {
        let mut out = Vec::with_capacity(self.count());
        let (Some(first), Some(last)) = (self.first_nonzero_group(), self.last_nonzero_group())
        else {
            return out;
        };
        for (offset, &word) in self.words[first..=last].iter().enumerate() {
            let group = first + offset;
            let mut bits = word;
            for _ in 0..count_ones(word) {
                out.push(f(key_of(group, lowest_bit(bits))));
                bits = clear_lowest_bit(bits);
            }
        }
        out
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter::new(&self.words)
    }

    /// AND over the overlapping words, then zero every word past `other`'s end.
    pub(crate) fn and_assign(&mut self, other: &[u64]) {
        let limit = self.words.len().min(other.len());
        let (head, tail) = self.words.split_at_mut(limit);
        for (a, &b) in head.iter_mut().zip(other) {
            *a &= b;
        }
        tail.fill(0);
    }

    /// OR over the overlapping words. Callers grow first so no bit of
    /// `other` falls past the end.
    pub(crate) fn or_assign(&mut self, other: &[u64]) {
        for (a, &b) in self.words.iter_mut().zip(other) {
            *a |= b;
        }
    }

    /// XOR over the overlapping words; same growth contract as `or_assign`.
    pub(crate) fn xor_assign(&mut self, other: &[u64]) {
        for (a, &b) in self.words.iter_mut().zip(other) {
            *a ^= b;
        }
    }

    /// Membership equality: trailing zero words on either side are ignored.
    pub(crate) fn same_members(&self, other: &Self) -> bool {
        let limit = self.words.len().min(other.words.len());
        self.words[..limit] == other.words[..limit]
            && self.words[limit..].iter().all(|&w| w == 0)
            && other.words[limit..].iter().all(|&w| w == 0)
    }
}

/// Ascending iterator over the keys of a dense word array.
///
/// Created by `iter()` on [`DenseSet`](crate::DenseSet),
/// [`FixedBlock`](crate::FixedBlock) and the parallel dense set.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [u64],
    group: usize,
    current: u64,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(words: &'a [u64]) -> Self {
        Self {
            words,
            group: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.current == 0 {
            self.group += 1;
            self.current = *self.words.get(self.group)?;
        }
        let key = key_of(self.group, lowest_bit(self.current));
        self.current = clear_lowest_bit(self.current);
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = count_ones(self.current) as usize;
        let rest = self
            .words
            .get(self.group + 1..)
            .map_or(0, count_ones_slice);
        (pending + rest, Some(pending + rest))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
