//! Block-index maps backing [`SparseSet`](super::SparseSet).
//!
//! Two strategies are provided:
//!
//! | Strategy | Map | Lookup | Ordered scan |
//! |----------|-----|--------|--------------|
//! | [`OrderedBlocks`] | `BTreeMap` | O(log b) | free |
//! | [`HashedBlocks`] | `FxHashMap` | O(1) | collect + sort |
//!
//! Both give the same membership results. Decode, `minimum` and `maximum`
//! are ascending/correct for both; the hashed map pays for it with an
//! explicit sort or full scan.

use crate::core::fixed::FixedBlock;
use crate::core::set::BitSet;
use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Ordered block map: ascending iteration for free.
pub type OrderedBlocks<const N: usize> = BTreeMap<u64, FixedBlock<N>>;

/// Hashed block map: constant-time lookup, unordered iteration.
pub type HashedBlocks<const N: usize> = rustc_hash::FxHashMap<u64, FixedBlock<N>>;

mod private {
    pub trait Sealed {}
}

impl<const N: usize> private::Sealed for BTreeMap<u64, FixedBlock<N>> {}

impl<const N: usize, S> private::Sealed for HashMap<u64, FixedBlock<N>, S> {}

/// A map from block index (`key >> log2(N)`) to the block holding those keys.
///
/// Sealed: implemented for `BTreeMap` and `HashMap` (any `BuildHasher`).
pub trait BlockMap<const N: usize>: private::Sealed + Default + Clone {
    /// Borrowing iterator in the map's native order.
    type Iter<'a>: Iterator<Item = (&'a u64, &'a FixedBlock<N>)>
    where
        Self: 'a;

    /// `true` when native iteration is ascending by block index.
    const ORDERED: bool;

    /// Number of block entries, including empty ones.
    fn len(&self) -> usize;

    /// `true` if the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block at `index`, if present.
    fn get(&self, index: u64) -> Option<&FixedBlock<N>>;

    /// Mutable block at `index`, if present.
    fn get_mut(&mut self, index: u64) -> Option<&mut FixedBlock<N>>;

    /// Block at `index`, created empty if absent.
    fn get_or_create(&mut self, index: u64) -> &mut FixedBlock<N>;

    /// Remove and return the block at `index`.
    fn remove(&mut self, index: u64) -> Option<FixedBlock<N>>;

    /// Keep only the entries for which `keep` returns `true`.
    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&u64, &mut FixedBlock<N>) -> bool;

    /// Iterate entries in native order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Call `f` on every block mutably.
    fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(&u64, &mut FixedBlock<N>);

    /// Entries in ascending block-index order.
    fn sorted(&self) -> Vec<(u64, &FixedBlock<N>)> {
        let mut entries: Vec<_> = self.iter().map(|(&index, block)| (index, block)).collect();
        if !Self::ORDERED {
            entries.sort_unstable_by_key(|&(index, _)| index);
        }
        entries
    }

    /// Non-empty block with the smallest index.
    fn first_nonempty(&self) -> Option<(u64, &FixedBlock<N>)> {
        self.iter()
            .filter(|(_, block)| !block.is_empty())
            .min_by_key(|&(&index, _)| index)
            .map(|(&index, block)| (index, block))
    }

    /// Non-empty block with the largest index.
    fn last_nonempty(&self) -> Option<(u64, &FixedBlock<N>)> {
        self.iter()
            .filter(|(_, block)| !block.is_empty())
            .max_by_key(|&(&index, _)| index)
            .map(|(&index, block)| (index, block))
    }
}

impl<const N: usize> BlockMap<N> for BTreeMap<u64, FixedBlock<N>> {
    type Iter<'a> = btree_map::Iter<'a, u64, FixedBlock<N>>;

    const ORDERED: bool = true;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get(&self, index: u64) -> Option<&FixedBlock<N>> {
        BTreeMap::get(self, &index)
    }

    fn get_mut(&mut self, index: u64) -> Option<&mut FixedBlock<N>> {
        BTreeMap::get_mut(self, &index)
    }

    fn get_or_create(&mut self, index: u64) -> &mut FixedBlock<N> {
        self.entry(index).or_insert_with(FixedBlock::empty)
    }

    fn remove(&mut self, index: u64) -> Option<FixedBlock<N>> {
        BTreeMap::remove(self, &index)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&u64, &mut FixedBlock<N>) -> bool,
    {
        BTreeMap::retain(self, keep);
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&u64, &mut FixedBlock<N>),
    {
        for (index, block) in BTreeMap::iter_mut(self) {
            f(index, block);
        }
    }

    // Walk in from either end, stopping at the first non-empty block.
    fn first_nonempty(&self) -> Option<(u64, &FixedBlock<N>)> {
        BTreeMap::iter(self)
            .find(|(_, block)| !block.is_empty())
            .map(|(&index, block)| (index, block))
    }

    fn last_nonempty(&self) -> Option<(u64, &FixedBlock<N>)> {
        BTreeMap::iter(self)
            .rev()
            .find(|(_, block)| !block.is_empty())
            .map(|(&index, block)| (index, block))
    }
}

impl<const N: usize, S> BlockMap<N> for HashMap<u64, FixedBlock<N>, S>
where
    S: BuildHasher + Default + Clone,
{
    type Iter<'a> = hash_map::Iter<'a, u64, FixedBlock<N>>
    where
        Self: 'a;

    const ORDERED: bool = false;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, index: u64) -> Option<&FixedBlock<N>> {
        HashMap::get(self, &index)
    }

    fn get_mut(&mut self, index: u64) -> Option<&mut FixedBlock<N>> {
        HashMap::get_mut(self, &index)
    }

    fn get_or_create(&mut self, index: u64) -> &mut FixedBlock<N> {
        self.entry(index).or_insert_with(FixedBlock::empty)
    }

    fn remove(&mut self, index: u64) -> Option<FixedBlock<N>> {
        HashMap::remove(self, &index)
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&u64, &mut FixedBlock<N>) -> bool,
    {
        HashMap::retain(self, |index, block| keep(index, block));
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&u64, &mut FixedBlock<N>),
    {
        for (index, block) in HashMap::iter_mut(self) {
            f(index, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with(keys: &[u64]) -> FixedBlock<64> {
        FixedBlock::<64>::from_keys(keys.iter().copied()).unwrap()
    }

    fn populate<M: BlockMap<64>>() -> M {
        let mut map = M::default();
        *map.get_or_create(9) = block_with(&[1]);
        *map.get_or_create(2) = block_with(&[5, 6]);
        map.get_or_create(0);
        *map.get_or_create(30) = block_with(&[63]);
        map.get_or_create(31);
        map
    }

    fn check_strategy<M: BlockMap<64>>() {
        let map: M = populate();
        assert_eq!(BlockMap::len(&map), 5);

        let order: Vec<u64> = map.sorted().iter().map(|&(index, _)| index).collect();
        assert_eq!(order, vec![0, 2, 9, 30, 31]);

        assert_eq!(map.first_nonempty().map(|(index, _)| index), Some(2));
        assert_eq!(map.last_nonempty().map(|(index, _)| index), Some(30));

        let mut pruned = map.clone();
        pruned.retain(|_, block| !block.is_empty());
        assert_eq!(BlockMap::len(&pruned), 3);
        assert!(BlockMap::remove(&mut pruned, 9).is_some());
        assert!(BlockMap::get(&pruned, 9).is_none());
    }

    #[test]
    fn test_ordered_blocks() {
        check_strategy::<OrderedBlocks<64>>();
    }

    #[test]
    fn test_hashed_blocks() {
        check_strategy::<HashedBlocks<64>>();
    }

    #[test]
    fn test_empty_map_has_no_extremes() {
        let map = OrderedBlocks::<64>::default();
        assert!(map.first_nonempty().is_none());
        assert!(BlockMap::is_empty(&map));

        let map = HashedBlocks::<64>::default();
        assert!(map.last_nonempty().is_none());
    }
}
