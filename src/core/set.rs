//! Trait definitions shared by every set representation.
//!
//! - [`BitSet`]: membership, counting, min/max, decode. Implemented by all
//!   representations.
//! - [`ResizableBitSet`]: explicit grow/shrink. Only the dynamically sized
//!   dense sets implement it; fixed-capacity blocks have no such operations.
//! - [`MergeableBitSet`]: in-place and copying set algebra between two sets
//!   of the same kind.
//!
//! # Examples
//!
//! ```
//! use nbitset::prelude::*;
//!
//! fn summary<S: BitSet>(set: &S) -> (usize, Option<u64>, Option<u64>) {
//!     (set.count(), set.minimum(), set.maximum())
//! }
//!
//! let dense: DenseSet = [3u64, 9, 200].into_iter().collect();
//! assert_eq!(summary(&dense), (3, Some(3), Some(200)));
//!
//! let mut sparse = OrderedSparseSet::<2048>::new().unwrap();
//! sparse.insert(1_000_000u64);
//! assert_eq!(summary(&sparse), (1, Some(1_000_000), Some(1_000_000)));
//! ```

use crate::core::key::Key;
use crate::error::Result;

/// Core set interface.
///
/// Keys of any [`Key`] type are widened to `u64`; results are reported in
/// that domain.
pub trait BitSet {
    /// Insert a key, failing with
    /// [`CapacityViolation`](crate::NbitError::CapacityViolation) if the set
    /// cannot address it.
    ///
    /// Returns `true` if the key was not already present. Dense sets fail
    /// with [`InvalidParameters`](crate::NbitError::InvalidParameters) for
    /// keys past [`MAX_DENSE_VALUE`](crate::builder::MAX_DENSE_VALUE)
    /// instead of attempting the allocation; sparse sets never fail.
    fn try_insert<K: Key>(&mut self, key: K) -> Result<bool>;

    /// Remove a key. Returns `true` if it was present.
    ///
    /// Keys past the current capacity are ignored.
    fn erase<K: Key>(&mut self, key: K) -> bool;

    /// Test membership.
    fn contains<K: Key>(&self, key: K) -> bool;

    /// Number of keys in the set. Computed by population count, not cached.
    fn count(&self) -> usize;

    /// Alias of [`count`](Self::count).
    fn len(&self) -> usize {
        self.count()
    }

    /// `true` if no key is set.
    fn is_empty(&self) -> bool;

    /// Number of keys addressable without growth.
    fn max_size(&self) -> u64;

    /// Smallest key, or `None` (the undefined sentinel) for an empty set.
    fn minimum(&self) -> Option<u64>;

    /// Largest key, or `None` (the undefined sentinel) for an empty set.
    fn maximum(&self) -> Option<u64>;

    /// Remove every key without releasing capacity.
    fn clear(&mut self);

    /// Decode the set into an ascending sequence, mapping every key through `f`.
    fn decode_with<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(u64) -> T;

    /// Decode the set into an ascending sequence of keys.
    fn decode(&self) -> Vec<u64> {
        self.decode_with(|key| key)
    }

    /// Insert every key from an iterator; stops at the first error.
    fn try_extend<K, I>(&mut self, keys: I) -> Result<()>
    where
        K: Key,
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.try_insert(key)?;
        }
        Ok(())
    }
}

/// Sets whose capacity can change after construction.
pub trait ResizableBitSet: BitSet {
    /// Grow so keys up to `new_max` are addressable. Never shrinks.
    fn resize(&mut self, new_max: u64);

    /// Release trailing capacity that holds no keys.
    fn shrink_to_fit(&mut self);
}

/// Set algebra between two sets of the same kind.
pub trait MergeableBitSet: BitSet + Clone {
    /// Keep only keys also present in `other`.
    fn intersect_with(&mut self, other: &Self);

    /// Add every key of `other`.
    fn union_with(&mut self, other: &Self);

    /// Keep keys present in exactly one of the two sets.
    fn symmetric_difference_with(&mut self, other: &Self);

    /// Remove every key of `other`: `self ^ (self & other)`.
    fn difference_with(&mut self, other: &Self) {
        let common = self.intersection(other);
        self.symmetric_difference_with(&common);
    }

    /// Copying form of [`intersect_with`](Self::intersect_with).
    #[must_use]
    fn intersection(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.intersect_with(other);
        out
    }

    /// Copying form of [`union_with`](Self::union_with).
    #[must_use]
    fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.union_with(other);
        out
    }

    /// Copying form of [`symmetric_difference_with`](Self::symmetric_difference_with).
    #[must_use]
    fn symmetric_difference(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.symmetric_difference_with(other);
        out
    }

    /// Copying form of [`difference_with`](Self::difference_with).
    #[must_use]
    fn difference(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.difference_with(other);
        out
    }
}

/// Implements `& | ^ -` on references and `&= |= ^= -=` with a reference
/// right-hand side in terms of [`MergeableBitSet`].
macro_rules! impl_set_operators {
    ([$($generics:tt)*] $ty:ty $(where $($bounds:tt)+)?) => {
        impl<$($generics)*> ::std::ops::BitAndAssign<&$ty> for $ty $(where $($bounds)+)? {
            fn bitand_assign(&mut self, rhs: &$ty) {
                $crate::core::set::MergeableBitSet::intersect_with(self, rhs);
            }
        }

        impl<$($generics)*> ::std::ops::BitOrAssign<&$ty> for $ty $(where $($bounds)+)? {
            fn bitor_assign(&mut self, rhs: &$ty) {
                $crate::core::set::MergeableBitSet::union_with(self, rhs);
            }
        }

        impl<$($generics)*> ::std::ops::BitXorAssign<&$ty> for $ty $(where $($bounds)+)? {
            fn bitxor_assign(&mut self, rhs: &$ty) {
                $crate::core::set::MergeableBitSet::symmetric_difference_with(self, rhs);
            }
        }

        impl<$($generics)*> ::std::ops::SubAssign<&$ty> for $ty $(where $($bounds)+)? {
            fn sub_assign(&mut self, rhs: &$ty) {
                $crate::core::set::MergeableBitSet::difference_with(self, rhs);
            }
        }

        impl<$($generics)*> ::std::ops::BitAnd<&$ty> for &$ty $(where $($bounds)+)? {
            type Output = $ty;

            fn bitand(self, rhs: &$ty) -> $ty {
                $crate::core::set::MergeableBitSet::intersection(self, rhs)
            }
        }

        impl<$($generics)*> ::std::ops::BitOr<&$ty> for &$ty $(where $($bounds)+)? {
            type Output = $ty;

            fn bitor(self, rhs: &$ty) -> $ty {
                $crate::core::set::MergeableBitSet::union(self, rhs)
            }
        }

        impl<$($generics)*> ::std::ops::BitXor<&$ty> for &$ty $(where $($bounds)+)? {
            type Output = $ty;

            fn bitxor(self, rhs: &$ty) -> $ty {
                $crate::core::set::MergeableBitSet::symmetric_difference(self, rhs)
            }
        }

        impl<$($generics)*> ::std::ops::Sub<&$ty> for &$ty $(where $($bounds)+)? {
            type Output = $ty;

            fn sub(self, rhs: &$ty) -> $ty {
                $crate::core::set::MergeableBitSet::difference(self, rhs)
            }
        }
    };
}

pub(crate) use impl_set_operators;
