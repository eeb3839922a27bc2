//! nbitset: word-packed bitmap sets of unsigned integers.
//!
//! nbitset stores a set of non-negative integer keys as bits packed into
//! 64-bit words, and provides the usual set algebra on top: intersection,
//! union, symmetric difference and difference.
//!
//! # Quick Start
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let mut set = DenseSet::new();
//! set.insert(1u64);
//! set.insert(1023u64);
//!
//! assert!(set.contains(1u64));
//! assert_eq!(set.max_size(), 1024);
//! assert_eq!(set.decode(), vec![1, 1023]);
//! ```
//!
//! # Representations
//!
//! | Type | Capacity | Memory | Best For |
//! |------|----------|--------|----------|
//! | [`DenseSet`] | grows on insert | one bit per key up to the largest | Keys packed near zero |
//! | [`FixedBlock<N>`] | fixed `[0, N)` | `N / 8` bytes | Known upper bound |
//! | [`SparseSet<N, M>`] | grows by block | one block per occupied `N`-key range | Clustered keys spread over a wide range |
//! | [`ParDenseSet`] | grows on insert | same as `DenseSet` | Large word arrays, bulk algebra |
//!
//! All of them implement [`BitSet`] and [`MergeableBitSet`]; the dynamically
//! sized dense sets also implement [`ResizableBitSet`].
//!
//! # Set Algebra
//!
//! Algebra is available as trait methods (in place and copying) and as the
//! `& | ^ -` operators on references:
//!
//! ```
//! use nbitset::prelude::*;
//!
//! let a = OrderedSparseSet::<2048>::from_keys([1u64, 5, 7, 1_000_000]).unwrap();
//! let b = OrderedSparseSet::<2048>::from_keys([5u64, 1_000_000, 2_000_000]).unwrap();
//!
//! assert_eq!((&a & &b).decode(), vec![5, 1_000_000]);
//! assert_eq!((&a - &b).decode(), vec![1, 7]);
//!
//! let mut c = a.clone();
//! c |= &b;
//! assert_eq!(c.count(), 5);
//! ```
//!
//! # Empty Sets
//!
//! `minimum()` and `maximum()` return `None` on an empty set; no error is
//! raised and no sentinel key is reserved.
//!
//! # Features
//!
//! - `rayon` (default) - [`ParDenseSet`], data-parallel word operations
//! - `trace` - `tracing` events for growth, shrinking, block creation and
//!   parallel regions
//! - `portable-bitscan` - software popcount / trailing-zero / leading-zero
//!   fallbacks instead of the `u64` intrinsics
//!
//! # Thread Safety
//!
//! Sets are plain owned values: `Send` and `Sync`, with no internal locking.
//! Concurrent mutation needs an external `Mutex` or `RwLock`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/nbitset/0.1.0")]
#![forbid(unsafe_code)]

/// Core set types and traits
pub mod core;
/// Error types and result aliases
pub mod error;
/// Bit-scan primitives and index math
pub mod util;
/// Block-sparse sets
pub mod sparse;
/// Builders for bulk construction
pub mod builder;
/// Data-parallel dense sets (requires `rayon` feature)
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub mod parallel;

// Re-export commonly used types at crate root
pub use crate::error::{NbitError, Result};

// Re-export core traits and types
pub use crate::core::{
    BitSet, DenseSet, FixedBlock, Key, MergeableBitSet, ResizableBitSet, DEFAULT_BLOCK_SIZE,
};

// Re-export sparse sets and block maps
pub use crate::sparse::{
    BlockMap, HashedBlocks, HashedSparseSet, OrderedBlocks, OrderedSparseSet, SparseSet,
};

// Re-export builders at the crate root
pub use crate::builder::{DenseSetBuilder, SparseSetBuilder};

#[cfg(feature = "rayon")]
pub use crate::parallel::ParDenseSet;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use nbitset::prelude::*;
///
/// let mut block = FixedBlock::<64>::new().unwrap();
/// block.insert(63u8).unwrap();
/// assert_eq!(block.maximum(), Some(63));
/// ```
pub mod prelude {
    pub use crate::core::{
        BitSet, DenseSet, FixedBlock, Key, MergeableBitSet, ResizableBitSet, DEFAULT_BLOCK_SIZE,
    };
    pub use crate::error::{NbitError, Result};
    pub use crate::sparse::{
        BlockMap, HashedBlocks, HashedSparseSet, OrderedBlocks, OrderedSparseSet, SparseSet,
    };

    // Re-export builders
    pub use crate::builder::{DenseSetBuilder, SparseSetBuilder};

    #[cfg(feature = "rayon")]
    pub use crate::parallel::ParDenseSet;
}
