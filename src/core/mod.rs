//! Core types and traits shared by every set representation.
//!
//! - **Traits**: [`BitSet`], [`ResizableBitSet`], [`MergeableBitSet`]
//! - **Dense sets**: [`DenseSet`] (grows on insert), [`FixedBlock`] (fixed `[0, N)`)
//! - **Keys**: [`Key`], implemented for the unsigned integer types
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── set.rs     - Trait definitions and operator impls
//! ├── words.rs   - Word array shared by the dense representations
//! ├── dense.rs   - DenseSet
//! ├── fixed.rs   - FixedBlock<N>
//! ├── key.rs     - Key trait
//! └── mod.rs     - This file (public API)
//! ```
//!
//! # Bit Layout
//!
//! All representations agree on one layout: key `k` is bit `k & 63` of word
//! `k >> 6`. A [`FixedBlock`] inside a sparse set uses the same layout on the
//! block-local offset `k & (N - 1)`.
//!
//! # Ownership
//!
//! Every set owns its storage outright. `clone()` is a deep copy and set
//! algebra always works on independent copies or in place on the left-hand
//! operand; nothing is ever shared between two sets.
//!
//! None of the types are internally synchronized. Wrap a set in a `Mutex` or
//! `RwLock` to share it across threads.

pub mod dense;
pub mod fixed;
pub mod key;
pub mod set;
pub(crate) mod words;

pub use dense::DenseSet;
pub use fixed::FixedBlock;
pub use key::Key;
pub use set::{BitSet, MergeableBitSet, ResizableBitSet};
pub use words::Iter;

/// Default block size for [`FixedBlock`] and [`SparseSet`](crate::SparseSet): 65536 keys.
pub const DEFAULT_BLOCK_SIZE: usize = 65_536;
