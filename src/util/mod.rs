//! Low-level helpers shared by every set representation.
//!
//! # Modules
//!
//! - [`bitops`] - Bit-scan primitives and word/bit index math

pub mod bitops;

pub use bitops::{count_ones, is_power_of_two, GROUP_SHIFT, GROUP_SIZE};
