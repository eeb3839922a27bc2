//! Bit-scan primitives and word/bit index math.
//!
//! Every set representation in this crate stores keys in 64-bit words: key `k`
//! lives in word `k >> 6` at bit `k & 63`. The functions here are the only
//! place that arithmetic is spelled out.
//!
//! # Bit-scan contract
//!
//! [`count_ones`], [`trailing_zeros`] and [`leading_zeros`] are constant time.
//! Scans of an all-zero word return 64; set-level code always checks a word is
//! nonzero before scanning it, so that value is never turned into a key.
//!
//! By default the scans compile to the `u64` intrinsics (`POPCNT`, `TZCNT`,
//! `LZCNT` where available). The `portable-bitscan` feature swaps in
//! branch-free software versions with identical results.

#![allow(clippy::cast_possible_truncation)]

/// Number of keys stored per word.
pub const GROUP_SIZE: u64 = 64;

/// `log2(GROUP_SIZE)`; shifting a key right by this yields its word index.
pub const GROUP_SHIFT: u32 = 6;

/// Mask selecting the in-word bit offset of a key.
pub const GROUP_MASK: u64 = GROUP_SIZE - 1;

/// Count the number of set bits (1s) in a word.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::count_ones;
///
/// assert_eq!(count_ones(0b1010), 2);
/// assert_eq!(count_ones(0), 0);
/// assert_eq!(count_ones(u64::MAX), 64);
/// ```
#[inline(always)]
#[must_use]
pub const fn count_ones(value: u64) -> u32 {
    #[cfg(not(feature = "portable-bitscan"))]
    {
        value.count_ones()
    }
    #[cfg(feature = "portable-bitscan")]
    {
        portable::count_ones(value)
    }
}

/// Count trailing zeros: the offset of the lowest set bit.
///
/// Returns 64 for a zero word.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::trailing_zeros;
///
/// assert_eq!(trailing_zeros(1), 0);
/// assert_eq!(trailing_zeros(0b1000), 3);
/// assert_eq!(trailing_zeros(0), 64);
/// ```
#[inline(always)]
#[must_use]
pub const fn trailing_zeros(value: u64) -> u32 {
    #[cfg(not(feature = "portable-bitscan"))]
    {
        value.trailing_zeros()
    }
    #[cfg(feature = "portable-bitscan")]
    {
        portable::trailing_zeros(value)
    }
}

/// Count leading zeros: `63 - leading_zeros(w)` is the offset of the highest set bit.
///
/// Returns 64 for a zero word.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::leading_zeros;
///
/// assert_eq!(leading_zeros(1), 63);
/// assert_eq!(leading_zeros(0b1000), 60);
/// assert_eq!(leading_zeros(0), 64);
/// ```
#[inline(always)]
#[must_use]
pub const fn leading_zeros(value: u64) -> u32 {
    #[cfg(not(feature = "portable-bitscan"))]
    {
        value.leading_zeros()
    }
    #[cfg(feature = "portable-bitscan")]
    {
        portable::leading_zeros(value)
    }
}

/// Offset of the highest set bit of a nonzero word.
#[inline(always)]
#[must_use]
pub const fn highest_bit(value: u64) -> u32 {
    (GROUP_SIZE as u32 - 1) - leading_zeros(value)
}

/// Offset of the lowest set bit of a nonzero word.
#[inline(always)]
#[must_use]
pub const fn lowest_bit(value: u64) -> u32 {
    trailing_zeros(value)
}

/// Clear the lowest set bit of a word.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::clear_lowest_bit;
///
/// assert_eq!(clear_lowest_bit(0b1100), 0b1000);
/// assert_eq!(clear_lowest_bit(0), 0);
/// ```
#[inline(always)]
#[must_use]
pub const fn clear_lowest_bit(value: u64) -> u64 {
    value & value.wrapping_sub(1)
}

/// Check if a number is a power of two.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::is_power_of_two;
///
/// assert!(is_power_of_two(1));
/// assert!(is_power_of_two(2048));
/// assert!(!is_power_of_two(0));
/// assert!(!is_power_of_two(1000));
/// ```
#[inline(always)]
#[must_use]
pub const fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// `log2(n)` for a power of two `n`.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::log2_of_power_of_two;
///
/// assert_eq!(log2_of_power_of_two(1), 0);
/// assert_eq!(log2_of_power_of_two(2048), 11);
/// assert_eq!(log2_of_power_of_two(65536), 16);
/// ```
#[inline(always)]
#[must_use]
pub const fn log2_of_power_of_two(n: usize) -> u32 {
    n.trailing_zeros()
}

/// Number of words needed to address keys `0..=max_value`.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::words_for_max;
///
/// assert_eq!(words_for_max(0), 1);
/// assert_eq!(words_for_max(63), 1);
/// assert_eq!(words_for_max(64), 2);
/// assert_eq!(words_for_max(1023), 16);
/// ```
#[inline(always)]
#[must_use]
pub const fn words_for_max(max_value: u64) -> usize {
    word_index(max_value) + 1
}

/// Index of the word holding `key` (`key >> 6`).
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::word_index;
///
/// assert_eq!(word_index(63), 0);
/// assert_eq!(word_index(64), 1);
/// assert_eq!(word_index(128), 2);
/// ```
#[inline(always)]
#[must_use]
pub const fn word_index(key: u64) -> usize {
    (key >> GROUP_SHIFT) as usize
}

/// Bit offset of `key` within its word (`key & 63`).
#[inline(always)]
#[must_use]
pub const fn bit_offset(key: u64) -> u32 {
    (key & GROUP_MASK) as u32
}

/// Single-bit mask selecting `key` within its word.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::bit_mask;
///
/// assert_eq!(bit_mask(0), 1);
/// assert_eq!(bit_mask(65), 2);
/// assert_eq!(bit_mask(63), 1u64 << 63);
/// ```
#[inline(always)]
#[must_use]
pub const fn bit_mask(key: u64) -> u64 {
    1u64 << bit_offset(key)
}

/// Key represented by bit `offset` of word `group`.
#[inline(always)]
#[must_use]
pub const fn key_of(group: usize, offset: u32) -> u64 {
    ((group as u64) << GROUP_SHIFT) + offset as u64
}

/// Total number of set bits across a slice of words.
///
/// # Examples
///
/// ```
/// use nbitset::util::bitops::count_ones_slice;
///
/// assert_eq!(count_ones_slice(&[0b1010, 0b1111, 0b0001]), 7);
/// assert_eq!(count_ones_slice(&[]), 0);
/// ```
#[inline]
#[must_use]
pub fn count_ones_slice(words: &[u64]) -> usize {
    words.iter().map(|&w| count_ones(w) as usize).sum()
}

/// Software bit-scan fallbacks.
///
/// Always compiled so the test suite can check them against the intrinsics;
/// only wired into the public scans under `portable-bitscan`.
#[cfg_attr(not(feature = "portable-bitscan"), allow(dead_code))]
pub(crate) mod portable {
    const M1: u64 = 0x5555_5555_5555_5555;
    const M2: u64 = 0x3333_3333_3333_3333;
    const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f;
    const H01: u64 = 0x0101_0101_0101_0101;

    pub(crate) const fn count_ones(value: u64) -> u32 {
        let mut x = value;
        x -= (x >> 1) & M1;
        x = (x & M2) + ((x >> 2) & M2);
        x = (x + (x >> 4)) & M4;
        (x.wrapping_mul(H01) >> 56) as u32
    }

    pub(crate) const fn trailing_zeros(value: u64) -> u32 {
        if value == 0 {
            return 64;
        }
        count_ones((value & value.wrapping_neg()) - 1)
    }

    pub(crate) const fn leading_zeros(value: u64) -> u32 {
        let mut x = value;
        x |= x >> 1;
        x |= x >> 2;
        x |= x >> 4;
        x |= x >> 8;
        x |= x >> 16;
        x |= x >> 32;
        64 - count_ones(x)
    }
}
