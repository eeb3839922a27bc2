//! Unsigned key types accepted by the set representations.

/// An unsigned integer that can be stored in a bit set.
///
/// Keys are widened losslessly to `u64` before any word arithmetic, so every
/// representation works on one key domain regardless of the caller's type.
///
/// # Examples
///
/// ```
/// use nbitset::prelude::*;
///
/// let mut set = DenseSet::new();
/// set.insert(7u8);
/// set.insert(300u16);
/// set.insert(70_000u32);
/// set.insert(5usize);
/// assert_eq!(set.decode(), vec![5, 7, 300, 70_000]);
/// ```
pub trait Key: Copy + Ord {
    /// Widen the key to the internal `u64` domain.
    fn to_u64(self) -> u64;
}

macro_rules! impl_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl Key for $t {
                #[inline(always)]
                fn to_u64(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_key!(u8, u16, u32, u64, usize);
