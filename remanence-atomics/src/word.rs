//! Word widths the emulation operates on

use core::ops::{BitAnd, BitOr, BitXor};

/// A 1-, 2-, or 4-byte memory word with unsigned modular arithmetic
///
/// The arithmetic operations wrap modulo 2^(8 * WIDTH), matching what the
/// corresponding hardware instructions would do on a wider core.
pub trait Word:
    Copy + Eq + BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self>
{
    /// Width in bytes
    const WIDTH: usize;

    /// The all-zeroes word (the released state of a `__sync` lock)
    const ZERO: Self;

    /// Wrapping addition
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Wrapping subtraction
    fn wrapping_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_word {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl Word for $ty {
                const WIDTH: usize = $width;
                const ZERO: Self = 0;

                #[inline(always)]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$ty>::wrapping_add(self, rhs)
                }

                #[inline(always)]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$ty>::wrapping_sub(self, rhs)
                }
            }
        )*
    };
}

impl_word! {
    u8 => 1,
    u16 => 2,
    u32 => 4,
}
