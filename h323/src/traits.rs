//! Traits

use num_traits::{CheckedShl, Zero};
use std::ops::BitOr;

/// An unsigned integer type that a PER bit field can be read into.
///
/// Bit fields are accumulated most-significant-bit first, so the bound set
/// is exactly what the accumulation loop needs: a zero to start from, a
/// checked shift to grow by, an or to fold octet fragments in with, and a
/// conversion from the byte the fragment came out of. `to_u64` widens a
/// decoded field to the form the event sink and the constrained-number
/// arithmetic work in.
pub trait BitReadable:
    Copy + CheckedShl + BitOr<Self, Output = Self> + Zero + From<u8> + Into<u64>
{
    /// Widen to the value reported through the event sink.
    fn to_u64(self) -> u64 {
        self.into()
    }
}

impl<T> BitReadable for T where
    T: Copy + CheckedShl + BitOr<Self, Output = Self> + Zero + From<u8> + Into<u64>
{
}
