//! Comparable key produced by space-filling curve encoders

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// Index of a point on a space-filling curve
///
/// 2D curves (and 3D Morton codes, which are capped at 63 bits) fit in a
/// single 64-bit word, but a 3D Hilbert index has 96 bits, so the index is
/// stored as a 64-bit high-order part followed by a 32-bit low-order part.
/// Ordering is lexicographic over (high, low), which the derived `Ord` gives
/// us for free thanks to the field declaration order.
///
/// Indices are only meaningfully comparable when they come from the same
/// curve, dimensionality and coordinate mapping.
///
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct CurveIndex {
    high: u64,
    low: Coordinate,
}

impl CurveIndex {
    /// Smallest possible curve index
    pub const MIN: Self = Self::new(0, 0);

    /// Largest possible curve index
    pub const MAX: Self = Self::new(u64::MAX, Coordinate::MAX);

    /// Build an index from its high- and low-order parts
    #[inline]
    pub const fn new(high: u64, low: Coordinate) -> Self {
        Self { high, low }
    }

    /// Wrap an index that fits in a single 64-bit word
    #[inline]
    pub const fn from_u64(index: u64) -> Self {
        Self::new(index, 0)
    }

    /// Pack 2 curve output words, most significant first
    #[inline]
    pub const fn from_words_2d(words: [Coordinate; 2]) -> Self {
        Self::from_u64(((words[0] as u64) << 32) | words[1] as u64)
    }

    /// Pack 3 curve output words, most significant first
    #[inline]
    pub const fn from_words_3d(words: [Coordinate; 3]) -> Self {
        Self::new(((words[0] as u64) << 32) | words[1] as u64, words[2])
    }

    /// High-order part of the index
    #[inline]
    pub const fn high(self) -> u64 {
        self.high
    }

    /// Low-order part of the index, always 0 for single-word indices
    #[inline]
    pub const fn low(self) -> Coordinate {
        self.low
    }
}

impl From<u64> for CurveIndex {
    fn from(index: u64) -> Self {
        Self::from_u64(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn high_part_dominates() {
        assert!(CurveIndex::new(1, 0) > CurveIndex::new(0, Coordinate::MAX));
        assert!(CurveIndex::new(1, 1) > CurveIndex::new(1, 0));
        assert_eq!(CurveIndex::new(3, 4), CurveIndex::new(3, 4));
        assert!(CurveIndex::MIN < CurveIndex::MAX);
    }

    #[test]
    fn word_packing() {
        let index = CurveIndex::from_words_2d([0xDEAD_BEEF, 0x1234_5678]);
        assert_eq!(index.high(), 0xDEAD_BEEF_1234_5678);
        assert_eq!(index.low(), 0);

        let index = CurveIndex::from_words_3d([1, 2, 3]);
        assert_eq!(index.high(), (1 << 32) | 2);
        assert_eq!(index.low(), 3);
    }

    quickcheck! {
        fn single_word_order_is_preserved(a: u64, b: u64) -> bool {
            CurveIndex::from(a).cmp(&CurveIndex::from(b)) == a.cmp(&b)
        }

        fn three_word_order_is_lexicographic(a: (u32, u32, u32), b: (u32, u32, u32)) -> bool {
            let index_a = CurveIndex::from_words_3d([a.0, a.1, a.2]);
            let index_b = CurveIndex::from_words_3d([b.0, b.1, b.2]);
            index_a.cmp(&index_b) == a.cmp(&b)
        }
    }
}
