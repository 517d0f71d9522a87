//! Utilities related to the Hilbert space-filling curve
//!
//! Compared to the Morton curve, the Hilbert curve never jumps across space, it
//! always moves from one point of the grid to one of its direct neighbors. The
//! price to pay for this superior spatial locality is that it follows a more
//! complex geometrical pattern based on recursively rotated and flipped
//! U-like shapes, which requires more computation to follow.
//!
//! The encoder implemented here is John Skilling's "transposed index"
//! algorithm (Programming the Hilbert curve, AIP Conference Proceedings 707,
//! 381, 2004), which works in any number of dimensions. It always operates on
//! full 32-bit coordinates. A grid that only uses the low `b` bits of each
//! coordinate occupies the corner cell of the full-size curve that is visited
//! first, so the indices of its points are exactly `0..2^(N*b)`.
//!
//! Here is how the curve looks on a 4x4 grid, first coordinate going right
//! and second coordinate going down:
//!
//! ```text
//! ├┐┌>
//! ┌┘└┐
//! │┌┐│
//! └┘└┘
//! ```

use crate::{bits, Coordinate, Coordinates2D, Coordinates3D, CurveIndex};

/// Mask of the most significant bit of a coordinate
const TOP_BIT: Coordinate = 1 << (bits::num_bits::<Coordinate>() - 1);

/// First pass: undo the recursive rotations and reflections of the curve
///
/// We go through the bit-planes of the coordinates from the most significant
/// one to the least significant one. At each level, the bit of every
/// coordinate tells which sub-cell of the current cell we are in, and hence
/// how the lower levels of the curve are oriented. That orientation is
/// normalized by either inverting the lower bits of the first coordinate (when
/// the current coordinate's bit is set) or exchanging the lower bits of the
/// first and current coordinates (when it is not).
///
#[inline]
pub const fn undo_excess_work<const N: usize>(mut coords: [Coordinate; N]) -> [Coordinate; N] {
    let mut plane = TOP_BIT;
    while plane > 1 {
        let low_bits = plane - 1;
        let mut axis = 0;
        while axis < N {
            if coords[axis] & plane != 0 {
                coords[0] ^= low_bits;
            } else {
                // When axis is 0 this swaps the first coordinate with itself,
                // which is a no-op
                let [first, other] = bits::bitwise_swaps(low_bits, coords[0], coords[axis]);
                coords[0] = first;
                coords[axis] = other;
            }
            axis += 1;
        }
        plane >>= 1;
    }
    coords
}

/// Second pass: Gray-encode the normalized coordinates
///
/// Each coordinate is XORed with the previous one. The resulting
/// coordinates are then corrected by flipping each bit-plane according to the
/// parity of the higher-order bits of the last coordinate, which is exactly
/// what an exclusive XOR scan of that coordinate's bits computes.
///
/// `N` must be at least 1.
///
#[inline]
pub const fn gray_encode<const N: usize>(mut coords: [Coordinate; N]) -> [Coordinate; N] {
    let mut axis = 1;
    while axis < N {
        coords[axis] ^= coords[axis - 1];
        axis += 1;
    }
    let correction = bits::bitwise_xor_ltr_exclusive_scan(coords[N - 1]);
    let mut axis = 0;
    while axis < N {
        coords[axis] ^= correction;
        axis += 1;
    }
    coords
}

/// Third pass: turn the transposed index into N words of curve index
///
/// After the first two passes, the Hilbert index is spread across the
/// coordinates: its most significant bit is the top bit of coordinate 0, the
/// next one is the top bit of coordinate 1, and so on round-robin through the
/// coordinates, then through lower bit-planes. We gather these bits into N
/// words, most significant word first.
///
#[inline]
pub const fn transpose<const N: usize>(coords: [Coordinate; N]) -> [Coordinate; N] {
    let mut words = [0; N];
    let mut src_axis = 0;
    let mut src_bit = TOP_BIT;
    let mut word_idx = 0;
    while word_idx < N {
        let mut dst_bit = TOP_BIT;
        while dst_bit > 0 {
            if coords[src_axis] & src_bit != 0 {
                words[word_idx] |= dst_bit;
            }
            src_axis += 1;
            if src_axis == N {
                src_axis = 0;
                src_bit >>= 1;
            }
            dst_bit >>= 1;
        }
        word_idx += 1;
    }
    words
}

/// Compute the N-word Hilbert index of a point of the N-dimensional grid
///
/// The first output word is the most significant one.
///
#[inline]
pub const fn transpose_to_index<const N: usize>(coords: [Coordinate; N]) -> [Coordinate; N] {
    transpose(gray_encode(undo_excess_work(coords)))
}

/// Hilbert index of a point of the 2D grid
#[inline]
pub const fn index_2d(coords: Coordinates2D) -> u64 {
    CurveIndex::from_words_2d(transpose_to_index(coords)).high()
}

/// Hilbert index of a point of the 3D grid
#[inline]
pub const fn index_3d(coords: Coordinates3D) -> CurveIndex {
    CurveIndex::from_words_3d(transpose_to_index(coords))
}
