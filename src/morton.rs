//! Utilities related to the Morton space-filling curve
//!
//! A Morton code combines integers with bit patterns [ x1 x2 ... xN ],
//! [ y1 y2 ... yN ]... into the interleaved bit pattern [ ... y1 x1 ... y2 x2
//! ... yN xN ], where the first coordinate lands on the lowest bit of each
//! group.
//!
//! Sorting by Morton code produces a fractal space-filling curve with a
//! recurring Z-shaped pattern that has reasonable spatial locality properties,
//! though it does brutally jump from one area of space to another at times.
//! Its main selling point is that it is very cheap to compute.

use crate::{bits, Coordinate, Coordinates2D, Coordinates3D, MAX_MORTON_3D_BITS};

/// Spread the bits of a coordinate apart, leaving one zero between them
///
/// [ x1 x2 ... x32 ] becomes [ 0 x1 0 x2 ... 0 x32 ].
///
#[inline]
pub const fn split_2d(coord: Coordinate) -> u64 {
    // We spread the bits out by recursively splitting groups of bits in halves
    // and moving the high-order half away from the low-order half. The masks
    // that keep the right bits around are striped patterns of decreasing width.
    let mut code = coord as u64;
    let mut group_size = bits::num_bits::<Coordinate>() / 2;
    while group_size > 0 {
        // Iteration 1: [ 0..0 x1..x16 0..0 x17..x32 ]
        // Iteration 2: [ 0..0 x1..x8 0..0 x9..x16 ... 0..0 x25..x32 ]
        // ...
        // Iteration 5: [ 0 x1 0 x2 0 x3 ... 0 x32 ]
        code = (code | (code << group_size)) & bits::striped_mask(group_size);
        group_size /= 2;
    }
    code
}

/// Undo `split_2d`, discarding the bits that are not part of the coordinate
#[inline]
pub const fn compact_2d(code: u64) -> Coordinate {
    // Zero out the bits of the other coordinate, then pack the coordinate's
    // bits together by recursively grouping them in pairs, groups of 4...
    let mut code = code & bits::striped_mask(1);
    let mut group_size = 1;
    while group_size < bits::num_bits::<Coordinate>() {
        // Iteration 1: [  0  0 a1 a2  0  0 a3 a4 ...    0    0 aN-1 aN ]
        // Iteration 2: [  0  0  0  0 a1 a2 a3 a4 ... aN-3 aN-2 aN-1 aN ]
        code |= code >> group_size;
        group_size *= 2;
        code &= bits::striped_mask(group_size);
    }
    code as Coordinate
}

// Masks used to spread 21 bits out to every third bit of a 64-bit word. There
// is no neat power-of-two structure here since 21 is not a power of 2, so
// they are spelled out.
//
// 0b0000000000011111000000000000000000000000000000001111111111111111
// 0b0000000000011111000000000000000011111111000000000000000011111111
// 0b0001000000001111000000001111000000001111000000001111000000001111
// 0b0001000011000011000011000011000011000011000011000011000011000011
// 0b0001001001001001001001001001001001001001001001001001001001001001
const SPLIT_3D_MASKS: [(u32, u64); 5] = [
    (32, 0x001F_0000_0000_FFFF),
    (16, 0x001F_0000_FF00_00FF),
    (8, 0x100F_00F0_0F00_F00F),
    (4, 0x10C3_0C30_C30C_30C3),
    (2, 0x1249_2492_4924_9249),
];

/// Spread the low 21 bits of a coordinate apart, leaving two zeroes between
/// them
///
/// Higher-order bits are discarded, since 3 x 21 = 63 bits is all that a
/// 64-bit Morton code can hold.
///
#[inline]
pub const fn split_3d(coord: Coordinate) -> u64 {
    let mut code = (coord as u64) & bits::low_order_mask(MAX_MORTON_3D_BITS);
    let mut step = 0;
    while step < SPLIT_3D_MASKS.len() {
        let (shift, mask) = SPLIT_3D_MASKS[step];
        code = (code | (code << shift)) & mask;
        step += 1;
    }
    code
}

/// Undo `split_3d`, discarding the bits that are not part of the coordinate
#[inline]
pub const fn compact_3d(code: u64) -> Coordinate {
    // Run the splitting steps backwards, shifting right instead of left
    let mut code = code & SPLIT_3D_MASKS[SPLIT_3D_MASKS.len() - 1].1;
    let mut step = SPLIT_3D_MASKS.len() - 1;
    while step > 0 {
        let shift = SPLIT_3D_MASKS[step].0;
        let mask = SPLIT_3D_MASKS[step - 1].1;
        code = (code | (code >> shift)) & mask;
        step -= 1;
    }
    // Last step folds the 5 high-order bits back next to the 16 low-order ones
    code = (code | (code >> SPLIT_3D_MASKS[0].0)) & bits::low_order_mask(MAX_MORTON_3D_BITS);
    code as Coordinate
}

/// Encode 2D grid coordinates into a 64-bit Morton code
///
/// The first coordinate goes to the even bits, the second one to odd bits.
///
#[inline]
pub const fn encode_2d(coords: Coordinates2D) -> u64 {
    split_2d(coords[0]) | (split_2d(coords[1]) << 1)
}

/// Decode a 2D Morton code into its two coordinates
#[inline]
pub const fn decode_2d(code: u64) -> Coordinates2D {
    [compact_2d(code), compact_2d(code >> 1)]
}

/// Encode 3D grid coordinates into a 64-bit Morton code
///
/// Only the low 21 bits of each coordinate are used, and the top bit of the
/// resulting code is always zero. Coordinates should therefore come from a
/// mapper built with [`CurveKind::max_bits()`](crate::CurveKind::max_bits)
/// bits per axis, otherwise the order wraps around.
///
#[inline]
pub const fn encode_3d(coords: Coordinates3D) -> u64 {
    split_3d(coords[0]) | (split_3d(coords[1]) << 1) | (split_3d(coords[2]) << 2)
}

/// Decode a 3D Morton code into its three coordinates
#[inline]
pub const fn decode_3d(code: u64) -> Coordinates3D {
    [compact_3d(code), compact_3d(code >> 1), compact_3d(code >> 2)]
}
