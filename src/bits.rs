//! Binary arithmetic utilities used for space-filling curve computations

use crate::{Coordinate, NumBits};

/// Count the number of bits of an integer
#[inline(always)]
pub const fn num_bits<T>() -> NumBits {
    (core::mem::size_of::<T>() * 8) as _
}

/// Generate a mask that selects a certain number of low-order bits: 0000...0011
#[inline(always)]
pub const fn low_order_mask(length: NumBits) -> u64 {
    if length < num_bits::<u64>() {
        (1 << length) - 1
    } else {
        u64::MAX
    }
}

/// Largest value that a coordinate quantized on `length` bits can take
///
/// Requests for more bits than a [`Coordinate`] holds saturate to
/// `Coordinate::MAX`.
///
#[inline(always)]
pub const fn max_coordinate(length: NumBits) -> Coordinate {
    if length >= num_bits::<Coordinate>() {
        Coordinate::MAX
    } else {
        low_order_mask(length) as Coordinate
    }
}

/// Generate a mask with an alternating "striped" bit pattern: 00110011...0011
#[inline(always)]
pub const fn striped_mask(stripe_length: NumBits) -> u64 {
    // Generate the stripes
    let mut stripes = low_order_mask(stripe_length);
    let mut curr_length = 2 * stripe_length;
    while curr_length < num_bits::<u64>() {
        // Iteration 0: 00...00000000000000011
        // Iteration 1: 00...00000000000110011
        // Iteration 2: 00...00011001100110011
        stripes |= stripes << curr_length;
        curr_length *= 2;
    }
    stripes
}

/// Compute the left-to-right inclusive XOR scan of an integer's bits
///
/// Given an integer with bits [ x1 x2 x3 ... ], this produces another integer
/// with bits [ x1  x1^x2  x1^x2^x3 ... ].
///
#[inline(always)]
pub const fn bitwise_xor_ltr_inclusive_scan(mut bits: Coordinate) -> Coordinate {
    // This is a bitwise implementation of the Hillis/Steele parallel inclusive
    // scan algorithm.
    let mut stride = 1;
    while stride < num_bits::<Coordinate>() {
        // Iteration 0: [ x1     x2        x3           x4           x5 ... ]
        // Iteration 1: [ x1  x1^x2     x2^x3        x3^x4        x4^x5 ... ]
        // Iteration 2: [ x1  x1^x2  x1^x2^x3  x1^x2^x3^x4  x2^x3^x4^x5 ... ]
        bits ^= bits >> stride;
        stride *= 2;
    }
    bits
}

/// Compute the left-to-right exclusive XOR scan of an integer's bits
///
/// Given an integer with bits [ x1 x2 x3 x4 ... ], this produces another
/// integer with bits [ 0  x1  x1^x2  x1^x2^x3 ... ].
///
#[inline(always)]
pub const fn bitwise_xor_ltr_exclusive_scan(bits: Coordinate) -> Coordinate {
    bitwise_xor_ltr_inclusive_scan(bits >> 1)
}

/// Conditionally swap two integers' bits according to a mask
///
/// Given an integer A with bits [ a1 a2 ... aN ], an integer B with bits
/// [ b1 b2 ... bN ], and a mask with bits [ m1 m2 ... mN ], this function
/// produces two integers:
///
/// - One whose bits are equal to ai where the corresponding mask bit mi is
///   false and to bi where mi is true.
/// - One whose bits are conversely equal to bi where the corresponding mask
///   bit mi is false and to ai where mi is true.
///
#[inline(always)]
pub const fn bitwise_swaps(
    swap_mask: Coordinate,
    src1: Coordinate,
    src2: Coordinate,
) -> [Coordinate; 2] {
    let same_mask = !swap_mask;
    let res1 = (src1 & same_mask) | (src2 & swap_mask);
    let res2 = (src2 & same_mask) | (src1 & swap_mask);
    [res1, res2]
}
