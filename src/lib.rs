//! Locality-preserving ordering of 3D positions
//!
//! This crate maps continuous 3D positions onto an integer grid and then onto
//! a space-filling curve (Morton or Hilbert), producing a totally ordered key.
//! Sorting a point cloud by that key puts points that are close in space close
//! to each other in memory, which is good for the cache behavior of whatever
//! spatial algorithm processes the points afterwards.
//!
//! The building blocks can be used on their own...
//!
//! - [`CoordinateMapper`] quantizes positions within known [`Bounds`].
//! - [`morton`] and [`hilbert`] turn grid coordinates into curve indices.
//! - [`CurveIndex`] is the comparable key produced by both curves.
//!
//! ...but most users will want either a [`SpatialComparator`], which plugs
//! into any comparison-based sort, or the [`SpatialSort`] slice extension.

pub mod bits;
mod comparator;
mod config;
pub mod hilbert;
mod index;
mod mapper;
pub mod morton;
mod sort;

pub use comparator::{CurveKind, Positioned, SpatialComparator};
pub use config::{ParseError, SortConfig};
pub use glam::Vec3;
pub use index::CurveIndex;
pub use mapper::{AxisSelection, Bounds, CoordinateMapper};
pub use sort::SpatialSort;

/// Integer type suitable for counting number of bits
///
/// Although 32-bit is very much overkill for this purpose, I am using this type
/// for interface compatibility with standard Rust integer methods.
///
pub type NumBits = u32;

/// Coordinate of a point on the integer grid that space-filling curves run on
///
/// Quantized positions never use more than 32 bits per axis, and the Hilbert
/// transform operates on full 32-bit bit-planes.
///
pub type Coordinate = u32;

/// Coordinates of a point on a 2D grid (in the order of the selected axes)
pub type Coordinates2D = [Coordinate; 2];

/// Coordinates of a point on a 3D grid (in x, y, z order)
pub type Coordinates3D = [Coordinate; 3];

/// Largest number of bits per axis that a quantized coordinate can carry
pub const MAX_BITS: NumBits = bits::num_bits::<Coordinate>();

/// Largest number of bits per axis that fit in a 64-bit 3D Morton code
pub const MAX_MORTON_3D_BITS: NumBits = bits::num_bits::<u64>() / 3;
