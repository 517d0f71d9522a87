//! Quantization of continuous positions onto the integer grid

use crate::{bits, Coordinate, Coordinates2D, Coordinates3D, NumBits, MAX_BITS};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box that encloses the positions being sorted
///
/// Positions outside of the box are clamped onto its faces during
/// quantization, so their ordering is not meaningful.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimal corner of the box
    pub min: Vec3,

    /// Size of the box along each axis (max - min)
    pub extent: Vec3,
}

impl Bounds {
    /// Box with a given minimal corner and extent
    pub fn from_min_extent(min: Vec3, extent: Vec3) -> Self {
        Self { min, extent }
    }

    /// Box spanning from `min` to `max`
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::from_min_extent(min, max - min)
    }

    /// Zero-sized box located at a single point
    pub fn from_point(point: Vec3) -> Self {
        Self::from_min_extent(point, Vec3::ZERO)
    }

    /// Smallest box that contains every position of a sequence
    ///
    /// An empty sequence yields a zero-sized box at the origin.
    ///
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        let mut positions = positions.into_iter();
        let first = match positions.next() {
            Some(first) => first,
            None => return Self::default(),
        };
        positions.fold(Self::from_point(first), |bounds, pos| bounds.encapsulate(pos))
    }

    /// Maximal corner of the box
    pub fn max(&self) -> Vec3 {
        self.min + self.extent
    }

    /// Grow the box so that it contains a certain point
    #[must_use]
    pub fn encapsulate(self, point: Vec3) -> Self {
        Self::from_min_max(self.min.min(point), self.max().max(point))
    }
}

/// Choice of spatial axes that take part in the ordering
///
/// `Xyz` orders along a 3D curve. The other selections project positions on
/// a plane first, ignoring the third axis, which is the right call for data
/// that is mostly flat (e.g. objects laid out on terrain).
///
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSelection {
    /// All three axes, in x, y, z order
    #[default]
    Xyz,

    /// Projection on the XY plane
    Xy,

    /// Projection on the XZ plane
    Xz,

    /// Projection on the YZ plane
    Yz,
}

impl AxisSelection {
    /// Indices of the selected axes within a `Vec3`, in mapping order
    pub const fn axes(self) -> &'static [usize] {
        match self {
            Self::Xyz => &[0, 1, 2],
            Self::Xy => &[0, 1],
            Self::Xz => &[0, 2],
            Self::Yz => &[1, 2],
        }
    }

    /// Number of selected axes, i.e. dimensionality of the curve
    pub const fn dimensions(self) -> usize {
        self.axes().len()
    }

    /// Truth that this selection drops one axis
    pub const fn is_planar(self) -> bool {
        self.dimensions() == 2
    }
}

/// Mapping from positions within some bounds to integer grid coordinates
///
/// Every selected axis is scaled by the same factor, derived from the largest
/// extent among selected axes, so that the grid cells are cubes (or squares)
/// and curve locality corresponds to actual spatial locality.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    /// Minimal corner of the input bounds
    min: Vec3,

    /// Multiplier from position offsets to grid coordinates
    scale: f64,

    /// Largest grid coordinate
    max_coord: Coordinate,

    /// Axes to be mapped
    selection: AxisSelection,
}

impl CoordinateMapper {
    /// Set up a mapping from `bounds` to a grid of `num_bits` bits per axis
    ///
    /// Bit widths above 32 are treated as 32. If the selected axes of the
    /// bounds have zero extent, every position is mapped to the grid's origin.
    ///
    /// No curve-specific limit is applied here: 3D Morton codes only hold 21
    /// bits per axis, see [`CurveKind::max_bits()`](crate::CurveKind::max_bits).
    ///
    pub fn new(bounds: Bounds, selection: AxisSelection, num_bits: NumBits) -> Self {
        if num_bits > MAX_BITS {
            log::debug!(
                "Requested {} bits per axis, clamping to {}",
                num_bits,
                MAX_BITS
            );
        }
        let max_coord = bits::max_coordinate(num_bits);
        let range = selection
            .axes()
            .iter()
            .map(|&axis| bounds.extent[axis])
            .fold(0.0f32, f32::max);
        let scale = if range > 0.0 {
            max_coord as f64 / range as f64
        } else {
            log::debug!(
                "Bounds {:?} have no extent along {:?}, all positions map to the origin",
                bounds,
                selection
            );
            0.0
        };
        Self {
            min: bounds.min,
            scale,
            max_coord,
            selection,
        }
    }

    /// Axes that this mapper quantizes
    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    /// Largest coordinate that this mapper can produce
    pub fn max_coord(&self) -> Coordinate {
        self.max_coord
    }

    /// Quantize one axis of a position
    #[inline]
    fn map_axis(&self, pos: Vec3, axis: usize) -> Coordinate {
        let offset = (pos[axis] - self.min[axis]) as f64;
        // NaN goes through clamp untouched, and then becomes 0 in the cast
        (offset * self.scale).clamp(0.0, self.max_coord as f64) as Coordinate
    }

    /// Quantize the first two selected axes of a position
    #[inline]
    pub fn map_2d(&self, pos: Vec3) -> Coordinates2D {
        let axes = self.selection.axes();
        [self.map_axis(pos, axes[0]), self.map_axis(pos, axes[1])]
    }

    /// Quantize the x, y and z axes of a position
    ///
    /// Only meaningful for [`AxisSelection::Xyz`], since the scale of a planar
    /// mapper ignores the extent of the dropped axis.
    ///
    #[inline]
    pub fn map_3d(&self, pos: Vec3) -> Coordinates3D {
        debug_assert!(
            !self.selection.is_planar(),
            "3D mapping requested from a {:?} mapper",
            self.selection
        );
        [
            self.map_axis(pos, 0),
            self.map_axis(pos, 1),
            self.map_axis(pos, 2),
        ]
    }

    /// Quantize the selected axes of a position, in selection order
    ///
    /// Only the first [`AxisSelection::dimensions()`] coordinates are
    /// meaningful, the others are zero.
    ///
    pub fn map(&self, pos: Vec3) -> Coordinates3D {
        let mut result = [0; 3];
        for (coord, &axis) in result.iter_mut().zip(self.selection.axes()) {
            *coord = self.map_axis(pos, axis);
        }
        result
    }
}
