//! Comparison of positioned items along a space-filling curve

use crate::{
    hilbert, morton, AxisSelection, Bounds, CoordinateMapper, CurveIndex, NumBits, MAX_BITS,
    MAX_MORTON_3D_BITS,
};
use core::{cmp::Ordering, fmt};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Space-filling curve used to order positions
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Morton order, a.k.a. Z-order curve
    ///
    /// Cheap to compute, but with a few large jumps across space. 3D Morton
    /// codes are limited to 21 bits of precision per axis.
    ///
    #[serde(alias = "zorder", alias = "z-order")]
    Morton,

    /// Hilbert curve
    ///
    /// Better locality than Morton order, at a higher computational cost.
    ///
    #[default]
    Hilbert,
}

impl CurveKind {
    /// Highest useful number of bits per axis for this curve
    pub const fn max_bits(self, selection: AxisSelection) -> NumBits {
        match (self, selection) {
            (Self::Morton, AxisSelection::Xyz) => MAX_MORTON_3D_BITS,
            _ => MAX_BITS,
        }
    }
}

/// Something that has a position in 3D space
pub trait Positioned {
    /// Position of this item
    fn position(&self) -> Vec3;
}

impl Positioned for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl Positioned for [f32; 3] {
    fn position(&self) -> Vec3 {
        Vec3::from_array(*self)
    }
}

impl Positioned for (f32, f32, f32) {
    fn position(&self) -> Vec3 {
        Vec3::from(*self)
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

/// Curve index computation, resolved once for a curve and dimensionality
type KeyFn = fn(&CoordinateMapper, Vec3) -> CurveIndex;

fn morton_2d(mapper: &CoordinateMapper, pos: Vec3) -> CurveIndex {
    CurveIndex::from_u64(morton::encode_2d(mapper.map_2d(pos)))
}

fn morton_3d(mapper: &CoordinateMapper, pos: Vec3) -> CurveIndex {
    CurveIndex::from_u64(morton::encode_3d(mapper.map_3d(pos)))
}

fn hilbert_2d(mapper: &CoordinateMapper, pos: Vec3) -> CurveIndex {
    CurveIndex::from_u64(hilbert::index_2d(mapper.map_2d(pos)))
}

fn hilbert_3d(mapper: &CoordinateMapper, pos: Vec3) -> CurveIndex {
    hilbert::index_3d(mapper.map_3d(pos))
}

/// Three-way comparison of items by their position along a space-filling
/// curve
///
/// Items are compared by mapping their position onto an integer grid covering
/// the comparator's bounds, then comparing their indices on the selected
/// curve. Items that fall in the same grid cell compare equal.
///
/// A comparator holds no mutable state, so it can be shared across threads
/// as long as the position function can.
///
#[derive(Clone, Copy)]
pub struct SpatialComparator<F> {
    mapper: CoordinateMapper,
    curve: CurveKind,
    key_fn: KeyFn,
    position: F,
}

impl<F> SpatialComparator<F> {
    /// Set up a comparator with the highest precision available
    ///
    /// This is 32 bits per axis, except for 3D Morton codes which can only
    /// hold 21 bits per axis.
    ///
    pub fn new(selection: AxisSelection, curve: CurveKind, bounds: Bounds, position: F) -> Self {
        Self::with_bits(selection, curve, bounds, curve.max_bits(selection), position)
    }

    /// Set up a comparator that quantizes positions to `num_bits` per axis
    ///
    /// Requests for more precision than the curve can hold are clamped to the
    /// maximum, see [`CurveKind::max_bits()`].
    ///
    pub fn with_bits(
        selection: AxisSelection,
        curve: CurveKind,
        bounds: Bounds,
        num_bits: NumBits,
        position: F,
    ) -> Self {
        let max_bits = curve.max_bits(selection);
        if num_bits > max_bits {
            log::debug!(
                "{:?} curve over {:?} holds at most {} bits per axis, {} requested",
                curve,
                selection,
                max_bits,
                num_bits
            );
        }
        let num_bits = num_bits.min(max_bits);
        let key_fn: KeyFn = match (curve, selection.is_planar()) {
            (CurveKind::Morton, true) => morton_2d,
            (CurveKind::Morton, false) => morton_3d,
            (CurveKind::Hilbert, true) => hilbert_2d,
            (CurveKind::Hilbert, false) => hilbert_3d,
        };
        log::trace!(
            "Ordering along {:?} curve over {:?} with {} bits per axis",
            curve,
            selection,
            num_bits
        );
        Self {
            mapper: CoordinateMapper::new(bounds, selection, num_bits),
            curve,
            key_fn,
            position,
        }
    }

    /// Mapping used to quantize positions
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Curve that items are ordered along
    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    /// Curve index of a position
    #[inline]
    pub fn index_of(&self, pos: Vec3) -> CurveIndex {
        (self.key_fn)(&self.mapper, pos)
    }

    /// Curve index of an item, suitable as a sort key
    #[inline]
    pub fn key<T>(&self, item: &T) -> CurveIndex
    where
        F: Fn(&T) -> Vec3,
    {
        self.index_of((self.position)(item))
    }

    /// Compare two items by curve index
    #[inline]
    pub fn compare<T>(&self, a: &T, b: &T) -> Ordering
    where
        F: Fn(&T) -> Vec3,
    {
        self.key(a).cmp(&self.key(b))
    }
}

impl<F> fmt::Debug for SpatialComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialComparator")
            .field("mapper", &self.mapper)
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    const SELECTIONS: [AxisSelection; 4] = [
        AxisSelection::Xyz,
        AxisSelection::Xy,
        AxisSelection::Xz,
        AxisSelection::Yz,
    ];

    fn identity(pos: &Vec3) -> Vec3 {
        *pos
    }

    #[test]
    fn precision() {
        let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::ONE);
        let mapper_bits = |selection, curve| {
            SpatialComparator::new(selection, curve, bounds, identity)
                .mapper()
                .max_coord()
        };
        assert_eq!(mapper_bits(AxisSelection::Xyz, CurveKind::Morton), 0x1F_FFFF);
        assert_eq!(mapper_bits(AxisSelection::Xy, CurveKind::Morton), u32::MAX);
        assert_eq!(mapper_bits(AxisSelection::Xyz, CurveKind::Hilbert), u32::MAX);
        assert_eq!(mapper_bits(AxisSelection::Yz, CurveKind::Hilbert), u32::MAX);

        let coarse = SpatialComparator::with_bits(
            AxisSelection::Xyz,
            CurveKind::Morton,
            bounds,
            32,
            identity,
        );
        assert_eq!(coarse.mapper().max_coord(), 0x1F_FFFF);
    }

    #[test]
    fn morton_small_grid() {
        let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::new(7.0, 7.0, 0.0));
        let comparator =
            SpatialComparator::with_bits(AxisSelection::Xy, CurveKind::Morton, bounds, 3, identity);
        let index = |x, y| comparator.key(&Vec3::new(x, y, 0.0));
        assert_eq!(index(0.0, 0.0), CurveIndex::from_u64(0));
        assert_eq!(index(7.0, 7.0), CurveIndex::from_u64(63));
        assert_eq!(index(1.0, 0.0), CurveIndex::from_u64(1));
        assert_eq!(index(0.0, 1.0), CurveIndex::from_u64(2));
    }

    #[test]
    fn hilbert_small_grid() {
        let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::new(3.0, 3.0, 0.0));
        let comparator = SpatialComparator::with_bits(
            AxisSelection::Xy,
            CurveKind::Hilbert,
            bounds,
            2,
            identity,
        );
        let mut cells = (0..16)
            .map(|i| Vec3::new((i % 4) as f32, (i / 4) as f32, 0.0))
            .collect::<Vec<_>>();
        cells.sort_by(|a, b| comparator.compare(a, b));
        let visited = cells
            .iter()
            .map(|pos| [pos.x as u32, pos.y as u32])
            .collect::<Vec<_>>();
        assert_eq!(
            visited,
            [
                [0, 0],
                [1, 0],
                [1, 1],
                [0, 1],
                [0, 2],
                [0, 3],
                [1, 3],
                [1, 2],
                [2, 2],
                [2, 3],
                [3, 3],
                [3, 2],
                [3, 1],
                [2, 1],
                [2, 0],
                [3, 0]
            ]
        );
        for (expected, pos) in cells.iter().enumerate() {
            assert_eq!(comparator.key(pos), CurveIndex::from_u64(expected as u64));
        }
    }

    #[test]
    fn hilbert_3d_uses_both_parts() {
        let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::ONE);
        let comparator =
            SpatialComparator::new(AxisSelection::Xyz, CurveKind::Hilbert, bounds, identity);
        let far = comparator.key(&Vec3::new(0.0, 0.0, 1.0));
        assert!(far.high() > 0);
        assert_eq!(comparator.key(&Vec3::ZERO), CurveIndex::MIN);
        assert_eq!(
            comparator.compare(&Vec3::ZERO, &Vec3::new(0.0, 0.0, 1.0)),
            Ordering::Less
        );
    }

    #[test]
    fn same_cell_compares_equal() {
        let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::splat(8.0));
        for curve in [CurveKind::Morton, CurveKind::Hilbert] {
            let comparator =
                SpatialComparator::with_bits(AxisSelection::Xyz, curve, bounds, 3, identity);
            let a = Vec3::new(1.2, 1.5, 1.9);
            let b = Vec3::new(2.1, 1.3, 2.0);
            assert_eq!(comparator.compare(&a, &b), Ordering::Equal);
        }
    }

    #[test]
    fn degenerate_bounds() {
        let point = Vec3::new(1.0, 2.0, 3.0);
        for &selection in &SELECTIONS {
            for curve in [CurveKind::Morton, CurveKind::Hilbert] {
                let comparator =
                    SpatialComparator::new(selection, curve, Bounds::from_point(point), identity);
                assert_eq!(comparator.key(&point), CurveIndex::MIN);
                assert_eq!(comparator.compare(&point, &point), Ordering::Equal);
            }
        }
    }

    #[test]
    fn position_extraction() {
        struct Body {
            name: &'static str,
            center: Vec3,
        }
        let bodies = [
            Body {
                name: "far",
                center: Vec3::splat(10.0),
            },
            Body {
                name: "near",
                center: Vec3::ZERO,
            },
        ];
        let bounds = Bounds::from_positions(bodies.iter().map(|body| body.center));
        let comparator = SpatialComparator::new(
            AxisSelection::Xyz,
            CurveKind::Hilbert,
            bounds,
            |body: &Body| body.center,
        );
        let mut sorted = bodies.iter().collect::<Vec<_>>();
        sorted.sort_by(|a, b| comparator.compare(*a, *b));
        assert_eq!(sorted[0].name, "near");
        assert_eq!(sorted[1].name, "far");

        let tuple_comparator = SpatialComparator::new(
            AxisSelection::Xy,
            CurveKind::Morton,
            bounds,
            |item: &(f32, f32, f32)| item.position(),
        );
        assert_eq!(
            tuple_comparator.compare(&(0.0f32, 0.0f32, 0.0f32), &(10.0, 10.0, 0.0)),
            Ordering::Less
        );
    }

    quickcheck! {
        fn dropped_axis_is_ignored(x: u16, y: u16, z1: u16, z2: u16, other: (u16, u16, u16)) -> bool {
            let bounds = Bounds::from_min_max(Vec3::ZERO, Vec3::splat(u16::MAX as f32));
            let [x, y, z1, z2] = [x, y, z1, z2].map(f32::from);
            let other = Vec3::new(other.0.into(), other.1.into(), other.2.into());
            [AxisSelection::Xy, AxisSelection::Xz, AxisSelection::Yz]
                .iter()
                .all(|&selection| {
                    let axes = selection.axes();
                    let dropped = 3 - axes[0] - axes[1];
                    let mut a = Vec3::new(x, y, 0.0);
                    let mut b = a;
                    a[dropped] = z1;
                    b[dropped] = z2;
                    [CurveKind::Morton, CurveKind::Hilbert].iter().all(|&curve| {
                        let comparator = SpatialComparator::new(selection, curve, bounds, identity);
                        comparator.key(&a) == comparator.key(&b)
                            && comparator.compare(&a, &other) == comparator.compare(&b, &other)
                    })
                })
        }
    }
}
