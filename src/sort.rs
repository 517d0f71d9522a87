//! Sorting slices along space-filling curves

use crate::{AxisSelection, Bounds, CurveKind, Positioned, SpatialComparator};
use glam::Vec3;

/// Spatial sorting of slices
///
/// Curve indices are computed once per element and cached for the duration of
/// the sort, since they are much more expensive to compute than to compare.
/// The sort is not stable: elements that fall in the same grid cell end up in
/// an unspecified relative order.
///
/// When `bounds` is `None`, the bounding box of the slice's positions is used.
///
pub trait SpatialSort<T> {
    /// Sort along a Hilbert curve
    ///
    /// This is the best choice for spatial locality. If sorting speed matters
    /// more than the quality of the resulting order, consider
    /// [`spatial_sort_fast()`](SpatialSort::spatial_sort_fast) instead.
    ///
    fn spatial_sort(&mut self, selection: AxisSelection, bounds: Option<Bounds>)
    where
        T: Positioned,
    {
        self.spatial_sort_by(selection, CurveKind::Hilbert, bounds, T::position)
    }

    /// Sort along a Morton curve
    ///
    /// Faster than [`spatial_sort()`](SpatialSort::spatial_sort), but the
    /// resulting order has worse spatial locality.
    ///
    fn spatial_sort_fast(&mut self, selection: AxisSelection, bounds: Option<Bounds>)
    where
        T: Positioned,
    {
        self.spatial_sort_by(selection, CurveKind::Morton, bounds, T::position)
    }

    /// Sort along any curve, using a custom position extraction function
    fn spatial_sort_by<F>(
        &mut self,
        selection: AxisSelection,
        curve: CurveKind,
        bounds: Option<Bounds>,
        position: F,
    ) where
        F: Fn(&T) -> Vec3;

    /// Parallel version of [`spatial_sort_by()`](SpatialSort::spatial_sort_by)
    #[cfg(feature = "parallel")]
    fn par_spatial_sort_by<F>(
        &mut self,
        selection: AxisSelection,
        curve: CurveKind,
        bounds: Option<Bounds>,
        position: F,
    ) where
        T: Send + Sync,
        F: Fn(&T) -> Vec3 + Sync;
}

impl<T> SpatialSort<T> for [T] {
    fn spatial_sort_by<F>(
        &mut self,
        selection: AxisSelection,
        curve: CurveKind,
        bounds: Option<Bounds>,
        position: F,
    ) where
        F: Fn(&T) -> Vec3,
    {
        let bounds = bounds.unwrap_or_else(|| Bounds::from_positions(self.iter().map(&position)));
        let comparator = SpatialComparator::new(selection, curve, bounds, position);
        self.sort_by_cached_key(|item| comparator.key(item));
    }

    #[cfg(feature = "parallel")]
    fn par_spatial_sort_by<F>(
        &mut self,
        selection: AxisSelection,
        curve: CurveKind,
        bounds: Option<Bounds>,
        position: F,
    ) where
        T: Send + Sync,
        F: Fn(&T) -> Vec3 + Sync,
    {
        use rayon::prelude::*;
        let bounds = bounds.unwrap_or_else(|| {
            self.par_iter()
                .map(&position)
                .fold(|| None, |bounds: Option<Bounds>, pos| match bounds {
                    Some(bounds) => Some(bounds.encapsulate(pos)),
                    None => Some(Bounds::from_point(pos)),
                })
                .reduce(
                    || None,
                    |a, b| match (a, b) {
                        (Some(a), Some(b)) => Some(a.encapsulate(b.min).encapsulate(b.max())),
                        (a, b) => a.or(b),
                    },
                )
                .unwrap_or_default()
        });
        let comparator = SpatialComparator::new(selection, curve, bounds, position);
        self.par_sort_by_cached_key(|item| comparator.key(item));
    }
}
