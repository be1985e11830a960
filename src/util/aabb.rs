use crate::util::indexing::*;
use crate::util::*;
use std::ops::Range;

/// Axis Aligned Bounding Box (AABB) for coordinate types.
/// Each instance is inclusive of both corners.
/// This class is responsible for alot of indexing operations,
/// where we map between a linear buffer and coordinates.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct AABB<const DIMENSION: usize> {
    pub bounds: Bounds<DIMENSION>,
}

impl<const GRID_DIMENSION: usize> std::fmt::Display for AABB<GRID_DIMENSION> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(f, "{:?}", self.bounds)
    }
}

impl<const DIMENSION: usize> AABB<DIMENSION> {
    /// Create AABB from raw bounds.
    #[inline]
    pub fn new(bounds: Bounds<DIMENSION>) -> Self {
        AABB { bounds }
    }

    /// Create AABB from corners.
    pub fn from_mm(min: Coord<DIMENSION>, max: Coord<DIMENSION>) -> Self {
        let result = AABB {
            bounds: Bounds::from_columns(&[min, max]),
        };
        debug_assert!(result.check_validity());
        result
    }

    /// The grid box with `extent` cells along every axis,
    /// anchored at the origin.
    pub fn cube(extent: i32) -> Self {
        debug_assert!(extent > 0);
        Self::from_mm(Coord::zero(), Coord::from_element(extent - 1))
    }

    /// Moving min to the origin, returns the exclusie size in each direction
    /// i.e. [0, 9]  would have exclusive size of 10.
    pub fn exclusive_bounds(&self) -> Coord<DIMENSION> {
        (self.bounds.column(1) - self.bounds.column(0)).add_scalar(1)
    }

    /// Return the number of coordinates contained in the instance.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        real_buffer_size(&self.exclusive_bounds())
    }

    /// Return the linear index for a coord in the instance
    pub fn coord_to_linear(&self, coord: &Coord<DIMENSION>) -> usize {
        coord_to_linear(&(coord - self.min()), &self.exclusive_bounds())
    }

    /// Return the coordinate in the instance for a given linear index.
    pub fn linear_to_coord(&self, index: usize) -> Coord<DIMENSION> {
        linear_to_coord(index, &self.exclusive_bounds()) + self.min()
    }

    /// Check whether the instance contains a coordinate.
    pub fn contains(&self, coord: &Coord<DIMENSION>) -> bool {
        for d in 0..DIMENSION {
            if coord[d] < self.bounds[(d, 0)] || coord[d] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Check whether another AABB is contained in the instance.
    pub fn contains_aabb(&self, other: &Self) -> bool {
        for d in 0..DIMENSION {
            if other.bounds[(d, 0)] < self.bounds[(d, 0)]
                || other.bounds[(d, 1)] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    /// Return min corner.
    pub fn min(&self) -> Coord<DIMENSION> {
        self.bounds.column(0).into()
    }

    /// Return max corner
    pub fn max(&self) -> Coord<DIMENSION> {
        self.bounds.column(1).into()
    }

    /// Check that max >= min
    pub fn check_validity(&self) -> bool {
        for d in 0..DIMENSION {
            if self.bounds[(d, 0)] > self.bounds[(d, 1)] {
                return false;
            }
        }
        true
    }

    /// Return iterator over contained coords
    /// in linear ordering.
    pub fn coord_iter(&self) -> impl Iterator<Item = Coord<DIMENSION>> + '_ {
        (0..self.buffer_size()).map(|i| self.linear_to_coord(i))
    }

    /// True when `self` occupies one contiguous run of `outer`'s
    /// row-major buffer, i.e. every axis after the first spans `outer`.
    pub fn is_contiguous_in(&self, outer: &Self) -> bool {
        (1..DIMENSION).all(|d| {
            self.bounds[(d, 0)] == outer.bounds[(d, 0)]
                && self.bounds[(d, 1)] == outer.bounds[(d, 1)]
        })
    }

    /// Linear index range of `self` within `outer`'s buffer.
    /// Only meaningful when `is_contiguous_in(outer)` holds.
    pub fn linear_range_in(&self, outer: &Self) -> Range<usize> {
        debug_assert!(outer.contains_aabb(self));
        debug_assert!(self.is_contiguous_in(outer));
        outer.coord_to_linear(&self.min())
            ..outer.coord_to_linear(&self.max()) + 1
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn buffer_size_test() {
        {
            let a = AABB::new(matrix![0, 5]);
            assert_eq!(a.buffer_size(), 6);
        }

        {
            let dimensions = AABB::new(matrix![0, 5; 0, 7]);
            assert_eq!(dimensions.buffer_size(), 6 * 8);
        }

        {
            let dimensions = AABB::new(matrix![1, 6; 1, 8]);
            assert_eq!(dimensions.buffer_size(), 6 * 8);
        }
    }

    #[test]
    fn cube_test() {
        assert_eq!(AABB::<1>::cube(10), AABB::new(matrix![0, 9]));
        assert_eq!(AABB::<2>::cube(4), AABB::new(matrix![0, 3; 0, 3]));
    }

    #[test]
    fn linear_to_coord_test() {
        {
            let bb = AABB::new(matrix![2, 8]);
            let c_1 = bb.linear_to_coord(5);
            assert_eq!(c_1, vector![7]);
        }

        {
            let a = AABB::new(matrix![1, 9]);
            assert_eq!(a.linear_to_coord(0), vector![1]);
        }
    }

    #[test]
    fn in_box_comp_test() {
        {
            let bound = AABB::new(matrix![0, 9]);
            let c = vector![8];
            let li = bound.coord_to_linear(&c);
            assert_eq!(c, bound.linear_to_coord(li));
        }

        {
            let bound = AABB::new(matrix![0, 9; 0, 9]);
            let c = vector![9, 8];
            let li = bound.coord_to_linear(&c);
            assert_eq!(li, 98);
            assert_eq!(c, bound.linear_to_coord(li));
        }
    }

    #[test]
    fn contains_test() {
        let a = AABB::new(matrix![0, 9; 0, 9]);
        let b = AABB::new(matrix![3, 7; 0, 9]);
        let c = AABB::new(matrix![8, 12; 0, 9]);
        let d = AABB::new(matrix![10, 12; 0, 9]);
        assert!(a.contains_aabb(&b));
        assert!(!a.contains_aabb(&c));
        assert!(!a.contains_aabb(&d));
        assert!(a.contains(&vector![9, 0]));
        assert!(!a.contains(&vector![9, -1]));
    }

    #[test]
    fn check_validity_test() {
        assert!(AABB::new(matrix![0, 9]).check_validity());
        assert!(!AABB::new(matrix![9, 0]).check_validity());
        assert!(AABB::new(matrix![0, 0]).check_validity());
    }

    #[test]
    fn linear_range_test() {
        let outer = AABB::new(matrix![0, 9; 0, 4]);
        let band = AABB::new(matrix![2, 3; 0, 4]);
        assert!(band.is_contiguous_in(&outer));
        assert_eq!(band.linear_range_in(&outer), 10..20);

        let column = AABB::new(matrix![0, 9; 1, 2]);
        assert!(!column.is_contiguous_in(&outer));

        let line = AABB::new(matrix![0, 99]);
        let tile = AABB::new(matrix![40, 59]);
        assert_eq!(tile.linear_range_in(&line), 40..60);
    }
}
