use super::*;
use crate::error::{Error, Result};
use crate::util::indexing::checked_buffer_size;

/// A domain that owns its buffer.
pub struct OwnedDomain<const GRID_DIMENSION: usize> {
    aabb: AABB<GRID_DIMENSION>,
    buffer: Vec<f64>,
}

impl<const GRID_DIMENSION: usize> OwnedDomain<GRID_DIMENSION> {
    /// Allocate a zero filled domain covering `aabb`.
    /// Reports failure instead of aborting when the buffer can't be had.
    pub fn try_new(aabb: AABB<GRID_DIMENSION>) -> Result<Self> {
        debug_assert!(aabb.check_validity());
        let exclusive_bounds = aabb.exclusive_bounds();
        let cells = checked_buffer_size(&exclusive_bounds).ok_or_else(|| {
            Error::SizeOverflow {
                extents: exclusive_bounds.iter().copied().collect(),
            }
        })?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(cells)
            .map_err(|e| Error::Allocation {
                cells,
                source: e,
            })?;
        buffer.resize(cells, 0.0);
        Ok(OwnedDomain { aabb, buffer })
    }
}

impl<const GRID_DIMENSION: usize> DomainView<GRID_DIMENSION>
    for OwnedDomain<GRID_DIMENSION>
{
    fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        &self.aabb
    }

    fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    fn aabb_buffer_mut(&mut self) -> (&AABB<GRID_DIMENSION>, &mut [f64]) {
        (&self.aabb, &mut self.buffer)
    }

    #[track_caller]
    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> f64 {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index]
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn mock_solver<
        const GRID_DIMENSION: usize,
        DomainType: DomainView<GRID_DIMENSION>,
    >(
        input: &mut DomainType,
        output: &mut DomainType,
    ) {
        std::mem::swap(input, output);
    }

    #[test]
    fn swap_test() {
        let mut a = OwnedDomain::try_new(AABB::new(matrix![0, 1])).unwrap();
        let mut b = OwnedDomain::try_new(AABB::new(matrix![0, 1])).unwrap();
        let a_ptr = a.buffer().as_ptr();
        let b_ptr = b.buffer().as_ptr();
        mock_solver(&mut a, &mut b);
        assert_eq!(a_ptr, b.buffer().as_ptr());
        assert_eq!(b_ptr, a.buffer().as_ptr());
    }

    #[test]
    fn zero_filled_test() {
        let d = OwnedDomain::try_new(AABB::new(matrix![0, 4; 0, 4])).unwrap();
        assert_eq!(d.buffer().len(), 25);
        assert!(d.buffer().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn allocation_failure_test() {
        // More bytes than isize::MAX, rejected before touching the allocator
        let huge = AABB::new(matrix![0, i32::MAX - 1; 0, i32::MAX - 1]);
        let result = OwnedDomain::try_new(huge);
        assert!(matches!(result, Err(Error::Allocation { .. })));
    }

    #[test]
    fn size_overflow_test() {
        let huge = AABB::<3>::cube(i32::MAX);
        match OwnedDomain::try_new(huge) {
            Err(Error::SizeOverflow { extents }) => {
                assert_eq!(extents, vec![i32::MAX; 3]);
            }
            _ => panic!("expected a size overflow"),
        }
    }
}
