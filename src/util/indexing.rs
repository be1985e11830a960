use crate::util::*;

pub fn real_buffer_size<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
) -> usize {
    let mut accumulator = 1;
    for d in exclusive_bound {
        accumulator *= *d as usize;
    }
    accumulator
}

/// Like `real_buffer_size`, but returns `None` instead of wrapping
/// when the cell count does not fit in a `usize`.
pub fn checked_buffer_size<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
) -> Option<usize> {
    exclusive_bound
        .iter()
        .try_fold(1usize, |acc, d| acc.checked_mul(usize::try_from(*d).ok()?))
}

pub fn coord_to_linear<const GRID_DIMENSION: usize>(
    coord: &Coord<GRID_DIMENSION>,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> usize {
    let mut accumulator = 0;
    for d in 0..GRID_DIMENSION {
        debug_assert!(coord[d] >= 0);
        accumulator = accumulator * exclusive_bounds[d] as usize
            + coord[d] as usize;
    }
    accumulator
}

pub fn linear_to_coord<const GRID_DIMENSION: usize>(
    linear_index: usize,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> Coord<GRID_DIMENSION> {
    let mut result = Coord::zero();
    let mut index_accumulator = linear_index;
    for d in (0..GRID_DIMENSION).rev() {
        let extent = exclusive_bounds[d] as usize;
        result[d] = (index_accumulator % extent) as i32;
        index_accumulator /= extent;
    }
    result
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn buffer_size_test() {
        {
            let dimensions = vector![5];
            assert_eq!(real_buffer_size(&dimensions), 5);
            assert_eq!(checked_buffer_size(&dimensions), Some(5));
        }

        {
            let dimensions = vector![5, 7];
            assert_eq!(real_buffer_size(&dimensions), 5 * 7);
            assert_eq!(checked_buffer_size(&dimensions), Some(35));
        }

        {
            let dimensions = vector![i32::MAX, i32::MAX, i32::MAX];
            assert_eq!(checked_buffer_size(&dimensions), None);
        }
    }

    #[test]
    fn coord_to_linear_index_test() {
        {
            let index = vector![5, 7];
            let bound = vector![20, 20];
            assert_eq!(coord_to_linear(&index, &bound), 5 * 20 + 7);
        }

        {
            let index = vector![5];
            let bound = vector![20];
            assert_eq!(coord_to_linear(&index, &bound), 5);
        }

        {
            let index = vector![3, 1];
            let bound = vector![4, 6];
            assert_eq!(coord_to_linear(&index, &bound), 3 * 6 + 1);
        }
    }

    #[test]
    fn linear_to_coord_test() {
        {
            let index = 67;
            let bound = vector![10, 10];
            assert_eq!(linear_to_coord(index, &bound), vector![6, 7]);
        }

        {
            let index = 67;
            let bound = vector![100];
            assert_eq!(linear_to_coord(index, &bound), vector![67]);
        }

        {
            let index = 19;
            let bound = vector![4, 6];
            assert_eq!(linear_to_coord(index, &bound), vector![3, 1]);
        }
    }
}
