//! Splitting the index space into tiles.
//!
//! Tile generation is pure and knows nothing about threads.
//! `split_tiles_mut` hands each outer tile its own slice of the
//! destination buffer, which is what lets tiles run in parallel without
//! locking.

use crate::util::*;
use std::ops::RangeInclusive;

/// Inclusive ranges `[s, min(s + block_size - 1, extent - 1)]` for
/// `s = 0, block_size, 2 * block_size, ...`.
/// The last range is clipped to the extent, nothing is padded.
pub fn block_ranges(
    extent: usize,
    block_size: usize,
) -> Vec<RangeInclusive<usize>> {
    debug_assert!(block_size > 0);
    (0..extent)
        .step_by(block_size)
        .map(|start| start..=(start + block_size - 1).min(extent - 1))
        .collect()
}

/// Cut `aabb` into boxes of at most `block_sizes[d]` cells along axis `d`.
/// Tiles come out in row-major order of their min corner.
pub fn decompose<const GRID_DIMENSION: usize>(
    aabb: &AABB<GRID_DIMENSION>,
    block_sizes: &Coord<GRID_DIMENSION>,
) -> Vec<AABB<GRID_DIMENSION>> {
    let exclusive_bounds = aabb.exclusive_bounds();
    let min = aabb.min();
    let mut result = vec![*aabb];
    for d in 0..GRID_DIMENSION {
        debug_assert!(block_sizes[d] > 0);
        let ranges = block_ranges(
            exclusive_bounds[d] as usize,
            block_sizes[d] as usize,
        );
        let mut next = Vec::with_capacity(result.len() * ranges.len());
        for tile in &result {
            for range in &ranges {
                let mut split = *tile;
                split.bounds[(d, 0)] = min[d] + *range.start() as i32;
                split.bounds[(d, 1)] = min[d] + *range.end() as i32;
                next.push(split);
            }
        }
        result = next;
    }
    result
}

/// True when `tiles` cover every coordinate of `aabb` exactly once.
pub fn is_partition<const GRID_DIMENSION: usize>(
    aabb: &AABB<GRID_DIMENSION>,
    tiles: &[AABB<GRID_DIMENSION>],
) -> bool {
    let mut hits = vec![0u32; aabb.buffer_size()];
    for tile in tiles {
        if !tile.check_validity() || !aabb.contains_aabb(tile) {
            return false;
        }
        for coord in tile.coord_iter() {
            hits[aabb.coord_to_linear(&coord)] += 1;
        }
    }
    hits.iter().all(|h| *h == 1)
}

/// `block_size` as a coordinate, at most `extent`.
fn clamp_block_size(block_size: usize, extent: i32) -> i32 {
    i32::try_from(block_size).map_or(extent, |b| b.min(extent))
}

/// Two level tiling of a grid.
/// Outer tiles are dispatched in parallel. For 2D they are bands of whole
/// rows, each cut into column sub-tiles that are walked sequentially,
/// with the innermost loop over contiguous columns.
#[derive(Clone, Debug)]
pub struct TilePlan<const GRID_DIMENSION: usize> {
    aabb: AABB<GRID_DIMENSION>,
    tiles: Vec<OuterTile<GRID_DIMENSION>>,
}

#[derive(Clone, Debug)]
pub struct OuterTile<const GRID_DIMENSION: usize> {
    pub aabb: AABB<GRID_DIMENSION>,
    pub sub_tiles: Vec<AABB<GRID_DIMENSION>>,
}

impl<const GRID_DIMENSION: usize> TilePlan<GRID_DIMENSION> {
    /// Outer tiles take `block_size` cells of axis 0 and all of every
    /// other axis. In 2D and up each is cut into sub-tiles of
    /// `inner_block_size` cells along the last axis.
    /// In 1D an outer tile is its own single sub-tile.
    /// A block size past the extent yields one tile spanning that axis.
    pub fn new(
        aabb: AABB<GRID_DIMENSION>,
        block_size: usize,
        inner_block_size: usize,
    ) -> Self {
        debug_assert!(block_size > 0 && inner_block_size > 0);
        let mut outer_sizes = aabb.exclusive_bounds();
        outer_sizes[0] = clamp_block_size(block_size, outer_sizes[0]);
        let tiles = decompose(&aabb, &outer_sizes)
            .into_iter()
            .map(|band| {
                let mut inner_sizes = band.exclusive_bounds();
                if GRID_DIMENSION > 1 {
                    let d = GRID_DIMENSION - 1;
                    inner_sizes[d] =
                        clamp_block_size(inner_block_size, inner_sizes[d]);
                }
                OuterTile {
                    aabb: band,
                    sub_tiles: decompose(&band, &inner_sizes),
                }
            })
            .collect();
        TilePlan { aabb, tiles }
    }

    pub fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        &self.aabb
    }

    pub fn tiles(&self) -> &[OuterTile<GRID_DIMENSION>] {
        &self.tiles
    }

    pub fn outer_tiles(&self) -> Vec<AABB<GRID_DIMENSION>> {
        self.tiles.iter().map(|t| t.aabb).collect()
    }

    pub fn sub_tiles(&self) -> Vec<AABB<GRID_DIMENSION>> {
        self.tiles
            .iter()
            .flat_map(|t| t.sub_tiles.iter().copied())
            .collect()
    }
}

/// Give every outer tile its own slice of `buffer`, the row-major buffer
/// of `aabb`. Tiles must be contiguous runs of `aabb`, listed in buffer
/// order, and together cover it.
pub fn split_tiles_mut<'a, 'b, const GRID_DIMENSION: usize>(
    aabb: &AABB<GRID_DIMENSION>,
    tiles: &'b [OuterTile<GRID_DIMENSION>],
    buffer: &'a mut [f64],
) -> Vec<(&'b OuterTile<GRID_DIMENSION>, &'a mut [f64])> {
    debug_assert_eq!(buffer.len(), aabb.buffer_size());
    let mut result = Vec::with_capacity(tiles.len());
    let mut remainder = buffer;
    let mut consumed = 0;
    for tile in tiles {
        let range = tile.aabb.linear_range_in(aabb);
        debug_assert_eq!(range.start, consumed, "tiles must be in order");
        let (head, tail) =
            std::mem::take(&mut remainder).split_at_mut(range.len());
        result.push((tile, head));
        remainder = tail;
        consumed = range.end;
    }
    debug_assert!(remainder.is_empty(), "tiles must cover the buffer");
    result
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn block_ranges_test() {
        assert_eq!(block_ranges(10, 3), vec![0..=2, 3..=5, 6..=8, 9..=9]);
        assert_eq!(block_ranges(10, 5), vec![0..=4, 5..=9]);
        assert_eq!(block_ranges(10, 64), vec![0..=9]);
        assert_eq!(block_ranges(1, 1), vec![0..=0]);
    }

    #[test]
    fn decompose_1d_test() {
        let aabb = AABB::new(matrix![0, 9]);
        let tiles = decompose(&aabb, &vector![4]);
        assert_eq!(
            tiles,
            vec![
                AABB::new(matrix![0, 3]),
                AABB::new(matrix![4, 7]),
                AABB::new(matrix![8, 9]),
            ]
        );
        assert!(is_partition(&aabb, &tiles));
    }

    #[test]
    fn decompose_2d_test() {
        let aabb = AABB::new(matrix![0, 4; 0, 6]);
        let tiles = decompose(&aabb, &vector![2, 3]);
        assert_eq!(tiles.len(), 3 * 3);
        assert_eq!(tiles[0], AABB::new(matrix![0, 1; 0, 2]));
        assert_eq!(tiles[2], AABB::new(matrix![0, 1; 6, 6]));
        assert_eq!(tiles[8], AABB::new(matrix![4, 4; 6, 6]));
        assert!(is_partition(&aabb, &tiles));
    }

    #[test]
    fn decompose_offset_box_test() {
        let aabb = AABB::new(matrix![3, 9; 5, 5]);
        let tiles = decompose(&aabb, &vector![4, 4]);
        assert_eq!(
            tiles,
            vec![
                AABB::new(matrix![3, 6; 5, 5]),
                AABB::new(matrix![7, 9; 5, 5]),
            ]
        );
    }

    #[test]
    fn is_partition_test() {
        let aabb = AABB::new(matrix![0, 9]);
        let gap = [AABB::new(matrix![0, 3]), AABB::new(matrix![5, 9])];
        assert!(!is_partition(&aabb, &gap));
        let overlap = [AABB::new(matrix![0, 5]), AABB::new(matrix![5, 9])];
        assert!(!is_partition(&aabb, &overlap));
        let outside = [AABB::new(matrix![0, 10])];
        assert!(!is_partition(&aabb, &outside));
    }

    #[test]
    fn tile_plan_1d_test() {
        let aabb = AABB::new(matrix![0, 9]);
        let plan = TilePlan::new(aabb, 4, 32);
        assert_eq!(plan.tiles().len(), 3);
        for tile in plan.tiles() {
            assert_eq!(tile.sub_tiles, vec![tile.aabb]);
        }
        assert_eq!(plan.tiles()[2].aabb, AABB::new(matrix![8, 9]));
        assert!(is_partition(&aabb, &plan.outer_tiles()));
    }

    #[test]
    fn tile_plan_2d_test() {
        let aabb = AABB::cube(10);
        let plan = TilePlan::<2>::new(aabb, 4, 3);
        assert_eq!(
            plan.outer_tiles(),
            vec![
                AABB::new(matrix![0, 3; 0, 9]),
                AABB::new(matrix![4, 7; 0, 9]),
                AABB::new(matrix![8, 9; 0, 9]),
            ]
        );
        let first = &plan.tiles()[0];
        assert_eq!(first.sub_tiles.len(), 4);
        assert_eq!(first.sub_tiles[3], AABB::new(matrix![0, 3; 9, 9]));
        assert!(is_partition(&aabb, &plan.outer_tiles()));
        assert!(is_partition(&aabb, &plan.sub_tiles()));
    }

    #[test]
    fn oversized_block_test() {
        let aabb = AABB::cube(6);
        for block_size in [7, 1usize << 32, (1usize << 32) + 2, usize::MAX] {
            let plan = TilePlan::<2>::new(aabb, block_size, block_size);
            assert_eq!(plan.outer_tiles(), vec![aabb]);
            assert_eq!(plan.sub_tiles(), vec![aabb]);

            let line = AABB::new(matrix![0, 4]);
            let plan = TilePlan::<1>::new(line, block_size, 1);
            assert_eq!(plan.outer_tiles(), vec![line]);
        }
    }

    #[test]
    fn split_tiles_mut_test() {
        let aabb = AABB::cube(5);
        let plan = TilePlan::<2>::new(aabb, 2, 2);
        let mut buffer: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let pieces = split_tiles_mut(&aabb, plan.tiles(), &mut buffer);
        let lengths: Vec<usize> = pieces.iter().map(|(_, b)| b.len()).collect();
        assert_eq!(lengths, vec![10, 10, 5]);
        assert_eq!(pieces[1].1[0], 10.0);
        assert_eq!(pieces[2].0.aabb, AABB::new(matrix![4, 4; 0, 4]));
    }
}
