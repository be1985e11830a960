use crate::boundary::*;
use crate::domain::*;
use crate::solver::SolverInterface;
use crate::stencil::*;
use crate::tiling::*;
use rayon::prelude::*;

/// Cache blocked parallel solver.
///
/// Each timestep the destination buffer is split into one slice per outer
/// tile and the slices are processed in parallel. A tile reads only the
/// source generation and writes only its own slice, so no locking is
/// needed. The parallel loop returns once every tile is done, which is
/// the barrier between timesteps.
///
/// Neighbors are accumulated in the same order as `NaiveSolver`,
/// so both produce the same values.
pub struct TiledSolver<'a, StencilType, BC, const GRID_DIMENSION: usize>
where
    StencilType: TVStencil<GRID_DIMENSION>,
    BC: BoundaryPolicy,
{
    stencil: &'a StencilType,
    bc: BC,
    plan: TilePlan<GRID_DIMENSION>,
    zero_row: Vec<f64>,
}

impl<'a, StencilType, BC, const GRID_DIMENSION: usize>
    TiledSolver<'a, StencilType, BC, GRID_DIMENSION>
where
    StencilType: TVStencil<GRID_DIMENSION>,
    BC: BoundaryPolicy,
{
    pub fn new(
        stencil: &'a StencilType,
        bc: BC,
        plan: TilePlan<GRID_DIMENSION>,
    ) -> Self {
        debug_assert_eq!(
            stencil.offsets(),
            HeatStencil::<GRID_DIMENSION>::new(0.0).offsets(),
            "tiled kernels expect -e0, +e0, -e1, +e1 neighbor order"
        );
        let zero_row = if GRID_DIMENSION > 1 {
            let row_len = plan.aabb().exclusive_bounds()[GRID_DIMENSION - 1];
            vec![0.0; row_len as usize]
        } else {
            Vec::new()
        };
        log::debug!(
            "TiledSolver: {} outer tiles, {} sub-tiles over {}",
            plan.tiles().len(),
            plan.sub_tiles().len(),
            plan.aabb()
        );
        TiledSolver {
            stencil,
            bc,
            plan,
            zero_row,
        }
    }

    pub fn plan(&self) -> &TilePlan<GRID_DIMENSION> {
        &self.plan
    }

    fn dispatch<F>(&self, output: &mut [f64], f: F)
    where
        F: Fn(&OuterTile<GRID_DIMENSION>, &mut [f64]) + Send + Sync,
    {
        split_tiles_mut(self.plan.aabb(), self.plan.tiles(), output)
            .into_par_iter()
            .for_each(|(tile, tile_output)| {
                profiling::scope!("tiled_solver: Thread Callback");
                f(tile, tile_output);
            });
    }

    /// Neighbor of `row` in `direction`, or the shared zero row when the
    /// policy has none.
    #[inline]
    fn neighbor_row<'b>(
        &'b self,
        ib: &'b [f64],
        row: usize,
        direction: Direction,
        rows: usize,
        row_len: usize,
    ) -> &'b [f64] {
        match self.bc.neighbor_index(row, direction, rows) {
            Some(n) => &ib[n * row_len..(n + 1) * row_len],
            None => &self.zero_row,
        }
    }
}

/// Backward and forward neighbors of `line[i]`.
/// Only the two ends of a line go through the boundary policy.
#[inline]
fn line_neighbors<BC: BoundaryPolicy>(
    bc: &BC,
    line: &[f64],
    i: usize,
) -> (f64, f64) {
    if i > 0 && i + 1 < line.len() {
        (line[i - 1], line[i + 1])
    } else {
        (
            bc.neighbor_value(line, i, Direction::Backward),
            bc.neighbor_value(line, i, Direction::Forward),
        )
    }
}

impl<StencilType, BC> SolverInterface<1> for TiledSolver<'_, StencilType, BC, 1>
where
    StencilType: TVStencil<1>,
    BC: BoundaryPolicy,
{
    fn step<DomainType: DomainView<1>>(
        &self,
        input: &DomainType,
        output: &mut DomainType,
        global_time: usize,
    ) {
        debug_assert_eq!(input.aabb(), self.plan.aabb());
        debug_assert_eq!(output.aabb(), self.plan.aabb());
        profiling::scope!("tiled_solver: step");
        let w = self.stencil.weights(global_time);
        let ib = input.buffer();
        let origin = self.plan.aabb().min()[0];
        self.dispatch(output.buffer_mut(), |tile, tile_output| {
            let start = (tile.aabb.min()[0] - origin) as usize;
            for (j, value) in tile_output.iter_mut().enumerate() {
                let i = start + j;
                let (left, right) = line_neighbors(&self.bc, ib, i);
                *value = self.stencil.apply(&w, &[left, right], ib[i]);
            }
        });
    }

    fn name(&self) -> &'static str {
        "tiled"
    }
}

impl<StencilType, BC> SolverInterface<2> for TiledSolver<'_, StencilType, BC, 2>
where
    StencilType: TVStencil<2>,
    BC: BoundaryPolicy,
{
    fn step<DomainType: DomainView<2>>(
        &self,
        input: &DomainType,
        output: &mut DomainType,
        global_time: usize,
    ) {
        debug_assert_eq!(input.aabb(), self.plan.aabb());
        debug_assert_eq!(output.aabb(), self.plan.aabb());
        profiling::scope!("tiled_solver: step");
        let w = self.stencil.weights(global_time);
        let ib = input.buffer();
        let origin = self.plan.aabb().min();
        let exclusive_bounds = self.plan.aabb().exclusive_bounds();
        let rows = exclusive_bounds[0] as usize;
        let row_len = exclusive_bounds[1] as usize;
        self.dispatch(output.buffer_mut(), |tile, tile_output| {
            let first_row = (tile.aabb.min()[0] - origin[0]) as usize;
            for sub_tile in &tile.sub_tiles {
                let min = sub_tile.min() - origin;
                let max = sub_tile.max() - origin;
                let columns = min[1] as usize..=max[1] as usize;
                for r in min[0] as usize..=max[0] as usize {
                    let center = &ib[r * row_len..(r + 1) * row_len];
                    let up = self.neighbor_row(
                        ib,
                        r,
                        Direction::Backward,
                        rows,
                        row_len,
                    );
                    let down = self.neighbor_row(
                        ib,
                        r,
                        Direction::Forward,
                        rows,
                        row_len,
                    );
                    let local = r - first_row;
                    let out_row = &mut tile_output
                        [local * row_len..(local + 1) * row_len];
                    for c in columns.clone() {
                        let (left, right) = line_neighbors(&self.bc, center, c);
                        out_row[c] = self.stencil.apply(
                            &w,
                            &[up[c], down[c], left, right],
                            center[c],
                        );
                    }
                }
            }
        });
    }

    fn name(&self) -> &'static str {
        "tiled"
    }
}
