use crate::boundary::*;
use crate::domain::*;
use crate::solver::SolverInterface;
use crate::stencil::*;

/// Reference solver.
/// Visits every cell in linear order on the calling thread and gathers
/// each neighbor through the boundary policy. Works in any dimension and
/// is bit reproducible, the other solvers are checked against it.
pub struct NaiveSolver<'a, StencilType, BC, const GRID_DIMENSION: usize>
where
    StencilType: TVStencil<GRID_DIMENSION>,
    BC: BoundaryPolicy,
{
    stencil: &'a StencilType,
    bc: BC,
}

impl<'a, StencilType, BC, const GRID_DIMENSION: usize>
    NaiveSolver<'a, StencilType, BC, GRID_DIMENSION>
where
    StencilType: TVStencil<GRID_DIMENSION>,
    BC: BoundaryPolicy,
{
    pub fn new(stencil: &'a StencilType, bc: BC) -> Self {
        NaiveSolver { stencil, bc }
    }

    pub fn apply_step<DomainType: DomainView<GRID_DIMENSION>>(
        &self,
        input: &DomainType,
        output: &mut DomainType,
        global_time: usize,
    ) {
        debug_assert_eq!(input.aabb(), output.aabb());
        profiling::scope!("naive_solver: step");
        let aabb = *input.aabb();
        let offsets = self.stencil.offsets();
        let w = self.stencil.weights(global_time);
        let ib = input.buffer();
        let mut args = vec![0.0; offsets.len()];
        for (i, value) in output.buffer_mut().iter_mut().enumerate() {
            let coord = aabb.linear_to_coord(i);
            for (arg, offset) in args.iter_mut().zip(offsets) {
                *arg = self.bc.neighbor(input, &coord, offset);
            }
            *value = self.stencil.apply(&w, &args, ib[i]);
        }
    }
}

impl<StencilType, BC, const GRID_DIMENSION: usize>
    SolverInterface<GRID_DIMENSION>
    for NaiveSolver<'_, StencilType, BC, GRID_DIMENSION>
where
    StencilType: TVStencil<GRID_DIMENSION>,
    BC: BoundaryPolicy,
{
    fn step<DomainType: DomainView<GRID_DIMENSION>>(
        &self,
        input: &DomainType,
        output: &mut DomainType,
        global_time: usize,
    ) {
        self.apply_step(input, output, global_time);
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}
