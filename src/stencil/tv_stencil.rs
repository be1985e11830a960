use crate::stencil::*;
use crate::util::*;

/// A linear stencil whose weights depend on the global timestep.
pub trait TVStencil<const GRID_DIMENSION: usize>: Sync {
    fn weights(&self, global_time: usize) -> HeatWeights;

    fn offsets(&self) -> &[Coord<GRID_DIMENSION>];

    /// Combine neighbor values (in `offsets()` order) with the center.
    fn apply(&self, weights: &HeatWeights, args: &[f64], center: f64) -> f64;
}

impl<const GRID_DIMENSION: usize> TVStencil<GRID_DIMENSION>
    for HeatStencil<GRID_DIMENSION>
{
    fn weights(&self, global_time: usize) -> HeatWeights {
        self.weights(global_time)
    }

    fn offsets(&self) -> &[Coord<GRID_DIMENSION>] {
        self.offsets()
    }

    fn apply(&self, weights: &HeatWeights, args: &[f64], center: f64) -> f64 {
        self.apply(weights, args, center)
    }
}
