mod naive;
mod simulation;
mod tiled;

pub use naive::*;
pub use simulation::*;
pub use tiled::*;

use crate::domain::*;
use clap::ValueEnum;

/// A single timestep update of a grid.
pub trait SolverInterface<const GRID_DIMENSION: usize>: Sync {
    /// Write generation `global_time + 1` into `output` from `input`.
    /// `input` is only read, every cell of `output` is written.
    fn step<DomainType: DomainView<GRID_DIMENSION>>(
        &self,
        input: &DomainType,
        output: &mut DomainType,
        global_time: usize,
    );

    fn name(&self) -> &'static str;
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ExecutionMode {
    Naive,
    #[default]
    Tiled,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Naive => write!(f, "naive"),
            ExecutionMode::Tiled => write!(f, "tiled"),
        }
    }
}
