mod normal_impulse;
mod rand;

pub use self::normal_impulse::*;
pub use self::rand::*;

use crate::domain::*;
use clap::ValueEnum;

/// How generation 0 of a run is filled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ICType {
    Zero,
    /// Integers drawn uniformly from `[0, base)`, reproducible from `seed`.
    Rand { seed: u64, base: u32 },
    /// Normal like spike in the middle of the grid, values in `[0, 1]`.
    Impulse { variance: f64 },
}

#[derive(Copy, Clone, Debug, ValueEnum, Default, Eq, PartialEq)]
pub enum ClapICType {
    #[default]
    Rand,
    Impulse,
    Zero,
}

impl ClapICType {
    /// `dial` is the impulse variance, ignored for the other kinds.
    pub fn to_ic_type(&self, seed: u64, base: u32, dial: f64) -> ICType {
        match self {
            ClapICType::Zero => ICType::Zero,
            ClapICType::Rand => ICType::Rand { seed, base },
            ClapICType::Impulse => ICType::Impulse { variance: dial },
        }
    }
}

pub fn generate_ic<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    domain: &mut DomainType,
    ic_type: ICType,
    chunk_size: usize,
) {
    match ic_type {
        ICType::Zero => domain.buffer_mut().fill(0.0),
        ICType::Rand { seed, base } => rand_ic(domain, seed, base),
        ICType::Impulse { variance } => {
            normal_ic(domain, variance, chunk_size)
        }
    }
}
