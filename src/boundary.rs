//! Boundary policies decide what a stencil sees past the grid edge.
//! Every solver resolves edge neighbors through `BoundaryPolicy`.

use crate::domain::*;
use crate::error::ConfigError;
use crate::util::*;
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// Direction of a unit step along an axis, `None` for zero.
    pub fn from_step(step: i32) -> Option<Self> {
        debug_assert!(step.abs() <= 1, "only unit offsets are supported");
        match step.signum() {
            -1 => Some(Direction::Backward),
            1 => Some(Direction::Forward),
            _ => None,
        }
    }
}

pub trait BoundaryPolicy: Copy + Send + Sync {
    /// Index of the neighbor of `index` along an axis with `extent` cells,
    /// or `None` if that neighbor lies outside the grid.
    fn neighbor_index(
        &self,
        index: usize,
        direction: Direction,
        extent: usize,
    ) -> Option<usize>;

    /// Neighbor value within a single contiguous line of cells.
    #[inline]
    fn neighbor_value(
        &self,
        line: &[f64],
        index: usize,
        direction: Direction,
    ) -> f64 {
        self.neighbor_index(index, direction, line.len())
            .map_or(0.0, |i| line[i])
    }

    /// World coordinate of `coord + offset`, resolved against `aabb`.
    /// `offset` must be a unit step along any number of axes.
    fn neighbor_coord<const GRID_DIMENSION: usize>(
        &self,
        coord: &Coord<GRID_DIMENSION>,
        offset: &Coord<GRID_DIMENSION>,
        aabb: &AABB<GRID_DIMENSION>,
    ) -> Option<Coord<GRID_DIMENSION>> {
        let exclusive_bounds = aabb.exclusive_bounds();
        let min = aabb.min();
        let mut result = *coord;
        for d in 0..GRID_DIMENSION {
            let Some(direction) = Direction::from_step(offset[d]) else {
                continue;
            };
            let local = (coord[d] - min[d]) as usize;
            let n = self.neighbor_index(
                local,
                direction,
                exclusive_bounds[d] as usize,
            )?;
            result[d] = min[d] + n as i32;
        }
        Some(result)
    }

    /// Value seen at `coord + offset`.
    fn neighbor<const GRID_DIMENSION: usize, DomainType>(
        &self,
        domain: &DomainType,
        coord: &Coord<GRID_DIMENSION>,
        offset: &Coord<GRID_DIMENSION>,
    ) -> f64
    where
        DomainType: DomainView<GRID_DIMENSION>,
    {
        self.neighbor_coord(coord, offset, domain.aabb())
            .map_or(0.0, |c| domain.view(&c))
    }
}

/// Out of range neighbors wrap to the opposite edge.
#[derive(Copy, Clone, Debug, Default)]
pub struct Periodic;

impl BoundaryPolicy for Periodic {
    #[inline]
    fn neighbor_index(
        &self,
        index: usize,
        direction: Direction,
        extent: usize,
    ) -> Option<usize> {
        debug_assert!(index < extent);
        Some(match direction {
            Direction::Backward if index == 0 => extent - 1,
            Direction::Backward => index - 1,
            Direction::Forward if index + 1 == extent => 0,
            Direction::Forward => index + 1,
        })
    }
}

/// Out of range neighbors read as zero (Dirichlet zero).
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroPadded;

impl BoundaryPolicy for ZeroPadded {
    #[inline]
    fn neighbor_index(
        &self,
        index: usize,
        direction: Direction,
        extent: usize,
    ) -> Option<usize> {
        debug_assert!(index < extent);
        match direction {
            Direction::Backward => index.checked_sub(1),
            Direction::Forward => Some(index + 1).filter(|i| *i < extent),
        }
    }
}

/// Configuration side choice of boundary policy.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum BoundaryKind {
    Periodic,
    #[default]
    #[value(aliases = ["aperiodic", "zero"])]
    NonPeriodic,
}

impl std::str::FromStr for BoundaryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "periodic" => Ok(BoundaryKind::Periodic),
            "nonperiodic" | "non-periodic" | "aperiodic" | "zero" => {
                Ok(BoundaryKind::NonPeriodic)
            }
            _ => Err(ConfigError::UnsupportedBoundary(s.to_string())),
        }
    }
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryKind::Periodic => write!(f, "periodic"),
            BoundaryKind::NonPeriodic => write!(f, "nonperiodic"),
        }
    }
}
