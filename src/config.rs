//! Run configuration.
//!
//! A `SolverConfig` is fixed before a run starts and never changes
//! while it executes. `validate` rejects bad values instead of clamping.

use crate::boundary::BoundaryKind;
use crate::error::ConfigError;
use crate::initial_conditions::ICType;
use crate::stencil::standard_stencils::*;
use clap::ValueEnum;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_BASE: u32 = 1024;
pub const DEFAULT_BLOCK_SIZE_1D: usize = 2048;
pub const DEFAULT_BLOCK_SIZE_2D: usize = 1024;
pub const DEFAULT_INNER_BLOCK_SIZE: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Cells along every axis, `N`.
    pub extent: usize,

    /// Timesteps in a full run, `T`.
    pub steps: usize,

    pub seed: u64,

    /// Initial values are drawn from `[0, base)`.
    pub base: u32,

    pub boundary: BoundaryKind,

    /// Outer tile size, the unit of parallel work.
    pub block_size: usize,

    /// Column sub-tile size inside a 2D outer tile.
    pub inner_block_size: usize,

    /// `k` in the timestep coefficient `exp(-k * t)`.
    pub decay_rate: f64,

    /// Size of a dedicated worker pool, `None` uses the global pool.
    pub threads: Option<usize>,

    /// Overrides the seeded random fill of generation 0.
    pub initial_condition: Option<ICType>,
}

impl SolverConfig {
    pub fn new_1d(extent: usize, steps: usize) -> Self {
        SolverConfig {
            extent,
            steps,
            seed: DEFAULT_SEED,
            base: DEFAULT_BASE,
            boundary: BoundaryKind::NonPeriodic,
            block_size: DEFAULT_BLOCK_SIZE_1D,
            inner_block_size: DEFAULT_INNER_BLOCK_SIZE,
            decay_rate: HEAT_1D_DECAY_RATE,
            threads: None,
            initial_condition: None,
        }
    }

    pub fn new_2d(extent: usize, steps: usize) -> Self {
        SolverConfig {
            block_size: DEFAULT_BLOCK_SIZE_2D,
            decay_rate: HEAT_2D_DECAY_RATE,
            ..Self::new_1d(extent, steps)
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryKind) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_inner_block_size(mut self, inner_block_size: usize) -> Self {
        self.inner_block_size = inner_block_size;
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_initial_condition(mut self, ic: ICType) -> Self {
        self.initial_condition = Some(ic);
        self
    }

    /// What generation 0 is filled with.
    pub fn ic_type(&self) -> ICType {
        self.initial_condition.unwrap_or(ICType::Rand {
            seed: self.seed,
            base: self.base,
        })
    }

    /// Reject configurations no run can start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extent == 0 {
            return Err(ConfigError::ZeroExtent);
        }
        if i32::try_from(self.extent).is_err() {
            return Err(ConfigError::ExtentTooLarge {
                extent: self.extent,
            });
        }
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize { which: "outer" });
        }
        if self.inner_block_size == 0 {
            return Err(ConfigError::ZeroBlockSize { which: "inner" });
        }
        if self.base == 0 {
            return Err(ConfigError::ZeroBase);
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(ConfigError::InvalidDecayRate {
                rate: self.decay_rate,
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

/// Configurations of the original benchmark runs.
/// The two 1D runs use different timestep counts, so a naive and a tiled
/// run are only comparable when built from one explicit config.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Preset {
    #[value(name = "heat-1d-nonperiodic")]
    Heat1DNonPeriodic,
    #[value(name = "heat-1d-periodic")]
    Heat1DPeriodic,
    #[value(name = "heat-2d-nonperiodic")]
    Heat2DNonPeriodic,
    #[value(name = "heat-2d-periodic")]
    Heat2DPeriodic,
}

impl Preset {
    pub fn grid_dimension(&self) -> usize {
        match self {
            Preset::Heat1DNonPeriodic | Preset::Heat1DPeriodic => 1,
            Preset::Heat2DNonPeriodic | Preset::Heat2DPeriodic => 2,
        }
    }

    pub fn config(&self) -> SolverConfig {
        match self {
            Preset::Heat1DNonPeriodic => {
                SolverConfig::new_1d(1_600_000, 1_000_000)
            }
            Preset::Heat1DPeriodic => SolverConfig::new_1d(1_600_000, 3_000_000)
                .with_boundary(BoundaryKind::Periodic),
            Preset::Heat2DNonPeriodic => SolverConfig::new_2d(32_768, 32_768),
            Preset::Heat2DPeriodic => SolverConfig::new_2d(8_000, 1_000)
                .with_boundary(BoundaryKind::Periodic),
        }
    }
}
