//! Crate-level error types.
//!
//! Every error here is raised while setting a run up.
//! Once the timestep loop has started it always runs to completion.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid extent must be positive")]
    ZeroExtent,

    #[error("grid extent {extent} does not fit in an i32 coordinate")]
    ExtentTooLarge { extent: usize },

    #[error("timestep count must be positive")]
    ZeroSteps,

    #[error("{which} block size must be positive")]
    ZeroBlockSize { which: &'static str },

    #[error("random value base must be positive")]
    ZeroBase,

    #[error("decay rate must be finite and non-negative, got {rate}")]
    InvalidDecayRate { rate: f64 },

    #[error("thread count must be positive")]
    ZeroThreads,

    #[error("unsupported boundary policy: {0:?}")]
    UnsupportedBoundary(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to allocate a generation of {cells} cells")]
    Allocation {
        cells: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    #[error("a grid of extents {extents:?} has more cells than a usize holds")]
    SizeOverflow { extents: Vec<i32> },

    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
