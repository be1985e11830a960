pub mod boundary;
pub mod build_info;
pub mod config;
pub mod domain;
pub mod error;
pub mod image;
pub mod initial_conditions;
pub mod report;
pub mod solver;
pub mod stencil;
pub mod tiling;
pub mod util;

pub use error::{ConfigError, Error, Result};
