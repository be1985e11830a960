#![allow(clippy::module_inception)]
mod stencil;
mod tv_stencil;

pub mod standard_stencils;

pub use standard_stencils::*;
pub use stencil::*;
pub use tv_stencil::*;
