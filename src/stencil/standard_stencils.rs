use crate::stencil::*;

/// Decay rate used by the 1D experiments.
pub const HEAT_1D_DECAY_RATE: f64 = 0.01;

/// Decay rate used by the 2D experiments.
pub const HEAT_2D_DECAY_RATE: f64 = 0.001;

pub fn heat_1d(decay_rate: f64) -> HeatStencil<1> {
    HeatStencil::new(decay_rate)
}

pub fn heat_2d(decay_rate: f64) -> HeatStencil<2> {
    HeatStencil::new(decay_rate)
}
