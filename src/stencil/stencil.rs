use crate::util::*;

/// Time varying coefficient of the heat stencil, `exp(-rate * t)`.
#[inline]
pub fn decay(rate: f64, global_time: usize) -> f64 {
    (-rate * global_time as f64).exp()
}

/// Weights of one timestep.
/// Every neighbor shares `neighbor`, the cell itself gets `center`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeatWeights {
    pub neighbor: f64,
    pub center: f64,
}

impl HeatWeights {
    /// Sum of all weights for a stencil with `neighbors` neighbors.
    pub fn total(&self, neighbors: usize) -> f64 {
        self.neighbor * neighbors as f64 + self.center
    }
}

/// Explicit heat stencil over the direct neighbors of a cell,
/// whose weights decay with the global timestep.
///
/// For coefficient `c = decay(rate, t)` each of the `2 * GRID_DIMENSION`
/// neighbors is weighted `c / (2 * GRID_DIMENSION)` and the center
/// `1 - c`. For `rate >= 0` the weights are non-negative and sum to one.
#[derive(Clone, Debug)]
pub struct HeatStencil<const GRID_DIMENSION: usize> {
    decay_rate: f64,
    offsets: Vec<Coord<GRID_DIMENSION>>,
}

impl<const GRID_DIMENSION: usize> HeatStencil<GRID_DIMENSION> {
    /// Offsets are ordered `-e_0, +e_0, -e_1, +e_1, ...`,
    /// solvers accumulate neighbors in this order.
    pub fn new(decay_rate: f64) -> Self {
        let mut offsets = Vec::with_capacity(2 * GRID_DIMENSION);
        for d in 0..GRID_DIMENSION {
            for step in [-1, 1] {
                let mut offset = Coord::zero();
                offset[d] = step;
                offsets.push(offset);
            }
        }
        HeatStencil {
            decay_rate,
            offsets,
        }
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn offsets(&self) -> &[Coord<GRID_DIMENSION>] {
        &self.offsets
    }

    pub fn weights(&self, global_time: usize) -> HeatWeights {
        let c = decay(self.decay_rate, global_time);
        HeatWeights {
            neighbor: c / self.offsets.len() as f64,
            center: 1.0 - c,
        }
    }

    /// Multiplies and adds spent on one cell update.
    pub fn flops_per_cell(&self) -> usize {
        2 * self.offsets.len() + 1
    }

    /// Apply the weights to gathered neighbor values.
    /// `args` follows `offsets()` order.
    #[inline]
    pub fn apply(
        &self,
        weights: &HeatWeights,
        args: &[f64],
        center: f64,
    ) -> f64 {
        debug_assert_eq!(args.len(), self.offsets.len());
        let mut args_iter = args.iter();
        let first = args_iter.next().map_or(0.0, |a| weights.neighbor * a);
        args_iter.fold(first, |acc, a| acc + weights.neighbor * a)
            + weights.center * center
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn decay_test() {
        assert_approx_eq!(f64, decay(0.01, 0), 1.0);
        assert_approx_eq!(f64, decay(0.01, 100), (-1.0f64).exp(), ulps = 2);
        assert_approx_eq!(f64, decay(0.0, 12345), 1.0);
    }

    #[test]
    fn offsets_test() {
        let s = HeatStencil::<1>::new(0.01);
        assert_eq!(s.offsets(), &[vector![-1], vector![1]]);

        let s = HeatStencil::<2>::new(0.001);
        assert_eq!(
            s.offsets(),
            &[vector![-1, 0], vector![1, 0], vector![0, -1], vector![0, 1]]
        );
    }

    #[test]
    fn weights_test() {
        {
            let s = HeatStencil::<1>::new(0.01);
            let w = s.weights(0);
            assert_approx_eq!(f64, w.neighbor, 0.5);
            assert_approx_eq!(f64, w.center, 0.0);
            for t in [1, 10, 1000, 100000] {
                let w = s.weights(t);
                assert!(w.neighbor >= 0.0 && w.center >= 0.0);
                assert_approx_eq!(f64, w.total(2), 1.0, ulps = 4);
            }
        }

        {
            let s = HeatStencil::<2>::new(0.001);
            let w = s.weights(0);
            assert_approx_eq!(f64, w.neighbor, 0.25);
            assert_approx_eq!(f64, w.center, 0.0);
            let w = s.weights(500);
            assert_approx_eq!(f64, w.neighbor, (-0.5f64).exp() / 4.0);
            assert_approx_eq!(f64, w.total(4), 1.0, ulps = 4);
        }
    }

    #[test]
    fn apply_test() {
        let s = HeatStencil::<1>::new(0.01);
        let w = s.weights(0);
        assert_approx_eq!(f64, s.apply(&w, &[2.0, 4.0], 100.0), 3.0);

        let w = HeatWeights {
            neighbor: 0.25,
            center: 0.5,
        };
        assert_approx_eq!(f64, s.apply(&w, &[2.0, 4.0], 10.0), 6.5);
        assert_eq!(s.flops_per_cell(), 5);
        assert_eq!(HeatStencil::<2>::new(0.1).flops_per_cell(), 9);
    }
}
