//! Observers of a finished run, neither ever mutates the grid.

use std::time::{Duration, Instant};

/// Summary statistics of a grid used to compare runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Verification {
    pub sum: f64,

    /// Root mean square deviation from the mean.
    pub rms: f64,

    /// Sum of every byte of the buffer read as a signed integer.
    /// Sensitive to single bit differences, not to tolerance.
    pub checksum: i64,
}

impl Verification {
    pub fn new(values: &[f64]) -> Self {
        let sum: f64 = values.iter().sum();
        let mean = if values.is_empty() {
            0.0
        } else {
            sum / values.len() as f64
        };
        let sum_err_sqr: f64 =
            values.iter().map(|v| (v - mean) * (v - mean)).sum();
        let rms = if values.is_empty() {
            0.0
        } else {
            (sum_err_sqr / values.len() as f64).sqrt()
        };
        let bytes: &[i8] = bytemuck::cast_slice(values);
        let checksum = bytes.iter().map(|b| *b as i64).sum();
        Verification { sum, rms, checksum }
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sum: {:e}, rms: {:.2}, checksum: {}",
            self.sum, self.rms, self.checksum
        )
    }
}

/// Wall clock around a timestep loop.
#[derive(Copy, Clone, Debug)]
pub struct RunTiming {
    pub start: Instant,
    pub end: Instant,
    pub steps: usize,
}

impl RunTiming {
    pub fn elapsed(&self) -> Duration {
        self.end.duration_since(self.start)
    }

    /// Millions of floating point operations per second over the run.
    pub fn mflops(&self, cells: usize, flops_per_cell: usize) -> f64 {
        let seconds = self.elapsed().as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        (cells * flops_per_cell) as f64 * self.steps as f64 / seconds / 1.0e6
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn verification_test() {
        let v = Verification::new(&[1.0, 2.0, 3.0, 4.0]);
        assert_approx_eq!(f64, v.sum, 10.0);
        assert_approx_eq!(f64, v.rms, 1.25f64.sqrt());

        let constant = Verification::new(&[5.0; 16]);
        assert_approx_eq!(f64, constant.rms, 0.0);

        let empty = Verification::new(&[]);
        assert_eq!(empty.sum, 0.0);
        assert_eq!(empty.rms, 0.0);
        assert_eq!(empty.checksum, 0);
    }

    #[test]
    fn checksum_test() {
        // 1.0 is 0x3FF0_0000_0000_0000, bytes 0xF0 and 0x3F
        let v = Verification::new(&[1.0]);
        assert_eq!(v.checksum, 0x3F - 0x10);
        assert_eq!(Verification::new(&[0.0; 8]).checksum, 0);
        assert_ne!(
            Verification::new(&[1.0]).checksum,
            Verification::new(&[f64::from_bits(1.0f64.to_bits() + 1)]).checksum
        );
    }

    #[test]
    fn timing_test() {
        let start = Instant::now();
        let timing = RunTiming {
            start,
            end: start + Duration::from_secs(2),
            steps: 10,
        };
        assert_eq!(timing.elapsed(), Duration::from_secs(2));
        let expected = 1000.0 * 5.0 * 10.0 / 2.0 / 1.0e6;
        assert_approx_eq!(f64, timing.mflops(1000, 5), expected);

        let instant = RunTiming {
            start,
            end: start,
            steps: 10,
        };
        assert_eq!(instant.mflops(1000, 5), 0.0);
    }
}
