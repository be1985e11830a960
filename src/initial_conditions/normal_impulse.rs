use crate::domain::*;
use crate::util::*;

/// Generate normal like distribution over bound with spike in the middle,
/// all values are in [0, 1].
pub fn normal_ic<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    domain: &mut DomainType,
    variance: f64,
    chunk_size: usize,
) {
    let exclusive_bounds = domain.aabb().exclusive_bounds();
    let min = domain.aabb().min();
    let width_f = exclusive_bounds[0] as f64;
    let sigma_sq: f64 = (width_f / variance) * (width_f / variance);
    let ic_gen = |coord: Coord<GRID_DIMENSION>| {
        let mut r_sq = 0.0;
        for d in 0..GRID_DIMENSION {
            let x = (coord[d] - min[d]) as f64
                - (exclusive_bounds[d] as f64 / 2.0);
            r_sq += x * x;
        }
        (-r_sq / (2.0 * sigma_sq)).exp()
    };
    domain.par_set_values(ic_gen, chunk_size);
}
