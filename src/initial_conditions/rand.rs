use crate::domain::*;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Fill with integers in `[0, base)` drawn in linear order from a
/// generator seeded with `seed`. Filling is sequential so the result
/// does not depend on the thread count.
pub fn rand_ic<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    domain: &mut DomainType,
    seed: u64,
    base: u32,
) {
    debug_assert!(base > 0);
    let mut rng = StdRng::seed_from_u64(seed);
    for value_mut in domain.buffer_mut() {
        *value_mut = rng.gen_range(0..base) as f64;
    }
}
