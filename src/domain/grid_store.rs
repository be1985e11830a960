use crate::config::SolverConfig;
use crate::domain::*;
use crate::error::Result;
use crate::initial_conditions::*;
use crate::util::*;

/// The two generations of a run.
/// At timestep `t` generation `t % 2` is authoritative and
/// generation `(t + 1) % 2` is written.
pub struct GridStore<const GRID_DIMENSION: usize> {
    generations: [OwnedDomain<GRID_DIMENSION>; 2],
}

impl<const GRID_DIMENSION: usize> GridStore<GRID_DIMENSION> {
    /// Allocate both generations over `aabb`, both zero filled.
    pub fn try_new(aabb: AABB<GRID_DIMENSION>) -> Result<Self> {
        let first = OwnedDomain::try_new(aabb)?;
        let second = OwnedDomain::try_new(aabb)?;
        log::debug!(
            "GridStore: allocated 2 x {} cells over {}",
            aabb.buffer_size(),
            aabb
        );
        Ok(GridStore {
            generations: [first, second],
        })
    }

    /// Allocate and fill generation 0 with integers in `[0, base)`
    /// drawn from `seed`.
    pub fn initialize(
        aabb: AABB<GRID_DIMENSION>,
        seed: u64,
        base: u32,
    ) -> Result<Self> {
        let mut result = Self::try_new(aabb)?;
        rand_ic(&mut result.generations[0], seed, base);
        Ok(result)
    }

    /// Store for an already validated config.
    pub fn from_config(config: &SolverConfig) -> Result<Self> {
        let aabb = AABB::cube(config.extent as i32);
        let mut result = Self::try_new(aabb)?;
        generate_ic(&mut result.generations[0], config.ic_type(), 4096);
        Ok(result)
    }

    pub fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        self.generations[0].aabb()
    }

    /// Generation read at timestep `global_time`.
    #[inline]
    pub fn current(global_time: usize) -> usize {
        global_time % 2
    }

    /// Generation written at timestep `global_time`.
    #[inline]
    pub fn next(global_time: usize) -> usize {
        (global_time + 1) % 2
    }

    pub fn generation(&self, index: usize) -> &OwnedDomain<GRID_DIMENSION> {
        &self.generations[index]
    }

    /// Source and destination of timestep `global_time`.
    pub fn split(
        &mut self,
        global_time: usize,
    ) -> (
        &OwnedDomain<GRID_DIMENSION>,
        &mut OwnedDomain<GRID_DIMENSION>,
    ) {
        let [even, odd] = &mut self.generations;
        if Self::current(global_time) == 0 {
            (&*even, odd)
        } else {
            (&*odd, even)
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn parity_test() {
        assert_eq!(GridStore::<1>::current(0), 0);
        assert_eq!(GridStore::<1>::next(0), 1);
        assert_eq!(GridStore::<1>::current(7), 1);
        assert_eq!(GridStore::<1>::next(7), 0);
    }

    #[test]
    fn initialize_test() {
        let aabb = AABB::new(matrix![0, 99]);
        let store = GridStore::initialize(aabb, 42, 10).unwrap();
        assert!(store
            .generation(0)
            .buffer()
            .iter()
            .all(|v| (0.0..10.0).contains(v)));
        assert!(store.generation(1).buffer().iter().all(|v| *v == 0.0));

        let again = GridStore::initialize(aabb, 42, 10).unwrap();
        assert_eq!(store.generation(0).buffer(), again.generation(0).buffer());
    }

    #[test]
    fn split_test() {
        let aabb = AABB::new(matrix![0, 3; 0, 3]);
        let mut store = GridStore::try_new(aabb).unwrap();
        store.split(1).1.buffer_mut().fill(1.0);
        store.split(0).1.buffer_mut().fill(2.0);
        {
            let (input, output) = store.split(4);
            assert_eq!(input.buffer()[0], 1.0);
            assert_eq!(output.buffer()[0], 2.0);
            output.buffer_mut()[0] = 3.0;
        }
        {
            let (input, output) = store.split(5);
            assert_eq!(input.buffer()[0], 3.0);
            assert_eq!(output.buffer()[0], 1.0);
        }
    }

    #[test]
    fn from_config_test() {
        let config = SolverConfig::new_2d(8, 1).with_base(4);
        let store = GridStore::<2>::from_config(&config).unwrap();
        assert_eq!(store.aabb(), &AABB::new(matrix![0, 7; 0, 7]));
        let expected = GridStore::initialize(*store.aabb(), 42, 4).unwrap();
        assert_eq!(
            store.generation(0).buffer(),
            expected.generation(0).buffer()
        );
    }
}
