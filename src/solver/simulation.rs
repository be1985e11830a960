use crate::boundary::*;
use crate::config::SolverConfig;
use crate::domain::*;
use crate::error::Result;
use crate::report::*;
use crate::solver::*;
use crate::stencil::*;
use crate::tiling::TilePlan;
use std::time::Instant;

/// Tiled solver over the heat stencil.
pub type HeatTiledSolver<'a, BC, const GRID_DIMENSION: usize> =
    TiledSolver<'a, HeatStencil<GRID_DIMENSION>, BC, GRID_DIMENSION>;

/// Step count after `frame` of `frames` evenly spaced frames over `steps`.
/// The last frame ends at exactly `steps`.
fn frame_end(frame: usize, frames: usize, steps: usize) -> usize {
    steps / frames * frame + steps % frames * frame / frames
}

/// One run of the heat equation.
///
/// Owns the configuration, both generations and the global time.
/// Everything that can fail does so in `new`, once a `Simulation` exists
/// every call runs its timesteps to completion.
pub struct Simulation<const GRID_DIMENSION: usize> {
    config: SolverConfig,
    store: GridStore<GRID_DIMENSION>,
    global_time: usize,
    pool: Option<rayon::ThreadPool>,
}

impl<const GRID_DIMENSION: usize> Simulation<GRID_DIMENSION> {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let pool = config
            .threads
            .map(|threads| {
                rayon::ThreadPoolBuilder::new().num_threads(threads).build()
            })
            .transpose()?;
        let store = GridStore::from_config(&config)?;
        log::debug!(
            "Simulation: {}D, n: {}, steps: {}, boundary: {}, threads: {:?}",
            GRID_DIMENSION,
            config.extent,
            config.steps,
            config.boundary,
            config.threads
        );
        Ok(Simulation {
            config,
            store,
            global_time: 0,
            pool,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn store(&self) -> &GridStore<GRID_DIMENSION> {
        &self.store
    }

    /// Timesteps completed so far.
    pub fn time(&self) -> usize {
        self.global_time
    }

    /// The authoritative generation, `time() % 2`.
    pub fn grid(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.store
            .generation(GridStore::<GRID_DIMENSION>::current(self.global_time))
    }

    pub fn verify(&self) -> Verification {
        Verification::new(self.grid().buffer())
    }

    pub fn stencil(&self) -> HeatStencil<GRID_DIMENSION> {
        HeatStencil::new(self.config.decay_rate)
    }

    /// Run `steps` timesteps starting at the current global time.
    pub fn advance<SolverType>(
        &mut self,
        solver: &SolverType,
        steps: usize,
    ) -> RunTiming
    where
        SolverType: SolverInterface<GRID_DIMENSION>,
    {
        let Simulation {
            store,
            global_time,
            pool,
            ..
        } = self;
        let start = Instant::now();
        let mut run = || {
            for _ in 0..steps {
                let (input, output) = store.split(*global_time);
                solver.step(input, output, *global_time);
                *global_time += 1;
            }
        };
        match pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
        let end = Instant::now();
        RunTiming { start, end, steps }
    }

    /// Run the configured number of timesteps.
    pub fn run<SolverType>(&mut self, solver: &SolverType) -> RunTiming
    where
        SolverType: SolverInterface<GRID_DIMENSION>,
    {
        let timing = self.advance(solver, self.config.steps);
        log::info!(
            "{} solver: {} steps in {:?}",
            solver.name(),
            timing.steps,
            timing.elapsed()
        );
        timing
    }

    /// Run `steps` timesteps split over `frames` evenly spaced frames.
    /// `observer` sees the initial grid as frame 0 and the grid after each
    /// stretch as frames `1..=frames`. When `steps % frames != 0` the
    /// stretches differ by one step, and with more frames than steps some
    /// frames repeat the previous grid. The returned timing covers only
    /// the timesteps.
    pub fn run_frames<SolverType, F>(
        &mut self,
        solver: &SolverType,
        frames: usize,
        steps: usize,
        mut observer: F,
    ) -> RunTiming
    where
        SolverType: SolverInterface<GRID_DIMENSION>,
        F: FnMut(usize, &OwnedDomain<GRID_DIMENSION>),
    {
        let frames = frames.max(1);
        observer(0, self.grid());
        let start = Instant::now();
        let mut elapsed = std::time::Duration::ZERO;
        for frame in 1..=frames {
            let stretch = frame_end(frame, frames, steps)
                - frame_end(frame - 1, frames, steps);
            elapsed += self.advance(solver, stretch).elapsed();
            observer(frame, self.grid());
        }
        RunTiming {
            start,
            end: start + elapsed,
            steps,
        }
    }

    pub fn naive_solver<BC: BoundaryPolicy>(
        stencil: &HeatStencil<GRID_DIMENSION>,
        bc: BC,
    ) -> NaiveSolver<'_, HeatStencil<GRID_DIMENSION>, BC, GRID_DIMENSION> {
        NaiveSolver::new(stencil, bc)
    }

    /// Tiled solver over this run's grid and block sizes.
    pub fn tiled_solver<'a, BC: BoundaryPolicy>(
        &self,
        stencil: &'a HeatStencil<GRID_DIMENSION>,
        bc: BC,
    ) -> HeatTiledSolver<'a, BC, GRID_DIMENSION> {
        let plan = TilePlan::new(
            *self.store.aabb(),
            self.config.block_size,
            self.config.inner_block_size,
        );
        TiledSolver::new(stencil, bc, plan)
    }

    /// Run the configured timesteps with the solver for `mode` and the
    /// configured boundary policy.
    pub fn run_mode(&mut self, mode: ExecutionMode) -> RunTiming
    where
        for<'a> HeatTiledSolver<'a, Periodic, GRID_DIMENSION>:
            SolverInterface<GRID_DIMENSION>,
        for<'a> HeatTiledSolver<'a, ZeroPadded, GRID_DIMENSION>:
            SolverInterface<GRID_DIMENSION>,
    {
        self.run_mode_frames(mode, 1, |_, _| {})
    }

    /// The configured timesteps through `run_frames`, with the solver for
    /// `mode` and the configured boundary policy.
    pub fn run_mode_frames<F>(
        &mut self,
        mode: ExecutionMode,
        frames: usize,
        observer: F,
    ) -> RunTiming
    where
        F: FnMut(usize, &OwnedDomain<GRID_DIMENSION>),
        for<'a> HeatTiledSolver<'a, Periodic, GRID_DIMENSION>:
            SolverInterface<GRID_DIMENSION>,
        for<'a> HeatTiledSolver<'a, ZeroPadded, GRID_DIMENSION>:
            SolverInterface<GRID_DIMENSION>,
    {
        let steps = self.config.steps;
        let stencil = self.stencil();
        let timing = match (mode, self.config.boundary) {
            (ExecutionMode::Naive, BoundaryKind::Periodic) => {
                let solver = Self::naive_solver(&stencil, Periodic);
                self.run_frames(&solver, frames, steps, observer)
            }
            (ExecutionMode::Naive, BoundaryKind::NonPeriodic) => {
                let solver = Self::naive_solver(&stencil, ZeroPadded);
                self.run_frames(&solver, frames, steps, observer)
            }
            (ExecutionMode::Tiled, BoundaryKind::Periodic) => {
                let solver = self.tiled_solver(&stencil, Periodic);
                self.run_frames(&solver, frames, steps, observer)
            }
            (ExecutionMode::Tiled, BoundaryKind::NonPeriodic) => {
                let solver = self.tiled_solver(&stencil, ZeroPadded);
                self.run_frames(&solver, frames, steps, observer)
            }
        };
        log::info!(
            "{} solver, {} boundary: {} steps in {:?}",
            mode,
            self.config.boundary,
            timing.steps,
            timing.elapsed()
        );
        timing
    }
}
