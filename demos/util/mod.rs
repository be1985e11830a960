use clap::Parser;
use tvheat::boundary::BoundaryKind;
use tvheat::build_info;
use tvheat::config::*;
use tvheat::initial_conditions::ClapICType;
use tvheat::report::*;
use tvheat::solver::*;

/// tvheat time varying heat stencil executable
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Start from the configuration of one of the benchmark runs.
    /// Other options override its values.
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Domain size, assume square
    #[arg(short, long)]
    pub domain_size: Option<usize>,

    /// Total timesteps.
    #[arg(long)]
    pub steps: Option<usize>,

    #[arg(short, long)]
    pub boundary: Option<BoundaryKind>,

    #[arg(short, long, default_value = "tiled")]
    pub mode: ExecutionMode,

    /// Run both solvers from the same initial grid and compare them.
    #[arg(long, conflicts_with = "mode")]
    pub compare: bool,

    /// Outer tile size, the unit of parallel work.
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Column sub-tile size, 2D only.
    #[arg(long)]
    pub inner_block_size: Option<usize>,

    /// The number of threads to use, defaults to rayon's choice.
    #[arg(short, long)]
    pub threads: Option<usize>,

    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Initial values are integers in [0, base).
    #[arg(long, default_value = "1024")]
    pub base: u32,

    /// Time varying coefficient is exp(-decay_rate * t).
    #[arg(long)]
    pub decay_rate: Option<f64>,

    /// Initial condition of generation 0.
    #[arg(long, default_value = "rand")]
    pub ic_type: ClapICType,

    /// Variance of the impulse initial condition.
    #[arg(long, default_value = "25.0")]
    pub ic_dial: f64,

    /// Directory for output files, will be created.
    #[arg(short, long)]
    pub output_dir: Option<std::path::PathBuf>,

    /// Write out images, WARNING: we do not check image size, so be reasonable.
    #[arg(short, long, requires("output_dir"))]
    pub write_images: bool,

    /// How many images to output.
    #[arg(short, long, default_value = "16")]
    pub images: usize,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .init();
        log::info!("{}: {}", name, build_info::GIT_DESCRIBE);

        if let Some(output_dir) = &args.output_dir {
            std::fs::create_dir_all(output_dir)?;
        }

        Ok(args)
    }

    /// Preset or default sizes for `grid_dimension`, then overrides.
    pub fn config(
        &self,
        grid_dimension: usize,
    ) -> Result<SolverConfig, Box<dyn std::error::Error>> {
        let mut config = match self.preset {
            Some(preset) if preset.grid_dimension() != grid_dimension => {
                return Err(format!(
                    "preset {:?} is not a {}D run",
                    preset, grid_dimension
                )
                .into());
            }
            Some(preset) => preset.config(),
            None if grid_dimension == 1 => SolverConfig::new_1d(4096, 1000),
            None => SolverConfig::new_2d(512, 100),
        };
        if let Some(n) = self.domain_size {
            config.extent = n;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        if let Some(block_size) = self.block_size {
            config.block_size = block_size;
        }
        if let Some(inner_block_size) = self.inner_block_size {
            config.inner_block_size = inner_block_size;
        }
        if let Some(decay_rate) = self.decay_rate {
            config.decay_rate = decay_rate;
        }
        config.threads = self.threads;
        config.seed = self.seed;
        config.base = self.base;
        let ic = self.ic_type.to_ic_type(self.seed, self.base, self.ic_dial);
        config = config.with_initial_condition(ic);
        config.validate()?;
        Ok(config)
    }

    /// Frames after the initial one, spread evenly over the run.
    pub fn frames(&self) -> usize {
        self.images.max(1)
    }

    pub fn output_path(&self, file_name: &str) -> Option<std::path::PathBuf> {
        self.output_dir.as_ref().map(|dir| dir.join(file_name))
    }

    pub fn modes(&self) -> Vec<ExecutionMode> {
        if self.compare {
            vec![ExecutionMode::Naive, ExecutionMode::Tiled]
        } else {
            vec![self.mode]
        }
    }
}

/// Keeps the profiling server alive for the whole run.
#[cfg(feature = "profile-with-puffin")]
pub fn start_profiling(
) -> Result<puffin_http::Server, Box<dyn std::error::Error>> {
    let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    log::info!("Run this to view profiling data:  puffin_viewer {server_addr}");
    let server = puffin_http::Server::new(&server_addr)?;
    profiling::puffin::set_scopes_on(true);
    Ok(server)
}

pub fn log_run(
    mode: ExecutionMode,
    config: &SolverConfig,
    cells: usize,
    flops_per_cell: usize,
    timing: &RunTiming,
    verification: &Verification,
) {
    log::info!(
        "{} | n: {} | steps: {} | boundary: {} | time: {:.5}s | mflops: {:.1}",
        mode,
        config.extent,
        timing.steps,
        config.boundary,
        timing.elapsed().as_secs_f64(),
        timing.mflops(cells, flops_per_cell)
    );
    log::info!("{} | {}", mode, verification);
}

/// Largest relative difference between two grids.
pub fn max_relative_error(expected: &[f64], actual: &[f64]) -> f64 {
    expected
        .iter()
        .zip(actual)
        .map(|(e, a)| (e - a).abs() / e.abs().max(f64::MIN_POSITIVE))
        .fold(0.0, f64::max)
}

/// Fail when two runs differ by more than floating point noise.
pub fn check_compare(
    expected: &[f64],
    actual: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let error = max_relative_error(expected, actual);
    log::info!("compare | max relative error: {:e}", error);
    if error > 1e-9 {
        let message = format!("solvers disagree, relative error {:e}", error);
        return Err(message.into());
    }
    Ok(())
}
