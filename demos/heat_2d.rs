mod util;

use tvheat::domain::DomainView;
use tvheat::image::image_2d;
use tvheat::solver::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = util::Args::cli_setup("heat_2d")?;

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = util::start_profiling()?;

    let config = args.config(2)?;
    let mut results = Vec::new();
    for mode in args.modes() {
        let mut sim = Simulation::<2>::new(config)?;
        let cells = sim.grid().aabb().buffer_size();
        let flops_per_cell = sim.stencil().flops_per_cell();

        let timing = if args.write_images {
            let scale = config.base as f64;
            let mut written = Ok(());
            let frames = args.frames();
            let timing = sim.run_mode_frames(mode, frames, |frame, grid| {
                if written.is_err() {
                    return;
                }
                let file_name =
                    format!("heat_2d_{}_frame_{:04}.png", mode, frame);
                if let Some(path) = args.output_path(&file_name) {
                    written = image_2d(grid, scale, &path);
                }
            });
            written?;
            timing
        } else {
            sim.run_mode(mode)
        };

        let verification = sim.verify();
        util::log_run(
            mode,
            &config,
            cells,
            flops_per_cell,
            &timing,
            &verification,
        );
        results.push(sim);
    }

    if let [naive, tiled] = results.as_slice() {
        util::check_compare(naive.grid().buffer(), tiled.grid().buffer())?;
    }
    Ok(())
}
