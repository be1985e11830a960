mod util;

use tvheat::domain::DomainView;
use tvheat::image::Image1D;
use tvheat::solver::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = util::Args::cli_setup("heat_1d")?;

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = util::start_profiling()?;

    let config = args.config(1)?;
    let mut results = Vec::new();
    for mode in args.modes() {
        let mut sim = Simulation::<1>::new(config)?;
        let cells = sim.grid().aabb().buffer_size();
        let flops_per_cell = sim.stencil().flops_per_cell();

        let timing = if args.write_images {
            let frames = args.frames();
            let mut img = Image1D::new(
                *sim.grid().aabb(),
                frames as u32 + 1,
                config.base as f64,
            );
            let timing = sim.run_mode_frames(mode, frames, |frame, grid| {
                img.add_line(frame as u32, grid.buffer())
            });
            let file_name = format!("heat_1d_{}.png", mode);
            if let Some(path) = args.output_path(&file_name) {
                img.write(&path)?;
            }
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
