use std::path::PathBuf;

use clap::Parser;
use mandelbrot_explorer::core::config::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ITERATIONS, DEFAULT_WIDTH,
};
use mandelbrot_explorer::{BmpFilePresenter, CliBenchmarkController, DeviceManager};

/// Renders the Mandelbrot set with every available strategy, compares their
/// timings and writes one BMP per strategy.
#[derive(Debug, Parser)]
#[command(name = "mandelbrot-cli", version)]
struct Args {
    /// Image width in pixels
    #[arg(default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Image height in pixels
    #[arg(default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Maximum escape-time iterations
    #[arg(default_value_t = DEFAULT_MAX_ITERATIONS)]
    iterations: u32,

    /// Directory the images are written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Skip GPU probing and run only the CPU strategies
    #[arg(long)]
    no_gpu: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let devices = if args.no_gpu {
        DeviceManager::unavailable()
    } else {
        DeviceManager::probe()
    };

    let presenter = BmpFilePresenter::new();
    let mut controller = CliBenchmarkController::new(presenter, devices);

    controller.generate(args.width, args.height, args.iterations)?;
    controller.print_summary();
    controller.write(&args.output_dir)?;

    Ok(())
}
