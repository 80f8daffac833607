use std::path::{Path, PathBuf};

use chrono::Local;

use crate::controllers::file_names::benchmark_file_name;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::session::benchmark::{BenchmarkReport, BenchmarkRun, run_benchmark};
use crate::controllers::session::errors::SessionError;
use crate::core::config::{
    MAX_CLI_RESOLUTION, MAX_ITERATIONS, default_mandelbrot_bounds, is_valid_cli_render_size,
};
use crate::core::devices::device_manager::DeviceManager;
use crate::core::engine::frame_request::FrameRequest;
use crate::core::engine::strategy::Strategy;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::calculate_threads_for_pixel_rect_banding::available_threads;

/// Renders the default Mandelbrot view once per strategy and writes one
/// BMP per strategy.
pub struct CliBenchmarkController<P: FilePresenterPort> {
    presenter: P,
    devices: DeviceManager,
    run: Option<BenchmarkRun>,
}

impl<P: FilePresenterPort> CliBenchmarkController<P> {
    pub fn new(presenter: P, devices: DeviceManager) -> Self {
        Self {
            presenter,
            devices,
            run: None,
        }
    }

    pub fn generate(
        &mut self,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Result<&BenchmarkReport, Box<dyn std::error::Error>> {
        if !is_valid_cli_render_size(width, height, max_iterations) {
            return Err(Box::new(SessionError::Validation {
                width,
                height,
                max_iterations,
                max_resolution: MAX_CLI_RESOLUTION,
                max_iterations_limit: MAX_ITERATIONS,
            }));
        }

        let request = FrameRequest::new(
            width,
            height,
            default_mandelbrot_bounds(),
            max_iterations,
            FractalKind::Mandelbrot,
        )?;

        println!("Rendering Mandelbrot set...");
        println!("Image size: {}x{}", width, height);
        println!("Max iterations: {}", max_iterations);
        match self.devices.device_name() {
            Some(name) => println!("Accelerator: {name}"),
            None => println!("Accelerator: unavailable"),
        }

        let run = run_benchmark(&request, &mut self.devices)?;

        Ok(&self.run.insert(run).report)
    }

    /// Prints the summary table and derived figures for the last run.
    pub fn print_summary(&self) {
        let Some(run) = &self.run else {
            return;
        };
        let report = &run.report;

        println!();
        print!("{report}");

        let threads = available_threads().get();
        if let Some(efficiency) = report.parallel_efficiency(threads) {
            println!("Parallel efficiency: {efficiency:.1}% over {threads} threads");
        }
        if let Some(ratio) = report.accelerator_vs_parallel() {
            println!("Accelerator vs parallel: {ratio:.2}x");
        }
    }

    /// Writes one image per strategy into `output_dir`, creating it if needed.
    pub fn write(&self, output_dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
        let Some(run) = &self.run else {
            return Ok(Vec::new());
        };

        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let now = Local::now();
        let mut written = Vec::with_capacity(run.frames.len());

        for frame in &run.frames {
            let path = output_dir.join(benchmark_file_name(
                frame.strategy,
                frame.buffer.width(),
                frame.buffer.height(),
                run.report.max_iterations(),
                now,
            ));

            self.presenter.present(&frame.buffer, &path)?;
            println!("{}: {}", frame.strategy, path.display());
            written.push(path);
        }

        Ok(written)
    }

    #[must_use]
    pub fn strategies_run(&self) -> Vec<Strategy> {
        self.run
            .as_ref()
            .map(|run| run.frames.iter().map(|frame| frame.strategy).collect())
            .unwrap_or_default()
    }
}
