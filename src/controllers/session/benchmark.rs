use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::devices::device_manager::DeviceManager;
use crate::core::engine::errors::RenderError;
use crate::core::engine::fractal_engine::render_frame;
use crate::core::engine::frame_request::FrameRequest;
use crate::core::engine::strategy::Strategy;
use log::{info, warn};
use std::fmt;
use std::time::{Duration, Instant};

/// Wall-clock timings of each strategy over one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    width: u32,
    height: u32,
    max_iterations: u32,
    timings: Vec<(Strategy, Duration)>,
    accelerator_mismatches: Option<usize>,
}

impl BenchmarkReport {
    #[must_use]
    pub fn new(request: &FrameRequest) -> Self {
        Self {
            width: request.width(),
            height: request.height(),
            max_iterations: request.max_iterations(),
            timings: Vec::with_capacity(Strategy::ALL.len()),
            accelerator_mismatches: None,
        }
    }

    pub fn record(&mut self, strategy: Strategy, elapsed: Duration) {
        match self.timings.iter_mut().find(|(s, _)| *s == strategy) {
            Some(entry) => entry.1 = elapsed,
            None => self.timings.push((strategy, elapsed)),
        }
    }

    pub fn record_accelerator_mismatches(&mut self, mismatches: usize) {
        self.accelerator_mismatches = Some(mismatches);
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub fn timings(&self) -> &[(Strategy, Duration)] {
        &self.timings
    }

    #[must_use]
    pub fn elapsed(&self, strategy: Strategy) -> Option<Duration> {
        self.timings
            .iter()
            .find(|(s, _)| *s == strategy)
            .map(|(_, elapsed)| *elapsed)
    }

    /// Pixels differing between the Parallel and Accelerator frames, when both ran.
    #[must_use]
    pub fn accelerator_mismatches(&self) -> Option<usize> {
        self.accelerator_mismatches
    }

    /// Reference time divided by `strategy`'s time.
    #[must_use]
    pub fn speedup(&self, strategy: Strategy) -> Option<f64> {
        ratio(self.elapsed(Strategy::Reference)?, self.elapsed(strategy)?)
    }

    /// Pixels per second.
    #[must_use]
    pub fn throughput(&self, strategy: Strategy) -> Option<f64> {
        let seconds = self.elapsed(strategy)?.as_secs_f64();

        (seconds > 0.0).then(|| self.pixel_count() as f64 / seconds)
    }

    /// Parallel speedup as a percentage of ideal scaling over `threads`.
    #[must_use]
    pub fn parallel_efficiency(&self, threads: u32) -> Option<f64> {
        if threads == 0 {
            return None;
        }

        self.speedup(Strategy::Parallel)
            .map(|speedup| speedup / f64::from(threads) * 100.0)
    }

    #[must_use]
    pub fn accelerator_vs_parallel(&self) -> Option<f64> {
        ratio(
            self.elapsed(Strategy::Parallel)?,
            self.elapsed(Strategy::Accelerator)?,
        )
    }
}

fn ratio(numerator: Duration, denominator: Duration) -> Option<f64> {
    let denominator = denominator.as_secs_f64();

    (denominator > 0.0).then(|| numerator.as_secs_f64() / denominator)
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Performance summary ({}x{}, {} iterations)",
            self.width, self.height, self.max_iterations
        )?;
        writeln!(
            f,
            "{:<22} {:>12} {:>10} {:>18}",
            "Implementation", "Time (s)", "Speedup", "Throughput (px/s)"
        )?;
        writeln!(f, "{}", "-".repeat(65))?;

        for (strategy, elapsed) in &self.timings {
            let speedup = self
                .speedup(*strategy)
                .map_or_else(|| "-".to_string(), |s| format!("{s:.2}x"));
            let throughput = self
                .throughput(*strategy)
                .map_or_else(|| "-".to_string(), |t| format!("{t:.0}"));

            writeln!(
                f,
                "{:<22} {:>12.6} {:>10} {:>18}",
                strategy.display_name(),
                elapsed.as_secs_f64(),
                speedup,
                throughput
            )?;
        }

        if let Some(mismatches) = self.accelerator_mismatches {
            writeln!(f, "Accelerator mismatches vs parallel: {mismatches}")?;
        }

        Ok(())
    }
}

/// One strategy's frame from a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyFrame {
    pub strategy: Strategy,
    pub buffer: PixelBuffer,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRun {
    pub report: BenchmarkReport,
    pub frames: Vec<StrategyFrame>,
}

impl BenchmarkRun {
    /// The Accelerator frame if it ran, else the Parallel frame.
    #[must_use]
    pub fn into_best(mut self) -> Option<StrategyFrame> {
        self.frames.pop()
    }
}

fn timed(
    request: &FrameRequest,
    strategy: Strategy,
    devices: &mut DeviceManager,
) -> Result<StrategyFrame, RenderError> {
    let start = Instant::now();
    let buffer = render_frame(request, strategy, devices)?;
    let elapsed = start.elapsed();

    info!("{strategy}: {:.6} s", elapsed.as_secs_f64());

    Ok(StrategyFrame {
        strategy,
        buffer,
        elapsed,
    })
}

/// Renders `request` with Reference, Parallel and, when a device is
/// available, Accelerator, in that order.
///
/// An accelerator failure is logged and leaves the Parallel frame as the
/// best result; CPU failures are returned.
pub fn run_benchmark(
    request: &FrameRequest,
    devices: &mut DeviceManager,
) -> Result<BenchmarkRun, RenderError> {
    let mut report = BenchmarkReport::new(request);
    let mut frames = Vec::with_capacity(Strategy::ALL.len());

    for strategy in [Strategy::Reference, Strategy::Parallel] {
        let frame = timed(request, strategy, devices)?;
        report.record(strategy, frame.elapsed);
        frames.push(frame);
    }

    if devices.available() {
        match timed(request, Strategy::Accelerator, devices) {
            Ok(frame) => {
                report.record(Strategy::Accelerator, frame.elapsed);

                let parallel = &frames[frames.len() - 1].buffer;
                let mismatches = parallel.count_mismatches(&frame.buffer);
                if mismatches > 0 {
                    warn!(
                        "accelerator frame differs from parallel in {mismatches} of {} pixels",
                        request.pixel_count()
                    );
                }
                report.record_accelerator_mismatches(mismatches);

                frames.push(frame);
            }
            Err(err) => warn!("accelerator run failed, keeping parallel result: {err}"),
        }
    } else {
        info!("accelerator unavailable, skipped");
    }

    Ok(BenchmarkRun { report, frames })
}
