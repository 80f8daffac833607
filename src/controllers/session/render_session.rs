use crate::controllers::session::benchmark::{BenchmarkReport, run_benchmark};
use crate::controllers::session::errors::SessionError;
use crate::controllers::session::render_result::RenderResult;
use crate::core::config::{
    ExplorerConfig, JULIA_PREVIEW_MAX_ITERATIONS, JULIA_PREVIEW_SIZE, MAX_ITERATIONS,
    MAX_RESOLUTION, is_valid_render_size,
};
use crate::core::data::complex::Complex;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::devices::device_manager::DeviceManager;
use crate::core::engine::fractal_engine::{colour_iterations, compute_iterations, render_frame};
use crate::core::engine::frame_request::FrameRequest;
use crate::core::engine::strategy::Strategy;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::view::view_transform::ViewTransform;
use crate::storage::write_bmp::write_bmp;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Computing,
    Interactive,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Computing => "computing",
            Self::Interactive => "interactive",
        };

        f.write_str(name)
    }
}

/// A full-resolution Julia set for a constant picked off the Mandelbrot view.
#[derive(Debug, Clone, PartialEq)]
pub struct JuliaRender {
    pub constant: Complex,
    pub buffer: PixelBuffer,
    pub elapsed: Duration,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JuliaPreview {
    pub constant: Complex,
    pub buffer: PixelBuffer,
}

/// Drives one exploration: an initial benchmark of every strategy, then
/// interactive zooming and panning with on-demand recomputes.
///
/// The session owns its devices and its frames; callers only ever see
/// borrowed snapshots.
#[derive(Debug)]
pub struct RenderSession {
    config: ExplorerConfig,
    devices: DeviceManager,
    state: SessionState,
    max_iterations: u32,
    view: Option<ViewTransform>,
    result: Option<RenderResult>,
    report: Option<BenchmarkReport>,
    dirty: bool,
}

impl RenderSession {
    /// A session in Idle. With `use_accelerator` off the devices are
    /// released up front and every render runs on the CPU.
    #[must_use]
    pub fn new(config: ExplorerConfig, mut devices: DeviceManager) -> Self {
        if !config.use_accelerator {
            devices.release();
        }

        Self {
            config,
            devices,
            state: SessionState::Idle,
            max_iterations: 0,
            view: None,
            result: None,
            report: None,
            dirty: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn result(&self) -> Option<&RenderResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&BenchmarkReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> Option<&ViewTransform> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn devices(&self) -> &DeviceManager {
        &self.devices
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Validates the request, benchmarks every strategy and enters the
    /// interactive state with the best frame.
    ///
    /// A rejected request leaves the session exactly as it was.
    pub fn start(
        &mut self,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Result<&BenchmarkReport, SessionError> {
        self.require_state("start", SessionState::Idle)?;

        if !is_valid_render_size(width, height, max_iterations) {
            return Err(SessionError::Validation {
                width,
                height,
                max_iterations,
                max_resolution: MAX_RESOLUTION,
                max_iterations_limit: MAX_ITERATIONS,
            });
        }

        let view = ViewTransform::new(width, height, self.config.mandelbrot_bounds)
            .map_err(|err| SessionError::Request(err.into()))?;
        let request = FrameRequest::new(
            width,
            height,
            view.bounds(),
            max_iterations,
            FractalKind::Mandelbrot,
        )?;

        info!("session starting: {width}x{height}, {max_iterations} iterations");
        self.state = SessionState::Computing;

        let run = match run_benchmark(&request, &mut self.devices) {
            Ok(run) => run,
            Err(err) => {
                self.state = SessionState::Idle;
                return Err(err.into());
            }
        };

        let report = run.report.clone();
        if let Some(best) = run.into_best() {
            self.result = Some(RenderResult::new(best.buffer, best.elapsed, best.strategy));
        }

        self.max_iterations = max_iterations;
        self.view = Some(view);
        self.dirty = false;
        self.state = SessionState::Interactive;

        info!("session interactive");
        Ok(self.report.insert(report))
    }

    /// Zooms by `factor` about `pivot`. Returns whether the view changed.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> Result<bool, SessionError> {
        let changed = self.view_mut("zoom")?.zoom(factor, pivot);
        self.dirty |= changed;

        Ok(changed)
    }

    pub fn zoom_to_selection(&mut self, selection: PixelRect) -> Result<bool, SessionError> {
        let changed = self.view_mut("zoom_to_selection")?.zoom_to_selection(selection);
        self.dirty |= changed;

        Ok(changed)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<bool, SessionError> {
        let changed = self.view_mut("pan")?.pan(dx, dy);
        self.dirty |= changed;

        Ok(changed)
    }

    pub fn reset(&mut self) -> Result<bool, SessionError> {
        let changed = self.view_mut("reset")?.reset();
        self.dirty |= changed;

        Ok(changed)
    }

    /// Recomputes the live frame if the view changed since the last one.
    ///
    /// Returns `Ok(true)` when a new frame replaced the old one. On failure
    /// the previous frame is kept and the view stays dirty.
    pub fn update(&mut self) -> Result<bool, SessionError> {
        if self.state != SessionState::Interactive || !self.dirty {
            return Ok(false);
        }

        let Some(view) = self.view.as_ref() else {
            return Ok(false);
        };
        let request = FrameRequest::new(
            view.screen().width(),
            view.screen().height(),
            view.bounds(),
            self.max_iterations,
            FractalKind::Mandelbrot,
        )?;

        self.state = SessionState::Computing;
        let rendered = self.render_live(&request);
        self.state = SessionState::Interactive;

        let (buffer, strategy, elapsed) = rendered?;
        debug!(
            "recomputed with {strategy} in {:.3} s",
            elapsed.as_secs_f64()
        );

        self.result = Some(RenderResult::new(buffer, elapsed, strategy));
        self.dirty = false;

        Ok(true)
    }

    /// Writes the current frame to `path` as BMP.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let result = self.result.as_ref().ok_or(SessionError::NoResult)?;

        write_bmp(&result.buffer, path.as_ref())?;
        info!("saved frame to {}", path.as_ref().display());

        Ok(())
    }

    /// Renders the Julia set whose constant lies under `pointer`, at the
    /// session's resolution and iteration count.
    pub fn generate_julia(&mut self, pointer: Point) -> Result<JuliaRender, SessionError> {
        let constant = self.constant_under("generate_julia", pointer)?;
        let Some(view) = self.view.as_ref() else {
            return Err(self.invalid_state("generate_julia"));
        };
        let request = FrameRequest::new(
            view.screen().width(),
            view.screen().height(),
            self.config.julia_bounds,
            self.max_iterations,
            FractalKind::Julia { constant },
        )?;

        let (buffer, strategy, elapsed) = self.render_live(&request)?;
        info!(
            "julia set for c = {constant} rendered with {strategy} in {:.3} s",
            elapsed.as_secs_f64()
        );

        Ok(JuliaRender {
            constant,
            buffer,
            elapsed,
            strategy,
        })
    }

    /// A small low-iteration Julia set for the constant under `pointer`.
    ///
    /// Escape counts are stretched back to the session's iteration range so
    /// the preview uses the same palette as full renders.
    pub fn julia_preview(&mut self, pointer: Point) -> Result<JuliaPreview, SessionError> {
        let constant = self.constant_under("julia_preview", pointer)?;
        let max_iterations = self.max_iterations;
        let preview_iterations = max_iterations.min(JULIA_PREVIEW_MAX_ITERATIONS);
        let scale = f64::from(max_iterations) / f64::from(preview_iterations);

        let request = FrameRequest::new(
            JULIA_PREVIEW_SIZE,
            JULIA_PREVIEW_SIZE,
            self.config.julia_bounds,
            preview_iterations,
            FractalKind::Julia { constant },
        )?;

        let counts = compute_iterations(&request, Strategy::Parallel, &mut self.devices)?
            .into_iter()
            .map(|count| {
                if count == preview_iterations {
                    max_iterations
                } else {
                    ((f64::from(count) * scale) as u32).min(max_iterations - 1)
                }
            })
            .collect();

        let buffer = colour_iterations(
            counts,
            max_iterations,
            request.pixel_rect(),
            Strategy::Parallel,
        )?;

        Ok(JuliaPreview { constant, buffer })
    }

    /// Returns to Idle. The last frame stays available until the next
    /// successful `start`.
    pub fn new_session(&mut self) {
        self.state = SessionState::Idle;
        self.view = None;
        self.dirty = false;

        info!("session reset to idle");
    }

    fn live_strategy(&self) -> Strategy {
        if self.devices.available() {
            Strategy::Accelerator
        } else {
            Strategy::Parallel
        }
    }

    fn render_live(
        &mut self,
        request: &FrameRequest,
    ) -> Result<(PixelBuffer, Strategy, Duration), SessionError> {
        let strategy = self.live_strategy();
        let start = Instant::now();

        match render_frame(request, strategy, &mut self.devices) {
            Ok(buffer) => Ok((buffer, strategy, start.elapsed())),
            Err(err) => {
                warn!("{strategy} render failed: {err}");
                Err(err.into())
            }
        }
    }

    fn constant_under(
        &self,
        operation: &'static str,
        pointer: Point,
    ) -> Result<Complex, SessionError> {
        self.require_state(operation, SessionState::Interactive)?;

        let view = self
            .view
            .as_ref()
            .ok_or_else(|| self.invalid_state(operation))?;

        if !view.screen().contains_point(pointer) {
            return Err(SessionError::PointerOutsideImage(pointer));
        }

        Ok(view.screen_to_complex(pointer))
    }

    fn view_mut(&mut self, operation: &'static str) -> Result<&mut ViewTransform, SessionError> {
        self.require_state(operation, SessionState::Interactive)?;

        let state = self.state;
        self.view
            .as_mut()
            .ok_or(SessionError::InvalidState { operation, state })
    }

    fn require_state(
        &self,
        operation: &'static str,
        expected: SessionState,
    ) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            state: self.state,
        }
    }
}
