//! Limits and defaults shared by the engine, the view transform and the session.

use crate::core::data::bounds::Bounds;
use crate::core::data::complex::Complex;

pub const MAX_RESOLUTION: u32 = 2000;
/// The batch benchmark has no window to fit, so it accepts larger frames.
pub const MAX_CLI_RESOLUTION: u32 = 8000;
pub const MAX_ITERATIONS: u32 = 10_000;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 50.0;
/// Zoom results this close to `MIN_ZOOM` are treated as exactly `MIN_ZOOM`.
pub const ZOOM_SNAP_EPSILON: f64 = 1e-9;
pub const SCROLL_ZOOM_STEP: f64 = 1.05;
pub const KEY_ZOOM_STEP: f64 = 1.1;
pub const SELECTION_MARGIN: f64 = 1.05;
/// A drag selection must exceed this many pixels on both axes to zoom.
pub const MIN_SELECTION_PIXELS: u32 = 20;

pub const BOUND_LIMIT: f64 = 100.0;
pub const MIN_BOUND_SIZE: f64 = 1e-10;

pub const JULIA_PREVIEW_SIZE: u32 = 120;
pub const JULIA_PREVIEW_MAX_ITERATIONS: u32 = 100;

#[must_use]
pub fn default_mandelbrot_bounds() -> Bounds {
    Bounds::from_raw(-2.5, 1.5, -2.0, 2.0)
}

#[must_use]
pub fn default_julia_bounds() -> Bounds {
    Bounds::from_raw(-2.0, 2.0, -2.0, 2.0)
}

pub const DEFAULT_JULIA_CONSTANT: Complex = Complex::new(-0.7, 0.27015);

/// Per-session settings. The defaults reproduce the classic full-set view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerConfig {
    pub mandelbrot_bounds: Bounds,
    pub julia_bounds: Bounds,
    pub use_accelerator: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            mandelbrot_bounds: default_mandelbrot_bounds(),
            julia_bounds: default_julia_bounds(),
            use_accelerator: true,
        }
    }
}

/// Checks `start` inputs against the resolution and iteration limits.
#[must_use]
pub fn is_valid_render_size(width: u32, height: u32, max_iterations: u32) -> bool {
    within_limits(width, height, max_iterations, MAX_RESOLUTION)
}

/// Same as [`is_valid_render_size`] with the benchmark's resolution limit.
#[must_use]
pub fn is_valid_cli_render_size(width: u32, height: u32, max_iterations: u32) -> bool {
    within_limits(width, height, max_iterations, MAX_CLI_RESOLUTION)
}

fn within_limits(width: u32, height: u32, max_iterations: u32, max_resolution: u32) -> bool {
    (1..=max_resolution).contains(&width)
        && (1..=max_resolution).contains(&height)
        && (1..=MAX_ITERATIONS).contains(&max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_size_limits() {
        assert!(is_valid_render_size(800, 600, 500));
        assert!(is_valid_render_size(1, 1, 1));
        assert!(is_valid_render_size(MAX_RESOLUTION, MAX_RESOLUTION, MAX_ITERATIONS));
        assert!(!is_valid_render_size(0, 600, 500));
        assert!(!is_valid_render_size(800, MAX_RESOLUTION + 1, 500));
        assert!(!is_valid_render_size(800, 600, 0));
        assert!(!is_valid_render_size(800, 600, MAX_ITERATIONS + 1));
    }

    #[test]
    fn test_cli_render_size_limits() {
        assert!(is_valid_cli_render_size(MAX_RESOLUTION + 1, 600, 500));
        assert!(is_valid_cli_render_size(MAX_CLI_RESOLUTION, MAX_CLI_RESOLUTION, 500));
        assert!(!is_valid_cli_render_size(MAX_CLI_RESOLUTION + 1, 600, 500));
        assert!(!is_valid_cli_render_size(0, 600, 500));
        assert!(!is_valid_cli_render_size(800, 600, MAX_ITERATIONS + 1));
    }

    #[test]
    fn test_default_config_uses_classic_view() {
        let config = ExplorerConfig::default();

        assert_eq!(config.mandelbrot_bounds.x_min(), -2.5);
        assert_eq!(config.mandelbrot_bounds.x_max(), 1.5);
        assert_eq!(config.julia_bounds.width(), 4.0);
        assert!(config.use_accelerator);
    }
}
