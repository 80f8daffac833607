//! Output file naming. Every name carries a local `YYYYmmdd_HHMMSS` stamp.

use crate::core::data::complex::Complex;
use crate::core::engine::strategy::Strategy;
use chrono::{DateTime, Local};

#[must_use]
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

#[must_use]
pub fn benchmark_file_name(
    strategy: Strategy,
    width: u32,
    height: u32,
    max_iterations: u32,
    now: DateTime<Local>,
) -> String {
    format!(
        "cli_mandelbrot_{}_{width}x{height}_iter{max_iterations}_{}.bmp",
        strategy.file_tag(),
        timestamp(now)
    )
}

/// The zoom is truncated to a whole number in the name.
#[must_use]
pub fn view_file_name(width: u32, height: u32, zoom: f64, now: DateTime<Local>) -> String {
    format!(
        "mandelbrot_{width}x{height}_zoom{}x_{}.bmp",
        zoom as u32,
        timestamp(now)
    )
}

#[must_use]
pub fn julia_file_name(
    width: u32,
    height: u32,
    max_iterations: u32,
    constant: Complex,
    now: DateTime<Local>,
) -> String {
    format!(
        "julia_{width}x{height}_iter{max_iterations}_c{:+.6}{}i{:.6}_{}.bmp",
        constant.real,
        if constant.imag < 0.0 { "" } else { "+" },
        constant.imag,
        timestamp(now)
    )
}
