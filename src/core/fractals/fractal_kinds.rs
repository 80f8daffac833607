use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{julia_escape_time, mandelbrot_escape_time};
use std::fmt;

/// Which escape-time family a frame iterates. A Julia set carries the
/// constant frozen when it was generated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia {
        constant: Complex,
    },
}

impl FractalKind {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }

    #[inline]
    #[must_use]
    pub fn escape_time(self, point: Complex, max_iterations: u32) -> u32 {
        match self {
            Self::Mandelbrot => mandelbrot_escape_time(point, max_iterations),
            Self::Julia { constant } => julia_escape_time(point, constant, max_iterations),
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandelbrot => write!(f, "Mandelbrot"),
            Self::Julia { constant } => write!(f, "Julia (c = {constant})"),
        }
    }
}
