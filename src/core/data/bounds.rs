use crate::core::config::{BOUND_LIMIT, MIN_BOUND_SIZE};
use crate::core::data::complex::Complex;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("bounds must be finite: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    NotFinite {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    #[error("bounds size must be positive: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// A window onto the complex plane. `y_min` maps to the top row of the image.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, BoundsError> {
        if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
            return Err(BoundsError::NotFinite {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }

        let width = x_max - x_min;
        let height = y_max - y_min;

        if width <= 0.0 || height <= 0.0 {
            return Err(BoundsError::InvalidSize { width, height });
        }

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub(crate) const fn from_raw(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Clamps every edge to `±BOUND_LIMIT`, then re-centers any axis narrower
    /// than `MIN_BOUND_SIZE` so it is at least that wide.
    ///
    /// The widened axis can only be as exact as the f64 spacing at its edges.
    /// Near `±BOUND_LIMIT` that spacing is about 1.4e-14, so the width lands
    /// within a few such steps above `MIN_BOUND_SIZE`, never below it.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let (x_min, x_max) = sanitize_axis(self.x_min, self.x_max);
        let (y_min, y_max) = sanitize_axis(self.y_min, self.y_max);

        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

fn sanitize_axis(min: f64, max: f64) -> (f64, f64) {
    let mut min = min.clamp(-BOUND_LIMIT, BOUND_LIMIT);
    let mut max = max.clamp(-BOUND_LIMIT, BOUND_LIMIT);

    if max - min >= MIN_BOUND_SIZE {
        return (min, max);
    }

    let center = ((min + max) / 2.0).clamp(
        -BOUND_LIMIT + MIN_BOUND_SIZE / 2.0,
        BOUND_LIMIT - MIN_BOUND_SIZE / 2.0,
    );
    min = center - MIN_BOUND_SIZE / 2.0;
    max = center + MIN_BOUND_SIZE / 2.0;

    // Edges near the limit are spaced ~1.4e-14 apart, so the difference can
    // round below the minimum. Grow `max` by about that spacing until it fits.
    while max - min < MIN_BOUND_SIZE {
        max += max.abs().max(1.0) * f64::EPSILON;
    }

    (min, max)
}
