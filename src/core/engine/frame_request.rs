use crate::core::data::bounds::Bounds;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::fractals::fractal_kinds::FractalKind;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum FrameRequestError {
    #[error("invalid frame size: {0}")]
    Size(#[from] PixelRectError),
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
}

/// Everything a backend needs to compute one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameRequest {
    pixel_rect: PixelRect,
    bounds: Bounds,
    max_iterations: u32,
    fractal: FractalKind,
}

impl FrameRequest {
    pub fn new(
        width: u32,
        height: u32,
        bounds: Bounds,
        max_iterations: u32,
        fractal: FractalKind,
    ) -> Result<Self, FrameRequestError> {
        let pixel_rect = PixelRect::from_size(width, height)?;

        if max_iterations == 0 {
            return Err(FrameRequestError::ZeroMaxIterations);
        }

        Ok(Self {
            pixel_rect,
            bounds,
            max_iterations,
            fractal,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.pixel_rect.size() as usize
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn fractal(&self) -> FractalKind {
        self.fractal
    }
}
