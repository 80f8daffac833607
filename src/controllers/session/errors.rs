use crate::core::actions::generate_fractal::ports::accelerator::AcceleratorError;
use crate::core::data::point::Point;
use crate::core::engine::errors::RenderError;
use crate::core::engine::frame_request::FrameRequestError;
use crate::controllers::session::render_session::SessionState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(
        "invalid render size {width}x{height} with {max_iterations} iterations \
         (limits: 1..={max_resolution} pixels per axis, 1..={max_iterations_limit} iterations)"
    )]
    Validation {
        width: u32,
        height: u32,
        max_iterations: u32,
        max_resolution: u32,
        max_iterations_limit: u32,
    },
    #[error("{operation} is not allowed while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    #[error("pointer at x:{}, y:{} is outside the image", .0.x, .0.y)]
    PointerOutsideImage(Point),
    #[error("no render result to save")]
    NoResult,
    #[error("accelerator unavailable")]
    AcceleratorUnavailable,
    #[error("accelerator runtime error: {0}")]
    AcceleratorRuntime(#[source] AcceleratorError),
    #[error("invalid frame request: {0}")]
    Request(#[from] FrameRequestError),
    #[error("render failed: {0}")]
    Render(#[source] RenderError),
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for SessionError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::AcceleratorUnavailable => Self::AcceleratorUnavailable,
            RenderError::AcceleratorRuntime(source) => Self::AcceleratorRuntime(source),
            other => Self::Render(other),
        }
    }
}
