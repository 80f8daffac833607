use crate::core::engine::frame_request::FrameRequest;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceleratorError {
    #[error("no accelerator is available")]
    Unavailable,
    #[error("accelerator device error: {0}")]
    Device(String),
    #[error("accelerator launch failed: {0}")]
    Launch(String),
    #[error("accelerator readback failed: {0}")]
    Readback(String),
    #[error("accelerator returned {actual} iteration counts, expected {expected}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("accelerator returned iteration count {count} above maximum {max_iterations}")]
    CountOutOfRange { count: u32, max_iterations: u32 },
}

/// A device that evaluates the escape-time kernel for a whole frame in one
/// blocking call, returning row-major iteration counts.
pub trait Accelerator: Send {
    fn name(&self) -> &str;

    fn compute_iterations(&mut self, request: &FrameRequest) -> Result<Vec<u32>, AcceleratorError>;

    /// Frees device resources. Safe to call more than once.
    fn release(&mut self) {}
}
