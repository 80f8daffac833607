use crate::core::actions::generate_fractal::ports::accelerator::{Accelerator, AcceleratorError};
use crate::core::engine::frame_request::FrameRequest;

/// Runs the frame on `accelerator` and checks the returned counts before
/// anything is coloured.
pub fn generate_fractal_accelerated(
    accelerator: &mut dyn Accelerator,
    request: &FrameRequest,
) -> Result<Vec<u32>, AcceleratorError> {
    let counts = accelerator.compute_iterations(request)?;
    let expected = request.pixel_count();

    if counts.len() != expected {
        return Err(AcceleratorError::CountMismatch {
            expected,
            actual: counts.len(),
        });
    }

    if let Some(&count) = counts.iter().find(|&&c| c > request.max_iterations()) {
        return Err(AcceleratorError::CountOutOfRange {
            count,
            max_iterations: request.max_iterations(),
        });
    }

    Ok(counts)
}
