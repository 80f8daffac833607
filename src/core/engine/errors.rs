use crate::core::actions::generate_fractal::generate_fractal_parallel_scoped_threads::GenerateFractalParallelError;
use crate::core::actions::generate_fractal::ports::accelerator::AcceleratorError;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::GeneratePixelBufferError;
use crate::core::colour_maps::errors::ColourMapError;
use crate::core::fractals::errors::AlgorithmConstructorError;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("fractal algorithm error: {0}")]
    Algorithm(#[from] AlgorithmConstructorError),
    #[error("pixel mapping error: {0}")]
    PixelMapping(#[from] PixelToComplexCoordsError),
    #[error("parallel generation error: {0}")]
    Parallel(#[from] GenerateFractalParallelError<PixelToComplexCoordsError>),
    #[error("colour mapping error: {0}")]
    Colour(#[from] GeneratePixelBufferError<ColourMapError>),
    #[error("accelerator unavailable")]
    AcceleratorUnavailable,
    #[error("accelerator runtime error: {0}")]
    AcceleratorRuntime(#[source] AcceleratorError),
}
