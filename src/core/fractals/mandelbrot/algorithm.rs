use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::bounds::Bounds;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::fractals::errors::AlgorithmConstructorError;
use crate::core::fractals::escape_time::mandelbrot_escape_time;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};

#[derive(Debug, PartialEq)]
pub struct MandelbrotAlgorithm {
    pixel_rect: PixelRect,
    bounds: Bounds,
    max_iterations: u32,
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u32;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let c = pixel_to_complex_coords(pixel, self.pixel_rect, self.bounds)?;

        Ok(mandelbrot_escape_time(c, self.max_iterations))
    }

    fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }
}

impl MandelbrotAlgorithm {
    pub fn new(
        pixel_rect: PixelRect,
        bounds: Bounds,
        max_iterations: u32,
    ) -> Result<Self, AlgorithmConstructorError> {
        if max_iterations == 0 {
            return Err(AlgorithmConstructorError::ZeroMaxIterations);
        }

        Ok(Self {
            pixel_rect,
            bounds,
            max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algorithm(max_iterations: u32) -> Result<MandelbrotAlgorithm, AlgorithmConstructorError> {
        MandelbrotAlgorithm::new(
            PixelRect::from_size(5, 5).unwrap(),
            Bounds::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
            max_iterations,
        )
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        assert_eq!(
            algorithm(0),
            Err(AlgorithmConstructorError::ZeroMaxIterations)
        );
    }

    #[test]
    fn test_centre_pixel_is_interior() {
        let algorithm = algorithm(100).unwrap();

        assert_eq!(algorithm.compute(Point { x: 2, y: 2 }), Ok(100));
    }

    #[test]
    fn test_corner_escapes_immediately() {
        // c = -2 - 2i, |c|² = 8
        let algorithm = algorithm(100).unwrap();

        assert_eq!(algorithm.compute(Point { x: 0, y: 0 }), Ok(1));
    }

    #[test]
    fn test_pixel_outside_rect_is_error() {
        let algorithm = algorithm(100).unwrap();

        assert!(algorithm.compute(Point { x: 5, y: 0 }).is_err());
    }
}
