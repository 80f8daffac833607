use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::bounds::Bounds;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::fractals::errors::AlgorithmConstructorError;
use crate::core::fractals::escape_time::julia_escape_time;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};

#[derive(Debug, PartialEq)]
pub struct JuliaAlgorithm {
    pixel_rect: PixelRect,
    bounds: Bounds,
    constant: Complex,
    max_iterations: u32,
}

impl FractalAlgorithm for JuliaAlgorithm {
    type Success = u32;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let z = pixel_to_complex_coords(pixel, self.pixel_rect, self.bounds)?;

        Ok(julia_escape_time(z, self.constant, self.max_iterations))
    }

    fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }
}

impl JuliaAlgorithm {
    pub fn new(
        pixel_rect: PixelRect,
        bounds: Bounds,
        constant: Complex,
        max_iterations: u32,
    ) -> Result<Self, AlgorithmConstructorError> {
        if max_iterations == 0 {
            return Err(AlgorithmConstructorError::ZeroMaxIterations);
        }

        Ok(Self {
            pixel_rect,
            bounds,
            constant,
            max_iterations,
        })
    }

    #[must_use]
    pub fn constant(&self) -> Complex {
        self.constant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_iterations_rejected() {
        let result = JuliaAlgorithm::new(
            PixelRect::from_size(3, 3).unwrap(),
            Bounds::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
            Complex::ORIGIN,
            0,
        );

        assert_eq!(result, Err(AlgorithmConstructorError::ZeroMaxIterations));
    }

    #[test]
    fn test_unit_disc_with_zero_constant() {
        // c = 0: points inside the unit circle never escape, points outside do.
        let algorithm = JuliaAlgorithm::new(
            PixelRect::from_size(5, 5).unwrap(),
            Bounds::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
            Complex::ORIGIN,
            64,
        )
        .unwrap();

        assert_eq!(algorithm.compute(Point { x: 2, y: 2 }), Ok(64));
        assert_eq!(algorithm.compute(Point { x: 0, y: 0 }), Ok(0));
        assert_eq!(algorithm.constant(), Complex::ORIGIN);
    }
}
