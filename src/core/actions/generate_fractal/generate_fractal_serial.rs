use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

fn pixels_in_rect(pixel_rect: PixelRect) -> impl Iterator<Item = Point> {
    let (left, right) = (pixel_rect.top_left().x, pixel_rect.bottom_right().x);

    (pixel_rect.top_left().y..=pixel_rect.bottom_right().y)
        .flat_map(move |y| (left..=right).map(move |x| Point { x, y }))
}

/// Row-major scan of the algorithm's whole pixel rect on the calling thread.
pub fn generate_fractal_serial<Alg: FractalAlgorithm>(
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    pixels_in_rect(algorithm.pixel_rect())
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}

/// Row-major scan of `band` into `output`, which must hold `band.size()` slots.
pub fn generate_fractal_serial_into<Alg: FractalAlgorithm>(
    algorithm: &Alg,
    band: PixelRect,
    output: &mut [Alg::Success],
) -> Result<(), Alg::Failure> {
    for (slot, pixel) in output.iter_mut().zip(pixels_in_rect(band)) {
        *slot = algorithm.compute(pixel)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    struct StubSuccessAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = (i32, i32);
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x, pixel.y))
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    struct StubFailingAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubFailingAlgorithm {
        type Success = u32;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            if pixel.y == 1 {
                Err(StubError {})
            } else {
                Ok(0)
            }
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    #[test]
    fn test_serial_scans_row_major_inclusive() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: PixelRect::new(Point { x: 1, y: 5 }, Point { x: 2, y: 6 }).unwrap(),
        };

        assert_eq!(
            generate_fractal_serial(&algorithm).unwrap(),
            vec![(1, 5), (2, 5), (1, 6), (2, 6)]
        );
    }

    #[test]
    fn test_serial_propagates_failure() {
        let algorithm = StubFailingAlgorithm {
            pixel_rect: PixelRect::from_size(4, 3).unwrap(),
        };

        assert_eq!(generate_fractal_serial(&algorithm), Err(StubError {}));
    }

    #[test]
    fn test_serial_into_fills_band() {
        let algorithm = StubSuccessAlgorithm {
            pixel_rect: PixelRect::from_size(3, 4).unwrap(),
        };
        let band = PixelRect::new(Point { x: 0, y: 2 }, Point { x: 2, y: 3 }).unwrap();
        let mut output = vec![(0, 0); 6];

        generate_fractal_serial_into(&algorithm, band, &mut output).unwrap();

        assert_eq!(output, vec![(0, 2), (1, 2), (2, 2), (0, 3), (1, 3), (2, 3)]);
    }
}
