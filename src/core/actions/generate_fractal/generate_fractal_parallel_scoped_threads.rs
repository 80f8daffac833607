use std::error::Error;
use std::mem;
use std::thread;

use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial_into;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use crate::core::util::calculate_threads_for_pixel_rect_banding::calculate_threads_for_pixel_rect_banding;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum GenerateFractalParallelError<AlgFailure: Error + 'static> {
    #[error("fractal algorithm error: {0}")]
    Algorithm(#[source] AlgFailure),
    #[error("pixel rect error: {0}")]
    PixelRect(#[from] PixelRectError),
    #[error("fractal worker thread panicked")]
    WorkerPanicked,
}

fn generate_pixel_rect_band(
    band_num: u32,
    band_height: u32,
    total_bands: u32,
    bounding_rect: PixelRect,
) -> Result<PixelRect, PixelRectError> {
    let band_top = (band_num * band_height) as i32;

    let band_bottom = if band_num == total_bands - 1 {
        (bounding_rect.height() - 1) as i32 // last band absorbs the remainder rows
    } else {
        (((band_num + 1) * band_height) - 1) as i32
    };

    let band_top_left = Point {
        x: bounding_rect.top_left().x,
        y: bounding_rect.top_left().y + band_top,
    };

    let band_bottom_right = Point {
        x: bounding_rect.bottom_right().x,
        y: bounding_rect.top_left().y + band_bottom,
    };

    PixelRect::new(band_top_left, band_bottom_right)
}

/// Splits the pixel rect into one contiguous row band per hardware thread.
/// Each worker writes straight into its own disjoint slice of the
/// preallocated output, and the scope is the single join point.
pub fn generate_fractal_parallel_scoped_threads<Alg>(
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, GenerateFractalParallelError<Alg::Failure>>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Copy + Default + Send,
    Alg::Failure: Send,
{
    let pixel_rect = algorithm.pixel_rect();
    let num_bands = calculate_threads_for_pixel_rect_banding(pixel_rect);
    let band_height = pixel_rect.height() / num_bands;
    let mut results = vec![Alg::Success::default(); pixel_rect.size() as usize];

    thread::scope(
        |scope| -> Result<(), GenerateFractalParallelError<Alg::Failure>> {
            let mut remaining = results.as_mut_slice();
            let mut handles = Vec::with_capacity(num_bands as usize);

            for band_num in 0..num_bands {
                let band = generate_pixel_rect_band(band_num, band_height, num_bands, pixel_rect)?;
                let (band_output, rest) =
                    mem::take(&mut remaining).split_at_mut(band.size() as usize);
                remaining = rest;

                handles.push(
                    scope.spawn(move || generate_fractal_serial_into(algorithm, band, band_output)),
                );
            }

            handles.into_iter().try_for_each(|handle| {
                handle
                    .join()
                    .map_err(|_| GenerateFractalParallelError::WorkerPanicked)?
                    .map_err(GenerateFractalParallelError::Algorithm)
            })
        },
    )?;

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    #[derive(Debug)]
    struct StubSuccessAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x * 1000 + pixel.y) as u64)
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    #[derive(Debug)]
    struct StubFailingAlgorithm {
        pixel_rect: PixelRect,
    }

    impl FractalAlgorithm for StubFailingAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            if pixel.y == self.pixel_rect.bottom_right().y {
                Err(StubError {})
            } else {
                Ok(1)
            }
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    fn assert_matches_serial(pixel_rect: PixelRect) {
        let algorithm = StubSuccessAlgorithm { pixel_rect };
        let sequential_results = generate_fractal_serial(&algorithm).unwrap();
        let parallel_results = generate_fractal_parallel_scoped_threads(&algorithm).unwrap();

        assert_eq!(parallel_results, sequential_results);
    }

    #[test]
    fn test_parallel_generates_same_results_as_sequential() {
        assert_matches_serial(PixelRect::from_size(11, 9).unwrap());
    }

    #[test]
    fn test_parallel_with_single_row() {
        assert_matches_serial(PixelRect::from_size(17, 1).unwrap());
    }

    #[test]
    fn test_parallel_with_uneven_row_distribution() {
        assert_matches_serial(PixelRect::from_size(4, 67).unwrap());
    }

    #[test]
    fn test_parallel_with_offset_rect() {
        assert_matches_serial(
            PixelRect::new(Point { x: -3, y: 10 }, Point { x: 4, y: 40 }).unwrap(),
        );
    }

    #[test]
    fn test_parallel_propagates_algorithm_failure() {
        let algorithm = StubFailingAlgorithm {
            pixel_rect: PixelRect::from_size(5, 13).unwrap(),
        };

        assert_eq!(
            generate_fractal_parallel_scoped_threads(&algorithm),
            Err(GenerateFractalParallelError::Algorithm(StubError {}))
        );
    }

    #[test]
    fn test_bands_cover_rect_with_remainder_in_last() {
        let pixel_rect = PixelRect::from_size(8, 10).unwrap();
        let bands: Vec<PixelRect> = (0..3)
            .map(|band_num| generate_pixel_rect_band(band_num, 3, 3, pixel_rect).unwrap())
            .collect();

        assert_eq!(bands[0].height(), 3);
        assert_eq!(bands[1].height(), 3);
        assert_eq!(bands[2].height(), 4);
        assert_eq!(bands[2].bottom_right(), Point { x: 7, y: 9 });
    }
}
