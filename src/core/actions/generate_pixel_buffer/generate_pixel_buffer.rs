use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use rayon::prelude::*;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum GeneratePixelBufferError<MapFailure: Error + 'static> {
    #[error("colour map error: {0}")]
    ColourMap(#[source] MapFailure),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

fn check_input_size<MapFailure: Error + 'static>(
    input_len: usize,
    pixel_rect: PixelRect,
) -> Result<(), GeneratePixelBufferError<MapFailure>> {
    let expected = pixel_rect.size() as usize * 3;

    if input_len * 3 != expected {
        return Err(PixelBufferError::BoundsMismatch {
            pixel_rect_size: expected,
            buffer_size: input_len * 3,
        }
        .into());
    }

    Ok(())
}

/// Maps each value to a colour in order, producing row-major RGB.
pub fn generate_pixel_buffer<CMap: ColourMap>(
    input: Vec<CMap::T>,
    mapper: &CMap,
    pixel_rect: PixelRect,
) -> Result<PixelBuffer, GeneratePixelBufferError<CMap::Failure>> {
    check_input_size(input.len(), pixel_rect)?;

    let mut buffer: PixelBufferData = Vec::with_capacity(input.len() * 3);

    for value in input {
        let Colour { r, g, b } = mapper
            .map(value)
            .map_err(GeneratePixelBufferError::ColourMap)?;

        buffer.extend_from_slice(&[r, g, b]);
    }

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}

/// Same output as [`generate_pixel_buffer`], with the mapping spread over the
/// rayon pool. Used for converting device iteration counts on the host.
pub fn generate_pixel_buffer_parallel<CMap>(
    input: &[CMap::T],
    mapper: &CMap,
    pixel_rect: PixelRect,
) -> Result<PixelBuffer, GeneratePixelBufferError<CMap::Failure>>
where
    CMap: ColourMap + Sync,
    CMap::T: Copy + Send + Sync,
    CMap::Failure: Send,
{
    check_input_size(input.len(), pixel_rect)?;

    let mut buffer: PixelBufferData = vec![0; input.len() * 3];

    buffer
        .par_chunks_mut(3)
        .zip(input.par_iter())
        .try_for_each(|(rgb, &value)| {
            let Colour { r, g, b } = mapper
                .map(value)
                .map_err(GeneratePixelBufferError::ColourMap)?;

            rgb.copy_from_slice(&[r, g, b]);
            Ok::<(), GeneratePixelBufferError<CMap::Failure>>(())
        })?;

    Ok(PixelBuffer::from_data(pixel_rect, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubColourMapError")
        }
    }

    impl Error for StubError {}

    #[derive(Debug)]
    struct StubColourMapSuccess {}

    impl ColourMap for StubColourMapSuccess {
        type T = u8;
        type Failure = StubError;

        fn map(&self, value: u8) -> Result<Colour, StubError> {
            Ok(Colour {
                r: value,
                g: value,
                b: value,
            })
        }

        fn display_name(&self) -> &str {
            "Stub Success"
        }
    }

    #[derive(Debug)]
    struct StubColourMapFailure {}

    impl ColourMap for StubColourMapFailure {
        type T = u8;
        type Failure = StubError;

        fn map(&self, _: u8) -> Result<Colour, StubError> {
            Err(StubError {})
        }

        fn display_name(&self) -> &str {
            "Stub Failure"
        }
    }

    #[test]
    fn test_generates_pixel_buffer_correctly() {
        let input: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let pixel_rect = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 2, y: 1 }).unwrap();
        let expected: PixelBufferData = vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6];
        let results = generate_pixel_buffer(input, &StubColourMapSuccess {}, pixel_rect).unwrap();

        assert_eq!(results.buffer(), &expected);
        assert_eq!(results.pixel_rect(), pixel_rect);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let input: Vec<u8> = (0..=255).collect();
        let pixel_rect = PixelRect::from_size(16, 16).unwrap();
        let mapper = StubColourMapSuccess {};
        let serial = generate_pixel_buffer(input.clone(), &mapper, pixel_rect).unwrap();
        let parallel = generate_pixel_buffer_parallel(&input, &mapper, pixel_rect).unwrap();

        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_propagates_colour_map_failure() {
        let input: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let pixel_rect = PixelRect::from_size(3, 2).unwrap();

        assert_eq!(
            generate_pixel_buffer(input.clone(), &StubColourMapFailure {}, pixel_rect),
            Err(GeneratePixelBufferError::ColourMap(StubError {}))
        );
        assert_eq!(
            generate_pixel_buffer_parallel(&input, &StubColourMapFailure {}, pixel_rect),
            Err(GeneratePixelBufferError::ColourMap(StubError {}))
        );
    }

    #[test]
    fn test_pixel_rect_input_size_mismatch_returns_err() {
        let input: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let pixel_rect = PixelRect::from_size(2, 2).unwrap();
        let results = generate_pixel_buffer(input, &StubColourMapSuccess {}, pixel_rect);

        assert_eq!(
            results,
            Err(GeneratePixelBufferError::PixelBuffer(
                PixelBufferError::BoundsMismatch {
                    pixel_rect_size: 12,
                    buffer_size: 18
                }
            ))
        );
    }

    #[test]
    fn test_error_display() {
        let err: GeneratePixelBufferError<StubError> =
            GeneratePixelBufferError::ColourMap(StubError {});

        assert_eq!(err.to_string(), "colour map error: StubColourMapError");
    }
}
