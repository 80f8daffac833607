use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour_maps::errors::ColourMapError;
use crate::core::data::colour::Colour;

/// Smooth polynomial palette running from deep blue through to near white.
/// Interior points (`iterations == max_iterations`) are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlueWhiteGradient {
    max_iterations: u32,
}

impl ColourMap for BlueWhiteGradient {
    type T = u32;
    type Failure = ColourMapError;

    fn map(&self, iterations: u32) -> Result<Colour, ColourMapError> {
        if iterations > self.max_iterations {
            return Err(ColourMapError::IterationsExceedMax {
                iterations,
                max_iterations: self.max_iterations,
            });
        }

        if iterations == self.max_iterations {
            return Ok(Colour::BLACK);
        }

        let t = iterations as f64 / self.max_iterations as f64;

        // Factor order is fixed so every backend truncates identically.
        let r = (9.0 * (1.0 - t) * t * t * t * 255.0) as u8;
        let g = (15.0 * (1.0 - t) * (1.0 - t) * t * t * 255.0) as u8;
        let b = (8.5 * (1.0 - t) * (1.0 - t) * (1.0 - t) * t * 255.0) as u8;

        Ok(Colour { r, g, b })
    }

    fn display_name(&self) -> &str {
        "Blue-white gradient"
    }
}

impl BlueWhiteGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_returns_black_at_max_iterations() {
        let mapper = BlueWhiteGradient::new(500);

        assert_eq!(mapper.map(500), Ok(Colour::BLACK));
    }

    #[test]
    fn test_map_returns_black_at_zero_iterations() {
        let mapper = BlueWhiteGradient::new(100);

        assert_eq!(mapper.map(0), Ok(Colour::BLACK));
    }

    #[test]
    fn test_map_single_iteration_of_500() {
        let mapper = BlueWhiteGradient::new(500);

        assert_eq!(mapper.map(1), Ok(Colour { r: 0, g: 0, b: 4 }));
    }

    #[test]
    fn test_map_midpoint_gradient() {
        let mapper = BlueWhiteGradient::new(100);

        assert_eq!(
            mapper.map(50),
            Ok(Colour {
                r: 143,
                g: 239,
                b: 135
            })
        );
    }

    #[test]
    fn test_map_quarter_gradient() {
        let mapper = BlueWhiteGradient::new(100);

        assert_eq!(
            mapper.map(25),
            Ok(Colour {
                r: 26,
                g: 134,
                b: 228
            })
        );
    }

    #[test]
    fn test_map_returns_error_when_iterations_exceed_max() {
        let mapper = BlueWhiteGradient::new(100);

        assert_eq!(
            mapper.map(101),
            Err(ColourMapError::IterationsExceedMax {
                iterations: 101,
                max_iterations: 100
            })
        );
    }
}
