use crate::core::data::complex::Complex;
use std::ops::ControlFlow;

/// Iterates `z = z² + c` from `z0` until `|z|² > 4` or `max_iterations` is
/// reached. Returns the number of iterations taken; `max_iterations` marks an
/// interior point.
#[inline]
#[must_use]
pub fn escape_time(z0: Complex, c: Complex, max_iterations: u32) -> u32 {
    let iterations = (0..max_iterations).try_fold(z0, |z, iteration| {
        if z.magnitude_squared() > 4.0 {
            ControlFlow::Break(iteration)
        } else {
            ControlFlow::Continue(z * z + c)
        }
    });

    match iterations {
        ControlFlow::Break(iteration) => iteration,
        ControlFlow::Continue(_) => max_iterations,
    }
}

#[inline]
#[must_use]
pub fn mandelbrot_escape_time(point: Complex, max_iterations: u32) -> u32 {
    escape_time(Complex::ORIGIN, point, max_iterations)
}

#[inline]
#[must_use]
pub fn julia_escape_time(point: Complex, constant: Complex, max_iterations: u32) -> u32 {
    escape_time(point, constant, max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_interior() {
        assert_eq!(mandelbrot_escape_time(Complex::ORIGIN, 500), 500);
    }

    #[test]
    fn test_far_point_escapes_after_one_step() {
        // z1 = c = 3, |z1|² = 9 > 4
        assert_eq!(mandelbrot_escape_time(Complex::new(3.0, 0.0), 500), 1);
    }

    #[test]
    fn test_boundary_radius_is_not_escaped() {
        // c = -2 sticks at z = 2 forever, |z|² == 4 never exceeds the radius.
        assert_eq!(mandelbrot_escape_time(Complex::new(-2.0, 0.0), 200), 200);
    }

    #[test]
    fn test_known_escape_count() {
        // c = 1: 0 -> 1 -> 2 -> 5, escapes on the third check.
        assert_eq!(mandelbrot_escape_time(Complex::new(1.0, 0.0), 100), 3);
    }

    #[test]
    fn test_julia_starts_from_point() {
        let constant = Complex::new(-0.7, 0.27015);

        assert_eq!(julia_escape_time(Complex::new(3.0, 0.0), constant, 100), 0);
        assert!(julia_escape_time(Complex::ORIGIN, constant, 100) > 0);
    }

    #[test]
    fn test_zero_iterations_is_interior() {
        assert_eq!(mandelbrot_escape_time(Complex::new(5.0, 5.0), 0), 0);
    }
}
