use crate::core::data::bounds::Bounds;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelToComplexCoordsError {
    #[error(
        "point (x: {}, y: {}) is outside the {}x{} image",
        .point.x, .point.y, .pixel_rect.width(), .pixel_rect.height()
    )]
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

/// Maps pixel `index` of an axis `pixels` long onto `[min, max]`.
///
/// Every backend evaluates this expression in the same order; the shader
/// mirrors it exactly. A single-pixel axis uses a denominator of 1.
#[inline]
#[must_use]
pub fn axis_to_complex(index: u32, pixels: u32, min: f64, max: f64) -> f64 {
    let denominator = pixels.saturating_sub(1).max(1) as f64;

    min + (max - min) * index as f64 / denominator
}

/// Inverse of [`axis_to_complex`]; the result is a fractional pixel index.
#[inline]
#[must_use]
pub fn complex_to_axis(value: f64, pixels: u32, min: f64, max: f64) -> f64 {
    let denominator = pixels.saturating_sub(1).max(1) as f64;

    (value - min) / (max - min) * denominator
}

pub fn pixel_to_complex_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    bounds: Bounds,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    let relative_x = (pixel_position.x - pixel_rect.top_left().x) as u32;
    let relative_y = (pixel_position.y - pixel_rect.top_left().y) as u32;

    Ok(Complex {
        real: axis_to_complex(
            relative_x,
            pixel_rect.width(),
            bounds.x_min(),
            bounds.x_max(),
        ),
        imag: axis_to_complex(
            relative_y,
            pixel_rect.height(),
            bounds.y_min(),
            bounds.y_max(),
        ),
    })
}
