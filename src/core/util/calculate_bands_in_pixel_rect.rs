use crate::core::data::pixel_rect::PixelRect;
use std::num::NonZeroU32;

/// Number of row bands to split `pixel_rect` into: one per worker, but never
/// more bands than rows.
pub fn calculate_bands_in_pixel_rect(max_bands: NonZeroU32, pixel_rect: PixelRect) -> u32 {
    max_bands.get().min(pixel_rect.height())
}
