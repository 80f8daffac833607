use crate::core::data::pixel_rect::PixelRect;
use crate::core::util::calculate_bands_in_pixel_rect::calculate_bands_in_pixel_rect;
use std::num::NonZeroU32;
use std::thread;

#[must_use]
pub fn available_threads() -> NonZeroU32 {
    thread::available_parallelism()
        .ok()
        .and_then(|n| NonZeroU32::new(u32::try_from(n.get()).unwrap_or(u32::MAX)))
        .unwrap_or(NonZeroU32::MIN)
}

pub fn calculate_threads_for_pixel_rect_banding(pixel_rect: PixelRect) -> u32 {
    calculate_bands_in_pixel_rect(available_threads(), pixel_rect)
}
