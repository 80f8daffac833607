use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::engine::strategy::Strategy;
use chrono::{DateTime, Local};
use std::time::Duration;

/// A frame and how it was produced. Replaced wholesale on every recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub buffer: PixelBuffer,
    pub elapsed: Duration,
    pub completed: bool,
    pub finished_at: DateTime<Local>,
    pub strategy: Strategy,
}

impl RenderResult {
    /// A result for a render that ran to completion just now.
    #[must_use]
    pub fn new(buffer: PixelBuffer, elapsed: Duration, strategy: Strategy) -> Self {
        Self {
            buffer,
            elapsed,
            completed: true,
            finished_at: Local::now(),
            strategy,
        }
    }
}
