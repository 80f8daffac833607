use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::write_bmp::write_bmp;
use log::info;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct BmpFilePresenter {}

impl FilePresenterPort for BmpFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        write_bmp(buffer, filepath)?;
        info!(
            "saved {}x{} image to {}",
            buffer.width(),
            buffer.height(),
            filepath.display()
        );

        Ok(())
    }
}

impl BmpFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}
