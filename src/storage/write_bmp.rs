use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Encodes `buffer` as a 24-bit uncompressed bottom-up BMP.
///
/// The size fields record `3 * width * height` bytes of pixel data, without
/// row padding, while the pixel rows themselves are padded to four bytes.
#[must_use]
pub fn encode_bmp(buffer: &PixelBuffer) -> Vec<u8> {
    let width = buffer.width();
    let height = buffer.height();
    let image_size = 3u32.wrapping_mul(width).wrapping_mul(height);
    let row_size = width as usize * 3;
    let padding = (4 - row_size % 4) % 4;

    let mut bytes = Vec::with_capacity(
        PIXEL_DATA_OFFSET as usize + (row_size + padding) * height as usize,
    );

    // BITMAPFILEHEADER
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&PIXEL_DATA_OFFSET.wrapping_add(image_size).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER
    bytes.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&image_size.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    for row in buffer.buffer().chunks_exact(row_size).rev() {
        for rgb in row.chunks_exact(3) {
            bytes.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
        }
        bytes.extend(std::iter::repeat_n(0u8, padding));
    }

    bytes
}

/// Writes `buffer` to `filepath` as BMP. The image is encoded in memory
/// first; nothing is written if the file cannot be created.
pub fn write_bmp(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let encoded = encode_bmp(buffer);
    let mut file = File::create(filepath)?;

    file.write_all(&encoded)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_rect::PixelRect;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    fn two_by_two() -> PixelBuffer {
        PixelBuffer::from_data(
            PixelRect::from_size(2, 2).unwrap(),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        )
        .unwrap()
    }

    #[test]
    fn test_headers() {
        let bytes = encode_bmp(&two_by_two());

        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u32_at(&bytes, 2), 54 + 12);
        assert_eq!(u32_at(&bytes, 6), 0);
        assert_eq!(u32_at(&bytes, 10), 54);
        assert_eq!(u32_at(&bytes, 14), 40);
        assert_eq!(u32_at(&bytes, 18), 2);
        assert_eq!(u32_at(&bytes, 22), 2);
        assert_eq!(u16_at(&bytes, 26), 1);
        assert_eq!(u16_at(&bytes, 28), 24);
        assert_eq!(u32_at(&bytes, 30), 0);
        assert_eq!(u32_at(&bytes, 34), 12);
        assert!(bytes[38..54].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rows_are_bottom_up_bgr_and_padded() {
        let bytes = encode_bmp(&two_by_two());

        // 6 bytes of pixels + 2 bytes padding per row
        assert_eq!(bytes.len(), 54 + 16);
        assert_eq!(&bytes[54..62], &[9, 8, 7, 12, 11, 10, 0, 0]);
        assert_eq!(&bytes[62..70], &[3, 2, 1, 6, 5, 4, 0, 0]);
    }

    #[test]
    fn test_unpadded_width() {
        let buffer = PixelBuffer::new(PixelRect::from_size(4, 3).unwrap());
        let bytes = encode_bmp(&buffer);

        assert_eq!(bytes.len(), 54 + 36);
        assert_eq!(u32_at(&bytes, 2), 54 + 36);
    }

    #[test]
    fn test_write_bmp_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bmp");
        let buffer = two_by_two();

        write_bmp(&buffer, &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), encode_bmp(&buffer));
    }

    #[test]
    fn test_write_bmp_unopenable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bmp");

        assert!(write_bmp(&two_by_two(), &path).is_err());
        assert!(!path.exists());
    }
}
