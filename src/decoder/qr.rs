use super::{CodeDecoder, DecodeError};
use image::GrayImage;

/// rqrr によるQRコードデコーダ
#[derive(Debug, Clone, Copy, Default)]
pub struct QrDecoder;

impl QrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl CodeDecoder for QrDecoder {
    fn decode(&self, image: &GrayImage) -> Result<String, DecodeError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::Unreadable(format!("空の画像 ({}x{})", width, height)));
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| image.get_pixel(x as u32, y as u32).0[0],
        );

        // 複数検出された場合は最初に読めたものを採用
        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_, content)) if !content.is_empty() => return Ok(content),
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("QR領域をデコードできません: {}", e);
                }
            }
        }

        Err(DecodeError::NotFound)
    }
}
