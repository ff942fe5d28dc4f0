//! PDFページのラスタ化
//!
//! ページ番号は1始まり。デフォルトのバックエンドは pdfium（`pdfium` フィーチャ）。

#[cfg(feature = "pdfium")]
mod pdfium;

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRenderer;

use image::GrayImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDFを開けません: {0}")]
    Open(String),

    #[error("ページ {0} が存在しません")]
    PageOutOfRange(u32),

    #[error("レンダリング失敗: {0}")]
    Render(String),
}

/// PDFのページ数取得とページ画像の生成
pub trait PageRenderer: Send + Sync {
    fn page_count(&self, path: &Path) -> Result<u32, RenderError>;

    /// `page` ページを `dpi` の解像度でグレースケール画像にする
    fn render_page(&self, path: &Path, page: u32, dpi: u32) -> Result<GrayImage, RenderError>;
}

impl<T: PageRenderer + ?Sized> PageRenderer for Box<T> {
    fn page_count(&self, path: &Path) -> Result<u32, RenderError> {
        (**self).page_count(path)
    }

    fn render_page(&self, path: &Path, page: u32, dpi: u32) -> Result<GrayImage, RenderError> {
        (**self).render_page(path, page, dpi)
    }
}

/// PDFのポイント（1/72インチ）からdpiへの倍率
#[cfg_attr(not(feature = "pdfium"), allow(dead_code))]
pub(crate) fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / 72.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_for_dpi() {
        assert_eq!(scale_for_dpi(72), 1.0);
        assert_eq!(scale_for_dpi(144), 2.0);
        assert!((scale_for_dpi(150) - 2.0833).abs() < 0.001);
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::PageOutOfRange(3);
        assert!(err.to_string().contains('3'));
    }
}
