//! pdfium によるレンダリング
//!
//! 実行ファイルと同じ場所の pdfium ライブラリを優先し、なければシステムのものを使う。
//! pdfium の呼び出しは `thread_safe` フィーチャによりプロセス全体で直列化されるため、
//! 1つのインスタンスを全スレッドで共有する（ライブラリの初期化・解放は1回だけ）。

use super::{scale_for_dpi, PageRenderer, RenderError};
use crate::error::{QrScanError, Result};
use image::GrayImage;
use pdfium_render::prelude::*;
use std::path::Path;

pub struct PdfiumRenderer {
    pdfium: Pdfium,
}

// 並列読み取りで共有できること
const _: fn() = || {
    fn assert_renderer<T: PageRenderer>() {}
    assert_renderer::<PdfiumRenderer>();
};

impl PdfiumRenderer {
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| QrScanError::RendererUnavailable(e.to_string()))?;

        tracing::debug!("pdfium を読み込みました");

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn open<'a>(&'a self, path: &Path) -> std::result::Result<PdfDocument<'a>, RenderError> {
        self.pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| RenderError::Open(format!("{}: {}", path.display(), e)))
    }
}

impl PageRenderer for PdfiumRenderer {
    fn page_count(&self, path: &Path) -> std::result::Result<u32, RenderError> {
        let document = self.open(path)?;
        Ok(document.pages().len() as u32)
    }

    fn render_page(
        &self,
        path: &Path,
        page: u32,
        dpi: u32,
    ) -> std::result::Result<GrayImage, RenderError> {
        let document = self.open(path)?;

        let page_count = document.pages().len() as u32;
        if page == 0 || page > page_count {
            return Err(RenderError::PageOutOfRange(page));
        }

        let pdf_page = document
            .pages()
            .get((page - 1) as PdfPageIndex)
            .map_err(|e| RenderError::Render(e.to_string()))?;

        let config = PdfRenderConfig::new()
            .scale_page_by_factor(scale_for_dpi(dpi))
            .render_form_data(true)
            .render_annotations(true);

        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| RenderError::Render(e.to_string()))?;

        // pdfium-render 側の image とバージョンが異なっても良いように生バイト経由で変換
        let luma = bitmap.as_image().to_luma8();
        let (width, height) = (luma.width(), luma.height());
        GrayImage::from_raw(width, height, luma.into_raw())
            .ok_or_else(|| RenderError::Render(format!("画像サイズ不正: {}x{}", width, height)))
    }
}
