//! テスト用のレンダラー・デコーダ
//!
//! FakeRenderer はページ画像の画素にコード文字列を埋め込み、
//! FakeDecoder がそれを読み戻す。コードのない画像は先頭画素が0。

#![allow(dead_code)]

use image::{GrayImage, Luma};
use qrscan_rust::attribute::{AttributeCache, MemoryStore};
use qrscan_rust::decoder::{CodeDecoder, DecodeError};
use qrscan_rust::render::{PageRenderer, RenderError};
use qrscan_rust::resolver::PageCodeResolver;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct FakePdf {
    pages: u32,
    /// ページ → (読み取れる最低dpi, 内容)
    codes: HashMap<u32, (u32, String)>,
    blank_image_pages: Vec<u32>,
}

#[derive(Debug, Default)]
pub struct FakeRenderer {
    pdfs: Mutex<HashMap<PathBuf, FakePdf>>,
    render_calls: Mutex<Vec<(PathBuf, u32, u32)>>,
    page_count_calls: AtomicUsize,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み取り可能なPDFを登録（コードなし）
    pub fn add_pdf(&self, path: &Path, pages: u32) {
        self.pdfs.lock().unwrap().insert(
            path.to_path_buf(),
            FakePdf {
                pages,
                ..Default::default()
            },
        );
    }

    /// `page` に `min_dpi` 以上で読めるコードを置く
    pub fn add_code(&self, path: &Path, page: u32, min_dpi: u32, text: &str) {
        let mut pdfs = self.pdfs.lock().unwrap();
        let pdf = pdfs.entry(path.to_path_buf()).or_insert_with(|| FakePdf {
            pages: page,
            ..Default::default()
        });
        pdf.pages = pdf.pages.max(page);
        pdf.codes.insert(page, (min_dpi, text.to_string()));
    }

    /// `page` のレンダリング結果を空画像（デコード不能）にする
    pub fn add_unreadable_image(&self, path: &Path, page: u32) {
        let mut pdfs = self.pdfs.lock().unwrap();
        if let Some(pdf) = pdfs.get_mut(path) {
            pdf.blank_image_pages.push(page);
        }
    }

    pub fn render_calls(&self) -> Vec<(PathBuf, u32, u32)> {
        self.render_calls.lock().unwrap().clone()
    }

    pub fn rendered_dpis(&self) -> Vec<u32> {
        self.render_calls().into_iter().map(|(_, _, dpi)| dpi).collect()
    }

    pub fn page_count_calls(&self) -> usize {
        self.page_count_calls.load(Ordering::SeqCst)
    }
}

impl PageRenderer for FakeRenderer {
    fn page_count(&self, path: &Path) -> Result<u32, RenderError> {
        self.page_count_calls.fetch_add(1, Ordering::SeqCst);
        self.pdfs
            .lock()
            .unwrap()
            .get(path)
            .map(|pdf| pdf.pages)
            .ok_or_else(|| RenderError::Open(path.display().to_string()))
    }

    fn render_page(&self, path: &Path, page: u32, dpi: u32) -> Result<GrayImage, RenderError> {
        self.render_calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), page, dpi));

        let pdfs = self.pdfs.lock().unwrap();
        let pdf = pdfs
            .get(path)
            .ok_or_else(|| RenderError::Open(path.display().to_string()))?;
        if page == 0 || page > pdf.pages {
            return Err(RenderError::PageOutOfRange(page));
        }
        if pdf.blank_image_pages.contains(&page) {
            return Ok(GrayImage::new(0, 0));
        }

        match pdf.codes.get(&page) {
            Some((min_dpi, text)) if dpi >= *min_dpi => {
                let bytes = text.as_bytes();
                Ok(GrayImage::from_fn(bytes.len() as u32, 1, |x, _| Luma([bytes[x as usize]])))
            }
            _ => Ok(GrayImage::from_pixel(1, 1, Luma([0]))),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeDecoder {
    calls: AtomicUsize,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CodeDecoder for FakeDecoder {
    fn decode(&self, image: &GrayImage) -> Result<String, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::Unreadable("empty image".to_string()));
        }
        let bytes = image.as_raw();
        if bytes[0] == 0 {
            return Err(DecodeError::NotFound);
        }
        String::from_utf8(bytes.clone()).map_err(|e| DecodeError::Unreadable(e.to_string()))
    }
}

pub type TestResolver = PageCodeResolver<FakeRenderer, FakeDecoder, MemoryStore>;

pub fn resolver(renderer: FakeRenderer) -> TestResolver {
    PageCodeResolver::new(renderer, FakeDecoder::new(), AttributeCache::new(MemoryStore::new()))
}

/// 中身のダミーPDFを作成
pub fn touch(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"%PDF-1.4 dummy").unwrap();
    path.to_path_buf()
}
