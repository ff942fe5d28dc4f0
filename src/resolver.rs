//! ページのコード解決
//!
//! 速い順に次の3段階でコードを求める:
//! 1. 実行中に読み取り済みの値（メモ）
//! 2. ファイル属性キャッシュ（有効時のみ。画像との照合はしない）
//! 3. ページ画像の読み取り（低解像度から順に再試行）
//!
//! 属性への書き戻しは 3 で読み取れた場合だけ行う。
//! キャッシュを使わず書き戻しだけ有効にすると属性を作り直せる。

use crate::attribute::{AttributeCache, AttributeStore};
use crate::code::Code;
use crate::decoder::{CodeDecoder, DecodeError};
use crate::document::PdfDocument;
use crate::render::{PageRenderer, RenderError};
use std::path::Path;
use thiserror::Error;

/// 再試行する解像度（dpi、昇順）
pub const DEFAULT_RESOLUTIONS: [u32; 4] = [150, 200, 250, 300];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// ファイルが読めない、またはページが存在しない
    #[error("ファイルにアクセスできないか、ページが存在しません: {0}")]
    NoAccess(String),

    /// すべての解像度で読み取れなかった
    #[error("QRコードが見つかりません: {0}")]
    NoCodeFound(String),
}

impl From<RenderError> for ResolveError {
    fn from(err: RenderError) -> Self {
        ResolveError::NoAccess(err.to_string())
    }
}

/// 属性キャッシュの利用方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// 属性のコードを信用して読み取りを省略する
    pub use_cache: bool,
    /// 読み取れたコードを属性に書き込む
    pub write_cache: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            use_cache: true,
            write_cache: true,
        }
    }
}

pub struct PageCodeResolver<R, D, S> {
    renderer: R,
    decoder: D,
    cache: AttributeCache<S>,
    resolutions: Vec<u32>,
}

impl<R, D, S> PageCodeResolver<R, D, S>
where
    R: PageRenderer,
    D: CodeDecoder,
    S: AttributeStore,
{
    pub fn new(renderer: R, decoder: D, cache: AttributeCache<S>) -> Self {
        Self {
            renderer,
            decoder,
            cache,
            resolutions: DEFAULT_RESOLUTIONS.to_vec(),
        }
    }

    /// 解像度の段階を指定（昇順に並べ替え、重複と0は除く）
    ///
    /// 空になった場合はデフォルトのまま。
    pub fn with_resolutions(mut self, resolutions: &[u32]) -> Self {
        let mut resolutions: Vec<u32> = resolutions.iter().copied().filter(|&d| d > 0).collect();
        resolutions.sort_unstable();
        resolutions.dedup();
        if !resolutions.is_empty() {
            self.resolutions = resolutions;
        }
        self
    }

    pub fn resolutions(&self) -> &[u32] {
        &self.resolutions
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn cache(&self) -> &AttributeCache<S> {
        &self.cache
    }

    /// ページ数（取得できたら文書側に保持）
    pub fn page_count(&self, doc: &mut PdfDocument) -> Result<u32, RenderError> {
        if let Some(count) = doc.cached_page_count() {
            return Ok(count);
        }
        let count = self.renderer.page_count(doc.path())?;
        doc.set_page_count(count);
        Ok(count)
    }

    /// `page` ページ（1始まり）のコードを求める
    pub fn resolve(
        &self,
        doc: &mut PdfDocument,
        page: u32,
        policy: CachePolicy,
    ) -> Result<Code, ResolveError> {
        if let Some(code) = doc.memo_get(page) {
            return Ok(code.clone());
        }

        if policy.use_cache {
            if let Some(code) = self.cache.read(doc.path()) {
                tracing::debug!("属性キャッシュを使用: {} → {}", doc.path().display(), code);
                return Ok(code);
            }
        }

        let page_count = self.page_count(doc)?;
        if page == 0 || page > page_count {
            return Err(ResolveError::NoAccess(format!(
                "{}: ページ {} は存在しません（全{}ページ）",
                doc.path().display(),
                page,
                page_count
            )));
        }

        let code = self.decode_page(doc, page)?;
        doc.memo_insert(page, code.clone());

        if policy.write_cache {
            // 書き込めなくても結果には影響しない
            if let Err(e) = self.cache.write(doc.path(), code.as_str()) {
                tracing::debug!("属性キャッシュを書き込めません: {}", e);
            }
        }

        Ok(code)
    }

    /// 1つのPDFのコードを求める（メモはこの呼び出しの間だけ有効）
    pub fn resolve_file(
        &self,
        path: &Path,
        page: u32,
        policy: CachePolicy,
    ) -> crate::error::Result<Code> {
        let mut doc = PdfDocument::new(path);
        Ok(self.resolve(&mut doc, page, policy)?)
    }

    /// 低い解像度から順にレンダリングして読み取る
    fn decode_page(&self, doc: &PdfDocument, page: u32) -> Result<Code, ResolveError> {
        for &dpi in &self.resolutions {
            let image = self.renderer.render_page(doc.path(), page, dpi)?;

            match self.decoder.decode(&image) {
                Ok(text) => match Code::parse(text) {
                    Ok(code) => {
                        tracing::debug!(
                            "{} dpi で読み取り: {} → {}",
                            dpi,
                            doc.path().display(),
                            code
                        );
                        return Ok(code);
                    }
                    Err(e) => {
                        // 解像度を上げても内容は変わらない
                        tracing::warn!("{}: 使用できないコードです ({})", doc.path().display(), e);
                        return Err(ResolveError::NoCodeFound(doc.path().display().to_string()));
                    }
                },
                Err(DecodeError::NotFound) => {
                    tracing::debug!("{} dpi では見つかりません: {}", dpi, doc.path().display());
                }
                Err(DecodeError::Unreadable(reason)) => {
                    return Err(ResolveError::NoAccess(format!(
                        "{}: {}",
                        doc.path().display(),
                        reason
                    )));
                }
            }
        }

        Err(ResolveError::NoCodeFound(doc.path().display().to_string()))
    }
}
