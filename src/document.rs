use crate::code::Code;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// QRコード付きPDF
///
/// 読み取り結果（ページ番号 → コード）とページ数を実行中だけ保持する。
/// 移動後はパスが無効になることがある。
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
    memo: HashMap<u32, Code>,
    page_count: Option<u32>,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            memo: HashMap::new(),
            page_count: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub(crate) fn memo_get(&self, page: u32) -> Option<&Code> {
        self.memo.get(&page)
    }

    pub(crate) fn memo_insert(&mut self, page: u32, code: Code) {
        self.memo.insert(page, code);
    }

    pub(crate) fn cached_page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub(crate) fn set_page_count(&mut self, count: u32) {
        self.page_count = Some(count);
    }
}
