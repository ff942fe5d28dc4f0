use super::AttributeStore;
use std::io;
use std::path::Path;

/// 拡張ファイル属性（xattr）
///
/// ファイルシステムが対応していない場合は読み書きともエラーになる。
#[derive(Debug, Clone, Copy, Default)]
pub struct XattrStore;

impl XattrStore {
    pub fn new() -> Self {
        Self
    }

    pub fn is_supported() -> bool {
        xattr::SUPPORTED_PLATFORM
    }
}

impl AttributeStore for XattrStore {
    fn load(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        xattr::get(path, name)
    }

    fn store(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        xattr::set(path, name, value)
    }
}
