//! ファイル属性キャッシュ
//!
//! 読み取ったコードをPDFの拡張ファイル属性に保存し、
//! 次回以降の重い再読み取りをスキップする。
//! PDFの中身には手を加えない。

mod memory;
mod xattr_store;

pub use memory::MemoryStore;
pub use xattr_store::XattrStore;

use crate::code::Code;
use crate::error::{QrScanError, Result};
use std::io;
use std::path::Path;

/// コードを保存する属性名
///
/// Linux のユーザー属性は `user.` 名前空間が必須。
pub const ATTRIBUTE_NAME: &str = "user.custom.qrcode";

/// 属性の読み書き先
pub trait AttributeStore: Send + Sync {
    fn load(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>>;
    fn store(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()>;
}

/// 文字種チェック付きのコードキャッシュ
#[derive(Debug, Clone, Default)]
pub struct AttributeCache<S> {
    store: S,
}

impl<S: AttributeStore> AttributeCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// キャッシュ済みコードを取得
    ///
    /// 属性がない・非対応・文字種不正のいずれも「キャッシュなし」として扱う。
    pub fn read(&self, path: &Path) -> Option<Code> {
        let bytes = match self.store.load(path, ATTRIBUTE_NAME) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("属性を読めません {}: {}", path.display(), e);
                return None;
            }
        };

        let value = String::from_utf8(bytes).ok()?;
        match Code::parse(value) {
            Ok(code) => Some(code),
            Err(e) => {
                tracing::debug!("キャッシュ値を無視します {}: {}", path.display(), e);
                None
            }
        }
    }

    /// コードを書き込む
    ///
    /// 文字種不正の場合は属性に触らず `InvalidCode` を返す。
    pub fn write(&self, path: &Path, code: &str) -> Result<()> {
        let code = Code::parse(code)?;
        self.store
            .store(path, ATTRIBUTE_NAME, code.as_str().as_bytes())
            .map_err(|e| QrScanError::Attribute(format!("{}: {}", path.display(), e)))
    }
}
