//! コード文字種の検証
//!
//! 読み取ったコードはフォルダ名・ファイル名・ファイル属性にそのまま使うため、
//! 英数字・スペース・`-`・`_` だけを許可する。

use crate::error::{QrScanError, Result};
use serde::Serialize;
use std::fmt;

/// 文字種チェック
///
/// 空文字列は不可。先頭・末尾のスペースも文法上は許可されるが、
/// ファイル名として扱いにくいので手入力では注意すること。
pub fn is_valid(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
}

/// 文字種チェック済みのコード
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(QrScanError::InvalidCode(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
