use crate::resolver::ResolveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("ファイルにアクセスできないか、ページが存在しません: {0}")]
    NoAccess(String),

    #[error("指定ページでQRコードが見つかりません: {0}")]
    NoCodeFound(String),

    #[error("不正なコード: {0:?}（使用可能な文字は A-Z, a-z, 0-9, スペース, -, _ のみ）")]
    InvalidCode(String),

    #[error("出力フォルダを作成または使用できません: {0}")]
    DestinationUnavailable(String),

    #[error("PDFレンダラーを初期化できません: {0}")]
    RendererUnavailable(String),

    #[error("ファイル属性エラー: {0}")]
    Attribute(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ResolveError> for QrScanError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoAccess(detail) => QrScanError::NoAccess(detail),
            ResolveError::NoCodeFound(path) => QrScanError::NoCodeFound(path),
        }
    }
}

pub type Result<T> = std::result::Result<T, QrScanError>;
