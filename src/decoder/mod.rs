//! ページ画像からのQRコード読み取り

mod qr;

pub use qr::QrDecoder;

use image::GrayImage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// コード領域が見つからない、または見つかったが読めなかった
    #[error("コードが見つかりません")]
    NotFound,

    /// 画像そのものが使えない
    #[error("画像を読み取れません: {0}")]
    Unreadable(String),
}

pub trait CodeDecoder: Send + Sync {
    fn decode(&self, image: &GrayImage) -> Result<String, DecodeError>;
}
