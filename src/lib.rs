//! PDFのQRコード読み取り・振り分けライブラリ
//!
//! 処理の流れ:
//! 1. `scanner` がフォルダ内のPDFを列挙し、`resolver` で各PDFのコードを求める
//! 2. 必要なら `renamer` が全結果をもとにPDFを移動する
//! 3. `report` が結果をCSVレポートに書き出す

pub mod attribute;
pub mod cli;
pub mod code;
pub mod config;
pub mod decoder;
pub mod document;
pub mod error;
pub mod progress;
pub mod renamer;
pub mod render;
pub mod report;
pub mod resolver;
pub mod scanner;
pub mod types;

pub use code::{is_valid, Code};
pub use error::{QrScanError, Result};
pub use types::{RenameSummary, ScanResult, ScanStatus, ScanSummary};
