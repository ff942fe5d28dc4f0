//! 読み取り結果の型定義
//!
//! - ScanStatus: 1ファイルの読み取り結果区分
//! - ScanResult: 1ファイル分の結果（CSVレポートの1行）
//! - ScanSummary / RenameSummary: 集計

use crate::code::Code;
use crate::resolver::ResolveError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// ページ数が取得できなかった場合にレポートへ書く値
pub const PAGE_COUNT_UNKNOWN: i64 = -9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanStatus {
    #[serde(rename = "QR_CODE_FOUND")]
    Found,
    #[serde(rename = "NO_FILE_ACCESS")]
    NoAccess,
    #[serde(rename = "NO_QR_CODE")]
    NoCodeFound,
}

impl ScanStatus {
    /// レポート用の記号名
    pub fn symbol(&self) -> &'static str {
        match self {
            ScanStatus::Found => "QR_CODE_FOUND",
            ScanStatus::NoAccess => "NO_FILE_ACCESS",
            ScanStatus::NoCodeFound => "NO_QR_CODE",
        }
    }
}

impl From<&ResolveError> for ScanStatus {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::NoAccess(_) => ScanStatus::NoAccess,
            ResolveError::NoCodeFound(_) => ScanStatus::NoCodeFound,
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 1ファイル分の読み取り結果
///
/// 入力パスは読み取り時点のもので、以後変わらない。
/// 出力パスは移動に成功したときに一度だけ更新される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    status: ScanStatus,
    code: Option<Code>,
    scanned_page: u32,
    input_path: PathBuf,
    output_path: PathBuf,
    renamed: bool,
    page_count: Option<u32>,
    creation_time: String,
}

impl ScanResult {
    pub fn found(
        input_path: impl Into<PathBuf>,
        code: Code,
        scanned_page: u32,
        page_count: Option<u32>,
        creation_time: String,
    ) -> Self {
        Self::new(
            ScanStatus::Found,
            Some(code),
            input_path.into(),
            scanned_page,
            page_count,
            creation_time,
        )
    }

    /// 読み取り失敗の結果。`Found` を渡した場合は `NoCodeFound` として扱う。
    pub fn failed(
        input_path: impl Into<PathBuf>,
        status: ScanStatus,
        scanned_page: u32,
        page_count: Option<u32>,
        creation_time: String,
    ) -> Self {
        let status = if status == ScanStatus::Found {
            ScanStatus::NoCodeFound
        } else {
            status
        };
        Self::new(status, None, input_path.into(), scanned_page, page_count, creation_time)
    }

    fn new(
        status: ScanStatus,
        code: Option<Code>,
        input_path: PathBuf,
        scanned_page: u32,
        page_count: Option<u32>,
        creation_time: String,
    ) -> Self {
        Self {
            status,
            code,
            scanned_page,
            output_path: input_path.clone(),
            input_path,
            renamed: false,
            page_count,
            creation_time,
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn is_found(&self) -> bool {
        self.status == ScanStatus::Found
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    /// コード文字列。見つからなかった場合は空文字列。
    pub fn code_str(&self) -> &str {
        self.code.as_ref().map(Code::as_str).unwrap_or("")
    }

    pub fn scanned_page(&self) -> u32 {
        self.scanned_page
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_renamed(&self) -> bool {
        self.renamed
    }

    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    /// レポート用のページ数（不明なら `PAGE_COUNT_UNKNOWN`）
    pub fn page_count_field(&self) -> i64 {
        self.page_count.map(i64::from).unwrap_or(PAGE_COUNT_UNKNOWN)
    }

    pub fn creation_time(&self) -> &str {
        &self.creation_time
    }

    /// 移動後のパスを記録する
    ///
    /// 入力パスと同じパス、または既に移動済みの場合は何もせず `false`。
    pub(crate) fn mark_renamed(&mut self, output_path: PathBuf) -> bool {
        if self.renamed || output_path == self.input_path {
            return false;
        }
        self.output_path = output_path;
        self.renamed = true;
        true
    }
}

/// 読み取りの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total: usize,
    pub found: usize,
    pub failed: usize,
}

impl ScanSummary {
    pub fn from_results(results: &[ScanResult]) -> Self {
        let found = results.iter().filter(|r| r.is_found()).count();
        Self {
            total: results.len(),
            found,
            failed: results.len() - found,
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "集計: {}ファイルを読み取り、成功 {}件、失敗 {}件",
            self.total, self.found, self.failed
        )
    }
}

/// 移動の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenameSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl fmt::Display for RenameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "集計: {}ファイルの移動を試行、成功 {}件、失敗 {}件、コードなしのため未実施 {}件",
            self.attempted, self.succeeded, self.failed, self.skipped
        )
    }
}
