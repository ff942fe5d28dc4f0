//! PDFフォルダの一括読み取り
//!
//! フォルダを再帰的にたどり、PDFごとに指定ページのコードを求める。
//! 個別ファイルの失敗は結果に記録するだけで、処理全体は止めない。

mod file_time;

pub use file_time::creation_time;

use crate::attribute::AttributeStore;
use crate::decoder::CodeDecoder;
use crate::document::PdfDocument;
use crate::error::{QrScanError, Result};
use crate::progress::{CancelFlag, MessageLevel, ProgressObserver};
use crate::render::PageRenderer;
use crate::resolver::{CachePolicy, PageCodeResolver};
use crate::types::{ScanResult, ScanStatus, ScanSummary};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::WalkDir;

const PDF_EXTENSION: &str = ".pdf";

/// 1回の一括処理の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// コードのあるページ（1始まり）
    pub page: u32,
    pub policy: CachePolicy,
    /// 並列数（1なら逐次）
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            page: 1,
            policy: CachePolicy::default(),
            jobs: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub results: Vec<ScanResult>,
    pub summary: ScanSummary,
    /// 中断された場合は未処理のファイルが結果に含まれない
    pub cancelled: bool,
}

/// 拡張子が `.pdf`（大文字小文字を区別しない）か
pub fn is_pdf_file_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(PDF_EXTENSION)
}

/// フォルダ以下のPDFを列挙（サブフォルダも含む）
///
/// 読めないエントリは警告を出して飛ばす。
pub fn find_pdf_files(folder: &Path, observer: &dyn ProgressObserver) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(QrScanError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("走査できないエントリ: {}", e);
                observer.message(
                    MessageLevel::Warn,
                    &format!("読み込めないエントリがあります: {}", e),
                );
                continue;
            }
        };

        if !is_pdf_file_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        // ファイルへのシンボリックリンクも対象（リンク先をたどって判定）
        if entry.file_type().is_file() || entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// フォルダ内のPDFをすべて読み取る
pub fn scan_folder<R, D, S>(
    resolver: &PageCodeResolver<R, D, S>,
    folder: &Path,
    options: &ScanOptions,
    observer: &dyn ProgressObserver,
    cancel: &CancelFlag,
) -> Result<ScanOutcome>
where
    R: PageRenderer,
    D: CodeDecoder,
    S: AttributeStore,
{
    let files = find_pdf_files(folder, observer)?;
    scan_files(resolver, folder, &files, options, observer, cancel)
}

/// 列挙済みのファイルを読み取る
///
/// 結果は `files` の順。並列時も順序は変わらない。
pub fn scan_files<R, D, S>(
    resolver: &PageCodeResolver<R, D, S>,
    folder: &Path,
    files: &[PathBuf],
    options: &ScanOptions,
    observer: &dyn ProgressObserver,
    cancel: &CancelFlag,
) -> Result<ScanOutcome>
where
    R: PageRenderer,
    D: CodeDecoder,
    S: AttributeStore,
{
    let total = files.len();
    observer.message(
        MessageLevel::Info,
        &format!(
            "新しい読み取りを開始\n  入力フォルダ: {}\n  対象ページ: {}\n  ファイル数: {}",
            folder.display(),
            options.page,
            total
        ),
    );
    observer.progress(0, total);

    let done = AtomicUsize::new(0);
    let visit = |path: &PathBuf| -> Option<ScanResult> {
        if cancel.is_cancelled() {
            return None;
        }
        let result = scan_file(resolver, path, options, observer);
        let current = done.fetch_add(1, Ordering::SeqCst) + 1;
        observer.progress(current, total);
        Some(result)
    };

    let scanned: Vec<Option<ScanResult>> = if options.jobs > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
            .map_err(|e| QrScanError::Config(format!("スレッドプールを作成できません: {}", e)))?;
        pool.install(|| files.par_iter().map(visit).collect())
    } else {
        files.iter().map(visit).collect()
    };

    let cancelled = scanned.iter().any(Option::is_none);
    let results: Vec<ScanResult> = scanned.into_iter().flatten().collect();
    let summary = ScanSummary::from_results(&results);

    if cancelled {
        observer.message(
            MessageLevel::Info,
            &format!("中断しました（{}/{}ファイル処理済み）", results.len(), total),
        );
    }
    observer.message(MessageLevel::Info, &summary.to_string());
    tracing::debug!("{}", summary);

    Ok(ScanOutcome {
        results,
        summary,
        cancelled,
    })
}

/// 1ファイルを読み取る
pub fn scan_file<R, D, S>(
    resolver: &PageCodeResolver<R, D, S>,
    path: &Path,
    options: &ScanOptions,
    observer: &dyn ProgressObserver,
) -> ScanResult
where
    R: PageRenderer,
    D: CodeDecoder,
    S: AttributeStore,
{
    let mut doc = PdfDocument::new(path);
    let name = doc.file_name();
    observer.message(MessageLevel::Detail, &format!("読み取り中: {}", name));

    let outcome = resolver.resolve(&mut doc, options.page, options.policy);
    let page_count = resolver.page_count(&mut doc).ok();
    let created = creation_time(path);

    match outcome {
        Ok(code) => {
            observer.message(
                MessageLevel::Detail,
                &format!("{} でQRコード {} を検出", name, code),
            );
            ScanResult::found(path, code, options.page, page_count, created)
        }
        Err(e) => {
            tracing::debug!("{}: {}", path.display(), e);
            let status = ScanStatus::from(&e);
            let text = match status {
                ScanStatus::NoAccess => {
                    format!("{} にアクセスできないか、ページが見つかりません", name)
                }
                _ => format!("{} の指定ページでQRコードが見つかりません", name),
            };
            observer.message(MessageLevel::Warn, &text);
            ScanResult::failed(path, status, options.page, page_count, created)
        }
    }
}
