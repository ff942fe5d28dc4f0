//! 読み取り結果に基づくPDFの移動・改名
//!
//! 読み取りがすべて終わってから実行する。コード `001` のPDFは
//! `出力フォルダ/001/001_1.pdf` に移動し、同じコードの次のPDFは `001_2.pdf` になる。
//! コードが見つからなかったPDFは移動しない。入力側の空フォルダは削除しない。
//! 途中で止まっても移動済みのファイルは戻さない。

use crate::code::Code;
use crate::error::{QrScanError, Result};
use crate::progress::{CancelFlag, MessageLevel, ProgressObserver};
use crate::types::{RenameSummary, ScanResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 1ファイルの移動失敗
///
/// 集計と警告に使うだけで、処理全体は止めない。
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("サブフォルダを作成できません {path}: {source}")]
    CreateSubfolder { path: PathBuf, source: io::Error },

    #[error("サブフォルダを読めません {path}: {source}")]
    ReadSubfolder { path: PathBuf, source: io::Error },

    #[error("{0} に空いているファイル名がありません")]
    NoFreeName(PathBuf),

    #[error("移動済みです: {0}")]
    AlreadyRenamed(PathBuf),

    #[error("{target} に移動できません: {source}")]
    Rename { target: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameOutcome {
    pub summary: RenameSummary,
    pub cancelled: bool,
}

/// コードごとのサブフォルダ内で未使用のファイル名を探す
///
/// 既存エントリ数を N として `<code>_1.pdf` から `<code>_(N+1).pdf` までを順に調べる。
/// 範囲内に空きがなければ `None`。
pub fn find_target_path(sub_dir: &Path, code: &Code) -> io::Result<Option<PathBuf>> {
    let existing = fs::read_dir(sub_dir)?.count();

    for i in 1..=existing + 1 {
        let candidate = sub_dir.join(format!("{}_{}.pdf", code, i));
        match fs::symlink_metadata(&candidate) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Some(candidate)),
            _ => continue,
        }
    }

    Ok(None)
}

/// 出力フォルダを用意する
fn prepare_output_dir(output_dir: &Path, observer: &dyn ProgressObserver) -> Result<()> {
    if output_dir.is_dir() {
        return Ok(());
    }
    if output_dir.exists() {
        return Err(QrScanError::DestinationUnavailable(format!(
            "{} はフォルダではありません",
            output_dir.display()
        )));
    }

    fs::create_dir_all(output_dir).map_err(|e| {
        QrScanError::DestinationUnavailable(format!("{}: {}", output_dir.display(), e))
    })?;
    observer.message(
        MessageLevel::Info,
        &format!("出力フォルダが存在しないため作成しました: {}", output_dir.display()),
    );
    Ok(())
}

fn move_one(
    result: &ScanResult,
    code: &Code,
    output_dir: &Path,
) -> std::result::Result<PathBuf, MoveError> {
    if result.is_renamed() {
        return Err(MoveError::AlreadyRenamed(result.output_path().to_path_buf()));
    }

    let sub_dir = output_dir.join(code.as_str());
    fs::create_dir_all(&sub_dir).map_err(|source| MoveError::CreateSubfolder {
        path: sub_dir.clone(),
        source,
    })?;

    let target = find_target_path(&sub_dir, code)
        .map_err(|source| MoveError::ReadSubfolder {
            path: sub_dir.clone(),
            source,
        })?
        .ok_or_else(|| MoveError::NoFreeName(sub_dir.clone()))?;

    fs::rename(result.input_path(), &target).map_err(|source| MoveError::Rename {
        target: target.clone(),
        source,
    })?;
    Ok(target)
}

/// 読み取り結果に従ってPDFを移動し、結果の出力パスを更新する
///
/// 出力フォルダを用意できない場合だけエラー。個別ファイルの失敗は集計に数えて続行する。
pub fn rename_results(
    results: &mut [ScanResult],
    output_dir: &Path,
    observer: &dyn ProgressObserver,
    cancel: &CancelFlag,
) -> Result<RenameOutcome> {
    let total = results.len();
    let mut summary = RenameSummary::default();
    let mut cancelled = false;

    observer.message(
        MessageLevel::Info,
        &format!("移動を開始\n  出力フォルダ: {}", output_dir.display()),
    );
    observer.progress(0, total);

    prepare_output_dir(output_dir, observer)?;

    for (index, result) in results.iter_mut().enumerate() {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        observer.progress(index + 1, total);

        let Some(code) = result.code().cloned() else {
            summary.skipped += 1;
            continue;
        };
        summary.attempted += 1;

        let name = result
            .input_path()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match move_one(result, &code, output_dir) {
            Ok(target) => {
                let shown = target.display().to_string();
                if result.mark_renamed(target) {
                    observer.message(MessageLevel::Detail, &format!("{} → {}", name, shown));
                    summary.succeeded += 1;
                } else {
                    tracing::debug!("{} の移動先を記録できません: {}", name, shown);
                    observer.message(
                        MessageLevel::Warn,
                        &format!("{} の移動先を記録できません: {}", name, shown),
                    );
                    summary.failed += 1;
                }
            }
            Err(e) => {
                tracing::debug!("{} を移動できません: {}", result.input_path().display(), e);
                observer.message(MessageLevel::Warn, &format!("{} を移動できません: {}", name, e));
                summary.failed += 1;
            }
        }
    }

    if cancelled {
        observer.message(MessageLevel::Info, "移動を中断しました");
    }
    observer.message(MessageLevel::Info, &summary.to_string());
    tracing::debug!("{}", summary);

    Ok(RenameOutcome { summary, cancelled })
}
