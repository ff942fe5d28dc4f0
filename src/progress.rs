//! 進捗とメッセージの通知
//!
//! 読み取り・移動処理は表示方法を知らず、`ProgressObserver` に通知するだけ。
//! 端末表示は `TerminalProgress`（indicatif）が担当する。

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// ファイルごとの経過
    Detail,
    /// 開始・集計など
    Info,
    /// 個別ファイルの失敗
    Warn,
}

pub trait ProgressObserver: Sync {
    fn progress(&self, _current: usize, _total: usize) {}
    fn message(&self, _level: MessageLevel, _text: &str) {}
}

/// 何も表示しない
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// 通知を記録する（テスト・GUI連携用）
#[derive(Debug, Default)]
pub struct CollectingObserver {
    messages: Mutex<Vec<(MessageLevel, String)>>,
    last_progress: Mutex<Option<(usize, usize)>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn last_progress(&self) -> Option<(usize, usize)> {
        self.last_progress.lock().ok().and_then(|p| *p)
    }
}

impl ProgressObserver for CollectingObserver {
    fn progress(&self, current: usize, total: usize) {
        if let Ok(mut last) = self.last_progress.lock() {
            *last = Some((current, total));
        }
    }

    fn message(&self, level: MessageLevel, text: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, text.to_string()));
        }
    }
}

/// 端末用プログレスバー
pub struct TerminalProgress {
    bar: ProgressBar,
    verbose: bool,
}

const PROGRESS_TEMPLATE: &str = "{bar:40} {pos:>4}/{len:4} ({percent:>3}%) [{elapsed_precise}]";

impl TerminalProgress {
    pub fn new(verbose: bool) -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("⣿⣀ ");
        bar.set_style(style);
        Self { bar, verbose }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for TerminalProgress {
    fn progress(&self, current: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
    }

    fn message(&self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Detail if !self.verbose => {}
            MessageLevel::Warn => self.bar.println(format!("⚠ {}", text)),
            _ => self.bar.println(text),
        }
    }
}

/// 処理の中断要求
///
/// ファイルの区切りごとに確認される。
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
