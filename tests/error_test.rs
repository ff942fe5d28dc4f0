//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use qrscan_rust::config::Config;
use qrscan_rust::error::QrScanError;
use qrscan_rust::progress::NoopObserver;
use qrscan_rust::resolver::ResolveError;
use qrscan_rust::scanner;
use qrscan_rust::Code;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダを列挙した場合
#[test]
fn test_find_nonexistent_folder() {
    let result = scanner::find_pdf_files(Path::new("/nonexistent/path/12345"), &NoopObserver);
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, QrScanError::FolderNotFound(_)));
}

/// フォルダではなくファイルを指定した場合
#[test]
fn test_find_on_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.pdf");
    std::fs::write(&file, b"%PDF").unwrap();

    let result = scanner::find_pdf_files(&file, &NoopObserver);
    assert!(matches!(result, Err(QrScanError::FolderNotFound(_))));
}

/// PDFのないフォルダを列挙した場合
#[test]
fn test_find_folder_no_pdfs() {
    let dir = tempdir().expect("Failed to create temp dir");

    // PDF以外のファイルのみ作成
    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("scan.jpg"), "fake").unwrap();

    let result = scanner::find_pdf_files(dir.path(), &NoopObserver);
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// QrScanErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        QrScanError::Config("テスト設定エラー".to_string()),
        QrScanError::FolderNotFound("/path/to/folder".to_string()),
        QrScanError::NoAccess("a.pdf".to_string()),
        QrScanError::NoCodeFound("a.pdf".to_string()),
        QrScanError::InvalidCode("a/b".to_string()),
        QrScanError::DestinationUnavailable("/out".to_string()),
        QrScanError::RendererUnavailable("pdfium".to_string()),
        QrScanError::Attribute("a.pdf".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 不正なコードのメッセージに使用可能な文字が含まれる
#[test]
fn test_invalid_code_message() {
    let err = Code::parse("a/b").unwrap_err();
    assert!(matches!(err, QrScanError::InvalidCode(_)));

    let display = format!("{}", err);
    assert!(display.contains("a/b"));
    assert!(display.contains("A-Z"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = QrScanError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: QrScanError = io_err.into();

    assert!(matches!(err, QrScanError::Io(_)));
}

/// 解決エラーからの変換
#[test]
fn test_resolve_error_conversion() {
    let err: QrScanError = ResolveError::NoCodeFound("/in/a.pdf".to_string()).into();
    assert!(matches!(&err, QrScanError::NoCodeFound(path) if path == "/in/a.pdf"));
    assert!(err.to_string().contains("/in/a.pdf"));

    let err: QrScanError = ResolveError::NoAccess("/in/b.pdf: 開けません".to_string()).into();
    assert!(matches!(err, QrScanError::NoAccess(_)));
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_config_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(QrScanError::JsonParse(_))));
}

/// 範囲外の設定値
#[test]
fn test_config_rejects_zero_page() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"default_page": 0}"#).unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(QrScanError::Config(_))));
}

/// anyhowへの変換でメッセージが保たれる
#[test]
fn test_anyhow_conversion() {
    let err: anyhow::Error = QrScanError::FolderNotFound("/missing".to_string()).into();
    assert!(err.to_string().contains("/missing"));
}
