use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

/// ファイル作成日時（RFC 3339, UTC）
///
/// ファイルシステムが作成日時を持たない場合は空文字列。
pub fn creation_time(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|meta| meta.created())
        .map(|time| DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_time_missing_file() {
        assert_eq!(creation_time(Path::new("/nonexistent/file.pdf")), "");
    }

    #[test]
    fn test_creation_time_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let time = creation_time(&path);
        // 作成日時に対応しないファイルシステムでは空
        if !time.is_empty() {
            assert!(time.ends_with('Z'), "{}", time);
            assert!(DateTime::parse_from_rfc3339(&time).is_ok());
        }
    }
}
