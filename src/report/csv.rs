//! CSVレポート
//!
//! 1結果1行。文字列項目は空でも常に `"` で囲む（数値項目は囲まない）。
//! 移動していない結果の移動先パスだけは囲まずに空欄にする。

use crate::error::Result;
use crate::types::ScanResult;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const SEP: &str = ",";

#[cfg(windows)]
pub const LINE_SEP: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEP: &str = "\n";

const HEADER: [&str; 7] = [
    "InputPath",
    "RenamedPath",
    "FileCreated",
    "PageCount",
    "QRCodeFound",
    "QRCodePage",
    "QRcode",
];

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn quote_path(path: &Path) -> String {
    quote(&absolute(path).display().to_string())
}

/// 1行分（改行なし）
pub fn format_row(result: &ScanResult) -> String {
    let renamed = if result.is_renamed() {
        quote_path(result.output_path())
    } else {
        String::new()
    };

    [
        quote_path(result.input_path()),
        renamed,
        quote(result.creation_time()),
        result.page_count_field().to_string(),
        quote(result.status().symbol()),
        result.scanned_page().to_string(),
        quote(result.code_str()),
    ]
    .join(SEP)
}

/// ヘッダ付きのレポート全体
pub fn render(results: &[ScanResult]) -> String {
    let mut content = HEADER.join(SEP);
    content.push_str(LINE_SEP);

    for result in results {
        content.push_str(&format_row(result));
        content.push_str(LINE_SEP);
    }

    content
}

pub fn write_report(results: &[ScanResult], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render(results).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// `ScanResults_QRScan_<日時>.csv`
pub fn report_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "ScanResults_QRScan_{}.csv",
        now.format("%Y-%m-%d %H-%M-%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;
    use crate::types::ScanStatus;
    use chrono::TimeZone;

    #[test]
    fn test_quote_escapes_quotes() {
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_format_row_not_renamed() {
        let result = ScanResult::found(
            "/in/a.pdf",
            Code::parse("X1").unwrap(),
            1,
            Some(3),
            "2024-05-01T08:00:00Z".to_string(),
        );
        assert_eq!(
            format_row(&result),
            "\"/in/a.pdf\",,\"2024-05-01T08:00:00Z\",3,\"QR_CODE_FOUND\",1,\"X1\""
        );
    }

    #[test]
    fn test_format_row_renamed() {
        let code = Code::parse("X1").unwrap();
        let mut result = ScanResult::found("/in/a.pdf", code, 2, Some(3), String::new());
        result.mark_renamed(PathBuf::from("/out/X1/X1_1.pdf"));
        assert_eq!(
            format_row(&result),
            "\"/in/a.pdf\",\"/out/X1/X1_1.pdf\",\"\",3,\"QR_CODE_FOUND\",2,\"X1\""
        );
    }

    #[test]
    fn test_format_row_failure_sentinel() {
        let result = ScanResult::failed("/in/b.pdf", ScanStatus::NoAccess, 5, None, String::new());
        assert_eq!(
            format_row(&result),
            "\"/in/b.pdf\",,\"\",-9,\"NO_FILE_ACCESS\",5,\"\""
        );
    }

    #[test]
    fn test_render_header_and_rows() {
        let results = vec![
            ScanResult::failed("/in/a.pdf", ScanStatus::NoCodeFound, 1, Some(1), String::new()),
            ScanResult::failed("/in/b.pdf", ScanStatus::NoCodeFound, 1, Some(1), String::new()),
        ];
        let content = render(&results);
        let lines: Vec<&str> = content.split(LINE_SEP).collect();

        // 末尾の改行の後の空要素を含む
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "InputPath,RenamedPath,FileCreated,PageCount,QRCodeFound,QRCodePage,QRcode"
        );
        assert!(lines[1].contains("a.pdf"));
        assert!(lines[2].contains("b.pdf"));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_report_path_name() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = report_path(Path::new("/logs"), now);
        assert_eq!(path, Path::new("/logs/ScanResults_QRScan_2024-03-09 14-05-07.csv"));
    }
}
