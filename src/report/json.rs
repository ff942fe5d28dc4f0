use crate::error::Result;
use crate::types::ScanResult;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// 結果一覧をJSONで保存
pub fn write_json(results: &[ScanResult], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;
    use crate::types::ScanStatus;

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let results = vec![
            ScanResult::found("/in/a.pdf", Code::parse("X1").unwrap(), 1, Some(2), String::new()),
            ScanResult::failed("/in/b.pdf", ScanStatus::NoCodeFound, 1, None, String::new()),
        ];

        write_json(&results, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["code"], "X1");
        assert_eq!(rows[1]["status"], "NO_QR_CODE");
        assert!(rows[1]["code"].is_null());
        assert!(rows[1]["pageCount"].is_null());
    }
}
