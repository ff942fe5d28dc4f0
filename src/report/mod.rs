//! 結果の出力（CSVレポート・JSON）

pub mod csv;
pub mod json;

pub use csv::{report_path, write_report};
pub use json::write_json;
