use crate::error::{QrScanError, Result};
use crate::resolver::DEFAULT_RESOLUTIONS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ツール設定（`~/.config/qrscan/config.json`）
///
/// コマンドライン引数で上書きされ、1回の処理ごとに `ScanOptions` になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// コードのあるページ（1始まり）
    pub default_page: u32,
    /// 読み取りを試す解像度（dpi）
    pub resolutions: Vec<u32>,
    pub use_cache: bool,
    pub write_cache: bool,
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page: 1,
            resolutions: DEFAULT_RESOLUTIONS.to_vec(),
            use_cache: true,
            write_cache: true,
            jobs: 1,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| QrScanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("qrscan").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_page == 0 {
            return Err(QrScanError::Config("default_page は1以上にしてください".into()));
        }
        if self.resolutions.iter().all(|&dpi| dpi == 0) {
            return Err(QrScanError::Config(
                "resolutions に1つ以上の解像度を指定してください".into(),
            ));
        }
        if self.jobs == 0 {
            return Err(QrScanError::Config("jobs は1以上にしてください".into()));
        }
        Ok(())
    }
}
