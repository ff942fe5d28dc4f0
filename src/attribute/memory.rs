use super::AttributeStore;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// メモリ上の属性ストア
///
/// 拡張属性が使えない環境での試行やテストで使う。
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<(PathBuf, String), Vec<u8>>>,
    failing: Mutex<HashSet<PathBuf>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定パスへの読み書きを常に失敗させる
    pub fn fail_on(&self, path: &Path) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(path.to_path_buf());
        }
    }

    /// 成功した書き込みの回数
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        let failing = self
            .failing
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        if failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "attributes not supported",
            ));
        }
        Ok(())
    }
}

impl AttributeStore for MemoryStore {
    fn load(&self, path: &Path, name: &str) -> io::Result<Option<Vec<u8>>> {
        self.check(path)?;
        let values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        Ok(values.get(&(path.to_path_buf(), name.to_string())).cloned())
    }

    fn store(&self, path: &Path, name: &str, value: &[u8]) -> io::Result<()> {
        self.check(path)?;
        let mut values = self
            .values
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        values.insert((path.to_path_buf(), name.to_string()), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
