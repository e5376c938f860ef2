use super::BufferStore;
use crate::error::{BufferError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed buffer store: each key is a `{key}.json` file under `root`.
///
/// Writes go to a temporary file that is then renamed over the target, so a reader never
/// sees a half-written payload.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(BufferError::Store(format!("Invalid buffer key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl BufferStore for FileStore {
    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        self.ensure_dir()?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.entry_path(key)?.exists())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
