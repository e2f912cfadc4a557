//! JSON file persistence for the task collection.
//!
//! The store is the only code that touches the file. Every save rewrites
//! the whole document through a sibling temp file and a rename, so a crash
//! mid-write leaves the previous contents intact. There is no locking: two
//! processes saving the same file race and the last rename wins.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{task::Task, Error, Result};

pub const DEFAULT_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every task in file order. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Task>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no task file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let tasks: Vec<Task> =
            serde_json::from_slice(&bytes).map_err(|source| Error::CorruptStore {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Replaces the file contents with `tasks`.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let tmp = self.temp_path();
        let bytes = serde_json::to_vec_pretty(tasks).map_err(io::Error::from)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Contents must be on disk before the rename makes them visible.
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Sibling of the store file with `.tmp` appended to the full name.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_FILE_NAME));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}
