//! Spool-directory intake: the browsing collaborator drops one JSON file per
//! visit; the agent picks them up, analyzes, and archives.

use super::PageCapture;
use std::fs;
use std::path::{Path, PathBuf};

const PROCESSED_SUBDIR: &str = "processed";

pub struct CaptureSpool {
    dir: PathBuf,
    processed: PathBuf,
}

impl CaptureSpool {
    /// Open (and create, if needed) the spool directory and its archive.
    pub fn open(dir: &Path) -> Result<Self, std::io::Error> {
        let processed = dir.join(PROCESSED_SUBDIR);
        fs::create_dir_all(dir)?;
        fs::create_dir_all(&processed)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            processed,
        })
    }

    /// Pending capture files, oldest name first. The spool is flat: the
    /// archive subdirectory is never scanned.
    pub fn scan(&self) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut pending = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                pending.push(path);
            }
        }
        pending.sort();
        Ok(pending)
    }

    pub fn load(&self, path: &Path) -> Result<PageCapture, Box<dyn std::error::Error + Send + Sync>> {
        let data = fs::read_to_string(path)?;
        let capture: PageCapture = serde_json::from_str(&data)?;
        Ok(capture)
    }

    /// Move a processed capture into the archive; same-name collisions
    /// overwrite, which is fine because analysis ids are unique.
    pub fn archive(&self, path: &Path) -> Result<(), std::io::Error> {
        let name = path
            .file_name()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::InvalidInput))?;
        fs::rename(path, self.processed.join(name))
    }
}
