//! Captured-artifact files: the HTML snapshot and raw network log of each
//! analysis, kept on disk with a content digest for later audit.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

pub struct ArtifactStore {
    root: PathBuf,
}

/// Where an artifact landed, with its SHA-256 and size.
#[derive(Debug, Clone)]
pub struct ArtifactRecord {
    pub path: PathBuf,
    pub sha256: String,
    pub bytes: u64,
}

impl ArtifactStore {
    /// Open (and create) the artifact tree: `html/` and `logs/` under root.
    pub fn open(root: &Path) -> Result<Self, std::io::Error> {
        fs::create_dir_all(root.join("html"))?;
        fs::create_dir_all(root.join("logs"))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn save_html(&self, analysis_id: &str, html: &str) -> Result<ArtifactRecord, std::io::Error> {
        let path = self.root.join("html").join(format!("{}.html", analysis_id));
        self.write(path, html.as_bytes())
    }

    pub fn save_logs(
        &self,
        analysis_id: &str,
        logs: &[Value],
    ) -> Result<ArtifactRecord, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.root.join("logs").join(format!("{}.json", analysis_id));
        let data = serde_json::to_vec_pretty(logs)?;
        Ok(self.write(path, &data)?)
    }

    fn write(&self, path: PathBuf, data: &[u8]) -> Result<ArtifactRecord, std::io::Error> {
        fs::write(&path, data)?;
        let mut hasher = Sha256::new();
        hasher.update(data);
        Ok(ArtifactRecord {
            path,
            sha256: format!("{:x}", hasher.finalize()),
            bytes: data.len() as u64,
        })
    }

    /// Retention: remove artifact files last modified before `cutoff`.
    /// Returns how many were removed; unreadable entries are skipped.
    pub fn prune_older_than(&self, cutoff: SystemTime) -> Result<u64, std::io::Error> {
        let mut removed = 0u64;
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let modified = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
                Some(t) => t,
                None => continue,
            };
            if modified < cutoff && fs::remove_file(entry.path()).is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
