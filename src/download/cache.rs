use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Checksum-keyed cache of extracted SDE copies. One directory per
/// published checksum plus a `previous-checksum` marker naming the copy the
/// last successful run used.
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "eve-universe-db")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Directory holding the extracted SDE for a given checksum
    pub fn data_dir(&self, checksum: &str) -> PathBuf {
        self.cache_dir.join(checksum)
    }

    /// The checksum the last successful run was keyed on, if any
    pub fn cached_checksum(&self) -> Option<String> {
        fs::read_to_string(self.cache_dir.join("previous-checksum"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn store_checksum(&self, checksum: &str) -> Result<()> {
        fs::write(self.cache_dir.join("previous-checksum"), checksum)
            .context("Failed to store checksum marker")?;
        Ok(())
    }

    /// A copy is usable when its directory exists and the name dictionary,
    /// the first file every ingestion touches, is present.
    pub fn is_cached(&self, checksum: &str) -> bool {
        let dir = self.data_dir(checksum);
        dir.exists() && dir.join("bsd").join("invNames.yaml").exists()
    }

    /// Get path to the downloaded zip for a checksum
    pub fn zip_path(&self, checksum: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.zip", checksum))
    }

    /// Clean up old cached copies, keeping only the specified one
    pub fn cleanup_old_copies(&self, keep_checksum: &str) -> Result<()> {
        for entry in fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if name != keep_checksum {
                        fs::remove_dir_all(&path).ok();
                    }
                }
            }
        }
        Ok(())
    }
}
