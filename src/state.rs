use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::xdg;

/// Record of the last successful forced reload of a target directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReloadRecord {
    pub target_dir: PathBuf,
    pub reloaded_at: DateTime<Utc>,
    pub marker_mtime: DateTime<Utc>,
    pub artifact_count: usize,
}

impl ReloadRecord {
    /// Get the base directory for reload records
    /// Can be overridden with HOOKRELOAD_STATE_DIR for testing
    fn state_base_dir() -> PathBuf {
        if let Ok(state_dir) = std::env::var("HOOKRELOAD_STATE_DIR") {
            PathBuf::from(state_dir)
        } else {
            xdg::reload_records_dir()
        }
    }

    pub fn record_path(target_dir: &Path) -> PathBuf {
        Self::state_base_dir().join(format!("{}.json", target_key(target_dir)))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::record_path(&self.target_dir);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state dir: {}", parent.display()))?;
        }

        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write reload record: {}", path.display()))?;

        Ok(())
    }

    pub fn load(target_dir: &Path) -> Result<Option<Self>> {
        let path = Self::record_path(target_dir);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read reload record: {}", path.display()))?;
        let record = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse reload record: {}", path.display()))?;

        Ok(Some(record))
    }
}

/// Stable per-directory key: first 16 hex chars of SHA-256 of the path.
///
/// The path is canonicalized when it exists, so `./proj` and `/abs/proj`
/// share one record.
pub fn target_key(target_dir: &Path) -> String {
    let canonical = target_dir
        .canonicalize()
        .unwrap_or_else(|_| target_dir.to_path_buf());

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    let result = hasher.finalize();

    format!("{:x}", result)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_target_key_is_stable() {
        let a = target_key(Path::new("/proj"));
        let b = target_key(Path::new("/proj"));
        let other = target_key(Path::new("/other"));

        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert_ne!(a, other);
    }

    #[test]
    fn test_target_key_ignores_path_spelling() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("proj");
        fs::create_dir_all(project.join("sub")).unwrap();

        let canonical = project.canonicalize().unwrap();
        let roundabout = project.join("sub").join("..");

        assert_eq!(target_key(&roundabout), target_key(&canonical));
    }

    #[test]
    #[serial]
    fn test_record_found_through_other_spelling() {
        let temp = TempDir::new().unwrap();
        let state = temp.path().join("state");
        let project = temp.path().join("proj");
        fs::create_dir_all(&project).unwrap();
        std::env::set_var("HOOKRELOAD_STATE_DIR", &state);

        let record = ReloadRecord {
            target_dir: project.join("."),
            reloaded_at: Utc::now(),
            marker_mtime: Utc::now(),
            artifact_count: 1,
        };
        record.save().unwrap();

        let loaded = ReloadRecord::load(&project.canonicalize().unwrap()).unwrap();
        std::env::remove_var("HOOKRELOAD_STATE_DIR");

        assert_eq!(loaded, Some(record));
    }

    #[test]
    #[serial]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        std::env::set_var("HOOKRELOAD_STATE_DIR", temp.path());

        let record = ReloadRecord {
            target_dir: PathBuf::from("/proj"),
            reloaded_at: Utc::now(),
            marker_mtime: Utc::now(),
            artifact_count: 2,
        };
        record.save().unwrap();

        let loaded = ReloadRecord::load(Path::new("/proj")).unwrap();
        let missing = ReloadRecord::load(Path::new("/elsewhere")).unwrap();
        std::env::remove_var("HOOKRELOAD_STATE_DIR");

        assert_eq!(loaded, Some(record));
        assert_eq!(missing, None);
    }
}
