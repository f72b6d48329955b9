//! Profile artifact resolution
//!
//! The hook tool's generated cache files are resolved from three sources, in
//! order: explicit paths from configuration, a manifest file written by the
//! hook tool, and a glob pattern. Relative entries are joined onto the target
//! directory. The result is sorted and de-duplicated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReloadError;

/// What to do when resolution yields no artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyArtifactsPolicy {
    /// Fail the reload with `ReloadError::NoArtifacts`
    Error,
    /// Log a warning and succeed
    #[default]
    Warn,
    /// Succeed silently
    Ignore,
}

/// Where to find the profile artifacts of a target directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub paths: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub glob: Option<String>,
    pub on_empty: EmptyArtifactsPolicy,
}

impl ArtifactSpec {
    /// Resolve the artifact set for `target_dir`.
    ///
    /// Paths named explicitly (in `paths` or in the manifest) must exist;
    /// glob matches exist by construction.
    pub fn resolve(&self, target_dir: &Path) -> Result<Vec<PathBuf>, ReloadError> {
        let mut resolved = BTreeSet::new();

        for path in &self.paths {
            resolved.insert(target_dir.join(path));
        }

        if let Some(manifest) = &self.manifest {
            let manifest_path = target_dir.join(manifest);
            for entry in read_manifest(&manifest_path)? {
                resolved.insert(target_dir.join(entry));
            }
        }

        if let Some(missing) = resolved.iter().find(|path| !path.is_file()) {
            return Err(ReloadError::ArtifactMissing {
                path: missing.clone(),
            });
        }

        if let Some(pattern) = &self.glob {
            resolved.extend(expand_glob(target_dir, pattern)?);
        }

        Ok(resolved.into_iter().collect())
    }
}

/// Parse a manifest: one path per line, blank lines and `#` comments skipped
fn read_manifest(path: &Path) -> Result<Vec<PathBuf>, ReloadError> {
    let content = fs::read_to_string(path).map_err(|source| ReloadError::Manifest {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

fn expand_glob(target_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ReloadError> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let escaped_root = glob::Pattern::escape(&target_dir.to_string_lossy());
        format!("{}/{}", escaped_root.trim_end_matches('/'), pattern)
    };

    let entries = glob::glob(&full_pattern).map_err(|e| ReloadError::Glob {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    operation = "artifacts.resolve",
                    path = %e.path().display(),
                    "skipping unreadable glob match: {}",
                    e.error()
                );
            }
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project_with_profiles(names: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let direnv = temp.path().join(".direnv");
        fs::create_dir_all(&direnv).unwrap();
        for name in names {
            fs::write(direnv.join(name), "# profile").unwrap();
        }
        temp
    }

    #[test]
    fn test_glob_matches_profiles() {
        let temp = project_with_profiles(&["flake-profile.rc", "flake-profile-x.rc", "notes.txt"]);
        let spec = ArtifactSpec {
            glob: Some(".direnv/*.rc".to_string()),
            ..Default::default()
        };

        let resolved = spec.resolve(temp.path()).unwrap();
        let names: Vec<_> = resolved
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["flake-profile-x.rc", "flake-profile.rc"]);
    }

    #[test]
    fn test_glob_with_no_matches_is_empty() {
        let temp = project_with_profiles(&[]);
        let spec = ArtifactSpec {
            glob: Some(".direnv/*.rc".to_string()),
            ..Default::default()
        };

        assert!(spec.resolve(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_manifest_and_paths_are_merged_and_deduplicated() {
        let temp = project_with_profiles(&["a.rc", "b.rc"]);
        fs::write(
            temp.path().join(".direnv/manifest"),
            "# generated\n.direnv/a.rc\n\n.direnv/b.rc\n",
        )
        .unwrap();

        let spec = ArtifactSpec {
            paths: vec![PathBuf::from(".direnv/a.rc")],
            manifest: Some(PathBuf::from(".direnv/manifest")),
            glob: Some(".direnv/*.rc".to_string()),
            ..Default::default()
        };

        let resolved = spec.resolve(temp.path()).unwrap();
        assert_eq!(
            resolved,
            vec![
                temp.path().join(".direnv/a.rc"),
                temp.path().join(".direnv/b.rc"),
            ]
        );
    }

    #[test]
    fn test_listed_path_must_exist() {
        let temp = project_with_profiles(&[]);
        let spec = ArtifactSpec {
            paths: vec![PathBuf::from(".direnv/gone.rc")],
            ..Default::default()
        };

        let err = spec.resolve(temp.path()).unwrap_err();
        assert!(matches!(err, ReloadError::ArtifactMissing { .. }));
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let temp = project_with_profiles(&[]);
        let spec = ArtifactSpec {
            manifest: Some(PathBuf::from(".direnv/manifest")),
            ..Default::default()
        };

        let err = spec.resolve(temp.path()).unwrap_err();
        assert!(matches!(err, ReloadError::Manifest { .. }));
    }

    #[test]
    fn test_policy_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            on_empty: EmptyArtifactsPolicy,
        }

        let parsed: Wrapper = toml::from_str("on_empty = \"error\"").unwrap();
        assert_eq!(parsed.on_empty, EmptyArtifactsPolicy::Error);
        assert_eq!(EmptyArtifactsPolicy::default(), EmptyArtifactsPolicy::Warn);
    }
}
