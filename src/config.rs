use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::artifacts::{ArtifactSpec, EmptyArtifactsPolicy};
use crate::coordinator::ReloadSettings;
use crate::executor::ExecutorSettings;

/// File name looked up while walking the directory tree
pub const CONFIG_FILE_NAME: &str = "hookreload.toml";

/// Complete hookreload configuration (loaded from TOML file)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HookreloadConfig {
    /// Project root the hook tool manages. Relative paths are resolved
    /// against the directory containing the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,

    #[serde(default)]
    pub executor: ExecutorSettings,

    #[serde(default)]
    pub marker: MarkerConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

/// The hook tool's config file, whose mtime signals staleness
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerConfig {
    /// Path relative to the target directory
    #[serde(default = "default_marker_path")]
    pub path: PathBuf,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            path: default_marker_path(),
        }
    }
}

/// Generated cache files re-stamped after a reload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactsConfig {
    /// Explicit artifact paths, relative to the target directory
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Manifest written by the hook tool listing its artifacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Fallback glob, relative to the target directory (empty disables it)
    #[serde(default = "default_artifact_glob")]
    pub glob: Option<String>,

    /// Behavior when no artifacts are found: error, warn, ignore
    #[serde(default)]
    pub on_empty: EmptyArtifactsPolicy,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            manifest: None,
            glob: default_artifact_glob(),
            on_empty: EmptyArtifactsPolicy::default(),
        }
    }
}

fn default_marker_path() -> PathBuf {
    PathBuf::from(".envrc")
}

fn default_artifact_glob() -> Option<String> {
    Some(".direnv/*.rc".to_string())
}

impl HookreloadConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: HookreloadConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let (Some(target), Some(base)) = (config.target_dir.as_mut(), path.parent()) {
            if target.is_relative() {
                *target = base.join(&*target);
            }
        }

        Ok(config)
    }

    /// Create a configuration for `target_dir` with default settings
    pub fn for_target(target_dir: PathBuf) -> Self {
        Self {
            target_dir: Some(target_dir),
            ..Default::default()
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Merge CLI/environment overrides (they take precedence)
    pub fn apply_overrides(&mut self, target_dir: Option<PathBuf>, program: Option<String>) {
        if let Some(target_dir) = target_dir {
            self.target_dir = Some(target_dir);
        }
        if let Some(program) = program {
            self.executor.program = program;
        }
    }

    /// Turn the configuration into coordinator settings.
    ///
    /// Fails when no target directory was configured by any layer.
    pub fn into_settings(self) -> Result<ReloadSettings> {
        let target_dir = self.target_dir.context(
            "No target directory configured. Set target_dir in hookreload.toml, \
             HOOKRELOAD_TARGET_DIR, or run `hookreload init`",
        )?;

        Ok(ReloadSettings {
            target_dir,
            marker: self.marker.path,
            artifacts: ArtifactSpec {
                paths: self.artifacts.paths,
                manifest: self.artifacts.manifest,
                glob: self.artifacts.glob.filter(|pattern| !pattern.is_empty()),
                on_empty: self.artifacts.on_empty,
            },
            executor: self.executor,
        })
    }
}
