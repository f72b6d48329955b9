//! Forced reload coordination
//!
//! A forced reload is a linear sequence:
//!
//! 1. the target directory must exist (checked before any side effect)
//! 2. the external hook executor rebuilds its cache with the force flag set
//! 3. the config marker is bumped to the current time, kept strictly newer
//!    than its own and every artifact's previous mtime
//! 4. every profile artifact is stamped with the marker's new mtime
//!
//! Any failing step aborts the sequence. Steps already applied are not
//! rolled back. After a successful run the hook tool's passive staleness
//! check sees artifacts no older than the marker and skips its own rebuild.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::artifacts::{ArtifactSpec, EmptyArtifactsPolicy};
use crate::error::ReloadError;
use crate::executor::{ExecutorSettings, HookExecutor};
use crate::timestamps;

/// Everything a coordinator needs, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadSettings {
    pub target_dir: PathBuf,
    /// Config marker, relative to `target_dir`
    pub marker: PathBuf,
    pub artifacts: ArtifactSpec,
    pub executor: ExecutorSettings,
}

/// Result of a successful forced reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadOutcome {
    pub marker_mtime: SystemTime,
    pub artifacts: Vec<PathBuf>,
}

/// Staleness of a single artifact relative to the marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFreshness {
    pub path: PathBuf,
    pub mtime: SystemTime,
    pub stale: bool,
}

/// Snapshot of what the hook tool's passive check would see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Freshness {
    pub marker_mtime: SystemTime,
    pub artifacts: Vec<ArtifactFreshness>,
}

impl Freshness {
    /// True when no artifact is older than the marker
    pub fn is_fresh(&self) -> bool {
        self.artifacts.iter().all(|artifact| !artifact.stale)
    }
}

pub struct ReloadCoordinator {
    settings: ReloadSettings,
}

impl ReloadCoordinator {
    pub fn new(settings: ReloadSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ReloadSettings {
        &self.settings
    }

    pub fn target_dir(&self) -> &Path {
        &self.settings.target_dir
    }

    pub fn marker_path(&self) -> PathBuf {
        self.settings.target_dir.join(&self.settings.marker)
    }

    fn ensure_target_dir(&self) -> Result<(), ReloadError> {
        if self.settings.target_dir.is_dir() {
            Ok(())
        } else {
            Err(ReloadError::MissingDirectory {
                path: self.settings.target_dir.clone(),
            })
        }
    }

    /// Force the hook tool to rebuild and bring its timestamps in sync
    pub fn force_reload(&self, executor: &dyn HookExecutor) -> Result<ReloadOutcome, ReloadError> {
        self.ensure_target_dir()?;

        let target_dir = self.target_dir();
        tracing::info!(
            operation = "reload.rebuild",
            path = %target_dir.display(),
            "forcing hook cache rebuild"
        );
        executor.rebuild(target_dir)?;

        // Resolved before the marker moves: its new mtime must clear every artifact
        let artifacts = self.settings.artifacts.resolve(target_dir)?;
        let mut floor = SystemTime::UNIX_EPOCH;
        for artifact in &artifacts {
            floor = floor.max(timestamps::modified(artifact)?);
        }

        let marker = self.marker_path();
        let marker_mtime = timestamps::touch_now(&marker, floor)?;
        tracing::debug!(
            operation = "reload.touch_marker",
            path = %marker.display(),
            "marker timestamp updated"
        );

        if artifacts.is_empty() {
            self.handle_empty_artifacts()?;
        }

        for artifact in &artifacts {
            timestamps::stamp(artifact, marker_mtime)?;
        }

        tracing::info!(
            operation = "reload.restamp",
            status = "success",
            artifact_count = artifacts.len(),
            "profile artifacts synchronized with marker"
        );

        Ok(ReloadOutcome {
            marker_mtime,
            artifacts,
        })
    }

    fn handle_empty_artifacts(&self) -> Result<(), ReloadError> {
        match self.settings.artifacts.on_empty {
            EmptyArtifactsPolicy::Error => Err(ReloadError::NoArtifacts {
                target: self.settings.target_dir.clone(),
            }),
            EmptyArtifactsPolicy::Warn => {
                tracing::warn!(
                    operation = "reload.restamp",
                    path = %self.settings.target_dir.display(),
                    "no profile artifacts found; nothing to re-stamp"
                );
                Ok(())
            }
            EmptyArtifactsPolicy::Ignore => Ok(()),
        }
    }

    /// Compare artifact mtimes against the marker without touching anything
    pub fn freshness(&self) -> Result<Freshness, ReloadError> {
        self.ensure_target_dir()?;

        let marker_mtime = timestamps::modified(&self.marker_path())?;
        let artifacts = self
            .settings
            .artifacts
            .resolve(self.target_dir())?
            .into_iter()
            .map(|path| -> Result<ArtifactFreshness, ReloadError> {
                let mtime = timestamps::modified(&path)?;
                Ok(ArtifactFreshness {
                    stale: mtime < marker_mtime,
                    path,
                    mtime,
                })
            })
            .collect::<Result<Vec<_>, ReloadError>>()?;

        Ok(Freshness {
            marker_mtime,
            artifacts,
        })
    }
}
