/// Directory-hook executor
///
/// Runs the external hook tool for a target directory with the forced-reload
/// signal set, blocking until it exits.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ReloadError;

/// Placeholder in executor arguments replaced with the target directory
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Rebuilds the hook tool's cache for a directory
pub trait HookExecutor {
    fn rebuild(&self, target_dir: &Path) -> Result<(), ReloadError>;
}

/// How to invoke the external hook tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorSettings {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments; `{target}` is replaced with the target directory
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Environment variable that tells the hook tool to skip its own cache check
    #[serde(default = "default_force_env")]
    pub force_env: String,

    #[serde(default = "default_force_value")]
    pub force_value: String,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            force_env: default_force_env(),
            force_value: default_force_value(),
        }
    }
}

fn default_program() -> String {
    "direnv".to_string()
}

fn default_args() -> Vec<String> {
    vec![
        "exec".to_string(),
        TARGET_PLACEHOLDER.to_string(),
        "true".to_string(),
    ]
}

fn default_force_env() -> String {
    "_nix_direnv_force_reload".to_string()
}

fn default_force_value() -> String {
    "1".to_string()
}

/// Runs the hook tool as a child process
pub struct CommandExecutor {
    settings: ExecutorSettings,
}

impl CommandExecutor {
    pub fn new(settings: ExecutorSettings) -> Self {
        Self { settings }
    }

    /// Arguments with the target placeholder substituted
    pub fn render_args(&self, target_dir: &Path) -> Vec<String> {
        let target = target_dir.to_string_lossy();
        self.settings
            .args
            .iter()
            .map(|arg| arg.replace(TARGET_PLACEHOLDER, &target))
            .collect()
    }

    fn resolve_program(&self) -> PathBuf {
        which::which(&self.settings.program).unwrap_or_else(|e| {
            tracing::debug!(
                program = %self.settings.program,
                "could not find executor in PATH ({}), trying as-is",
                e
            );
            PathBuf::from(&self.settings.program)
        })
    }
}

impl HookExecutor for CommandExecutor {
    fn rebuild(&self, target_dir: &Path) -> Result<(), ReloadError> {
        let program = self.resolve_program();
        let args = self.render_args(target_dir);

        tracing::debug!(
            operation = "executor.rebuild",
            program = %program.display(),
            args = ?args,
            force_env = %self.settings.force_env,
            "running hook executor"
        );

        // The hook tool talks to the user directly, so its streams pass through
        let status = Command::new(&program)
            .args(&args)
            .env(&self.settings.force_env, &self.settings.force_value)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ReloadError::ExecutorUnavailable {
                program: self.settings.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ReloadError::RebuildFailed {
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_direnv() {
        let settings = ExecutorSettings::default();
        assert_eq!(settings.program, "direnv");
        assert_eq!(settings.args, vec!["exec", "{target}", "true"]);
        assert_eq!(settings.force_env, "_nix_direnv_force_reload");
        assert_eq!(settings.force_value, "1");
    }

    #[test]
    fn test_render_args_substitutes_target() {
        let executor = CommandExecutor::new(ExecutorSettings::default());
        let args = executor.render_args(Path::new("/proj"));
        assert_eq!(args, vec!["exec", "/proj", "true"]);
    }

    #[test]
    fn test_unknown_program_is_unavailable() {
        let executor = CommandExecutor::new(ExecutorSettings {
            program: "hookreload-no-such-executor".to_string(),
            ..Default::default()
        });

        let err = executor.rebuild(Path::new("/")).unwrap_err();
        assert!(matches!(err, ReloadError::ExecutorUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_propagated() {
        let executor = CommandExecutor::new(ExecutorSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 7".to_string()],
            ..Default::default()
        });

        let err = executor.rebuild(Path::new("/")).unwrap_err();
        assert!(matches!(err, ReloadError::RebuildFailed { code: Some(7) }));
    }

    #[cfg(unix)]
    #[test]
    fn test_force_flag_is_exported() {
        let executor = CommandExecutor::new(ExecutorSettings {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "test \"$_nix_direnv_force_reload\" = 1".to_string(),
            ],
            ..Default::default()
        });

        executor.rebuild(Path::new("/")).unwrap();
    }
}
