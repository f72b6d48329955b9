use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while forcing a directory-hook reload
#[derive(Error, Debug)]
pub enum ReloadError {
    #[error("Target directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("Hook executor exited with {}", describe_code(*code))]
    RebuildFailed { code: Option<i32> },

    #[error("Failed to launch hook executor '{program}': {source}")]
    ExecutorUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to update timestamp of {}: {source}", path.display())]
    Timestamp {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Profile artifact listed but not present: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("No profile artifacts found under {}", target.display())]
    NoArtifacts { target: PathBuf },

    #[error("Failed to read artifact manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid artifact pattern '{pattern}': {reason}")]
    Glob { pattern: String, reason: String },
}

impl ReloadError {
    /// Process exit code for this error.
    ///
    /// A failed rebuild propagates the executor's own status so callers see
    /// the same code they would get running the hook tool directly.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReloadError::RebuildFailed { code: Some(code) } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_failed_propagates_exit_code() {
        let err = ReloadError::RebuildFailed { code: Some(3) };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Hook executor exited with status 3");
    }

    #[test]
    fn test_signal_termination_maps_to_one() {
        let err = ReloadError::RebuildFailed { code: None };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_missing_directory_exits_one() {
        let err = ReloadError::MissingDirectory {
            path: PathBuf::from("/proj"),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Target directory not found: /proj");
    }
}
