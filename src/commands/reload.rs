use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::cli::CommonConfigArgs;
use crate::cli_utils::report_missing_directory;
use crate::coordinator::{ReloadCoordinator, ReloadOutcome};
use crate::error::ReloadError;
use crate::executor::CommandExecutor;
use crate::state::ReloadRecord;

pub fn run(args: &CommonConfigArgs) -> Result<()> {
    let settings = super::load_settings(args)?;
    let executor = CommandExecutor::new(settings.executor.clone());
    let coordinator = ReloadCoordinator::new(settings);

    match coordinator.force_reload(&executor) {
        Ok(outcome) => {
            save_record(&coordinator, &outcome);
            Ok(())
        }
        Err(err) => {
            if let ReloadError::MissingDirectory { path } = &err {
                report_missing_directory(path, &coordinator.settings().executor.program);
            }
            Err(err.into())
        }
    }
}

fn save_record(coordinator: &ReloadCoordinator, outcome: &ReloadOutcome) {
    let record = ReloadRecord {
        target_dir: coordinator.target_dir().to_path_buf(),
        reloaded_at: Utc::now(),
        marker_mtime: DateTime::<Utc>::from(outcome.marker_mtime),
        artifact_count: outcome.artifacts.len(),
    };

    // The reload itself already succeeded; a missing record only affects `status`
    if let Err(e) = record.save() {
        tracing::warn!(
            operation = "reload.record",
            status = "error",
            "failed to save reload record: {:#}",
            e
        );
    }
}
