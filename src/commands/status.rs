use anyhow::Result;

use crate::cli::CommonConfigArgs;
use crate::cli_utils::{format_mtime, report_missing_directory};
use crate::coordinator::ReloadCoordinator;
use crate::error::ReloadError;
use crate::state::ReloadRecord;

pub fn run(args: &CommonConfigArgs) -> Result<()> {
    let settings = super::load_settings(args)?;
    let coordinator = ReloadCoordinator::new(settings);
    let freshness = match coordinator.freshness() {
        Ok(freshness) => freshness,
        Err(err) => {
            if let ReloadError::MissingDirectory { path } = &err {
                report_missing_directory(path, &coordinator.settings().executor.program);
            }
            return Err(err.into());
        }
    };

    println!("Target:  {}", coordinator.target_dir().display());
    println!(
        "Marker:  {} ({})",
        coordinator.marker_path().display(),
        format_mtime(freshness.marker_mtime)
    );

    if freshness.artifacts.is_empty() {
        println!("Artifacts: none found");
    } else {
        println!("Artifacts:");
        for artifact in &freshness.artifacts {
            let state = if artifact.stale { "stale" } else { "fresh" };
            println!(
                "  {:5}  {}  {}",
                state,
                format_mtime(artifact.mtime),
                artifact.path.display()
            );
        }
    }

    match ReloadRecord::load(coordinator.target_dir()) {
        Ok(Some(record)) => println!(
            "Last forced reload: {} ({} artifacts)",
            record.reloaded_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
            record.artifact_count
        ),
        Ok(None) => println!("Last forced reload: never"),
        Err(e) => tracing::warn!("could not read reload record: {:#}", e),
    }

    if !freshness.is_fresh() {
        let stale = freshness.artifacts.iter().filter(|a| a.stale).count();
        anyhow::bail!(
            "{} artifact(s) older than the marker; the hook tool will rebuild on next use",
            stale
        );
    }

    Ok(())
}
