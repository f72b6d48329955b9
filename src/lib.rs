// Library interface for hookreload
// This allows integration tests and external code to use hookreload's modules

pub mod artifacts;
pub mod cli;
pub mod cli_utils;
pub mod commands;
pub mod config;
pub mod config_discovery;
pub mod coordinator;
pub mod error;
pub mod executor;
pub mod logging;
pub mod state;
pub mod timestamps;
pub mod xdg;

// Re-export commonly used types
pub use artifacts::{ArtifactSpec, EmptyArtifactsPolicy};
pub use config::HookreloadConfig;
pub use coordinator::{Freshness, ReloadCoordinator, ReloadOutcome, ReloadSettings};
pub use error::ReloadError;
pub use executor::{CommandExecutor, ExecutorSettings, HookExecutor};
