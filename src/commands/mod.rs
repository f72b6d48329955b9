pub mod init;
pub mod reload;
pub mod status;

use anyhow::Result;

use crate::cli::CommonConfigArgs;
use crate::config_discovery::load_config_with_discovery;
use crate::coordinator::ReloadSettings;

/// Resolve coordinator settings from config file, discovery, and overrides
pub(crate) fn load_settings(args: &CommonConfigArgs) -> Result<ReloadSettings> {
    let mut config = load_config_with_discovery(args.config.as_deref())?;
    config.apply_overrides(args.target_dir.clone(), args.executor.clone());
    config.into_settings()
}
