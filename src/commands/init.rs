use anyhow::{Context, Result};
use std::fs;

use crate::cli::{CommonConfigArgs, InitArgs};
use crate::config::{HookreloadConfig, CONFIG_FILE_NAME};

pub fn run(common: &CommonConfigArgs, args: &InitArgs) -> Result<()> {
    let dir = match args.dir.as_ref().or(common.target_dir.as_ref()) {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let target_dir = dir
        .canonicalize()
        .with_context(|| format!("Project directory not found: {}", dir.display()))?;

    let config_path = common
        .config
        .clone()
        .unwrap_or_else(|| target_dir.join(CONFIG_FILE_NAME));

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite",
            config_path.display()
        );
    }

    let mut config = HookreloadConfig::for_target(target_dir);
    if let Some(program) = &common.executor {
        config.executor.program = program.clone();
    }

    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    Ok(())
}
