use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{HookreloadConfig, CONFIG_FILE_NAME};
use crate::xdg;

/// Discovers hookreload configuration by traversing up the directory tree
pub fn discover_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Ok(Some(config_path));
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    // Fallback to global config
    if let Some(config_dir) = xdg::config_dir() {
        let global_config = config_dir.join("config.toml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// Loads configuration with auto-discovery support
///
/// If `explicit_path` is provided, loads config from that path.
/// Otherwise, auto-discovers config by traversing up directory tree from cwd.
///
/// Returns defaults when nothing is found, so environment overrides alone
/// can still produce a usable configuration.
pub fn load_config_with_discovery(explicit_path: Option<&Path>) -> Result<HookreloadConfig> {
    if let Some(config_path) = explicit_path {
        return HookreloadConfig::from_file(config_path);
    }

    let current_dir =
        std::env::current_dir().context("Failed to get current directory for config discovery")?;

    match discover_config(&current_dir)? {
        Some(config_path) => {
            tracing::debug!(path = %config_path.display(), "using discovered config");
            HookreloadConfig::from_file(&config_path)
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(HookreloadConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_discover_config_finds_nearest() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        let subdir = project.join("src").join("nested");
        fs::create_dir_all(&subdir).unwrap();

        let config_path = project.join(CONFIG_FILE_NAME);
        fs::write(&config_path, "target_dir = \".\"").unwrap();

        let found = discover_config(&subdir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    #[serial]
    fn test_discover_config_falls_back_to_global() {
        let temp = TempDir::new().unwrap();
        let xdg_config = temp.path().join("xdg");
        let global_dir = xdg_config.join("hookreload");
        fs::create_dir_all(&global_dir).unwrap();
        fs::write(global_dir.join("config.toml"), "").unwrap();

        let project = temp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        std::env::set_var("XDG_CONFIG_HOME", &xdg_config);
        let found = discover_config(&project).unwrap();
        std::env::remove_var("XDG_CONFIG_HOME");

        assert_eq!(found, Some(global_dir.join("config.toml")));
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("custom.toml");
        fs::write(&config_path, "target_dir = \"/srv/app\"").unwrap();

        let config = load_config_with_discovery(Some(&config_path)).unwrap();
        assert_eq!(config.target_dir, Some(PathBuf::from("/srv/app")));
    }
}
