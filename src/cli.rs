use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hookreload - Force directory-hook cache rebuilds
///
/// Runs the directory-hook tool with its forced-reload flag, then re-stamps
/// its config marker and generated profiles so the next shell prompt does
/// not rebuild again. Running without a subcommand performs a reload.
#[derive(Parser, Debug)]
#[command(name = "hookreload")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Force directory-hook cache rebuilds", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: CommonConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration arguments shared across commands
#[derive(Parser, Debug, Clone, Default)]
pub struct CommonConfigArgs {
    /// Config file path
    #[arg(short = 'c', long, env = "HOOKRELOAD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Project directory managed by the hook tool
    #[arg(long, env = "HOOKRELOAD_TARGET_DIR", global = true)]
    pub target_dir: Option<PathBuf>,

    /// Hook executor program (default: direnv)
    #[arg(long, env = "HOOKRELOAD_EXECUTOR", global = true)]
    pub executor: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Force a cache rebuild and synchronize timestamps (default)
    Reload,

    /// Show whether the hook tool would consider its cache stale
    Status,

    /// Write a hookreload.toml for a project directory
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project directory to bake into the config (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Overwrite an existing hookreload.toml
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_reload() {
        let cli = Cli::try_parse_from(["hookreload"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_init_with_global_config() {
        let cli = Cli::try_parse_from([
            "hookreload",
            "init",
            "--dir",
            "/proj",
            "--force",
            "--config",
            "/tmp/h.toml",
        ])
        .unwrap();

        assert_eq!(cli.config.config, Some(PathBuf::from("/tmp/h.toml")));
        match cli.command {
            Some(Commands::Init(args)) => {
                assert_eq!(args.dir, Some(PathBuf::from("/proj")));
                assert!(args.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
