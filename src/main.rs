use anyhow::Result;
use clap::Parser;

use hookreload::cli::{Cli, Commands};
use hookreload::cli_utils::hookreload_prefix;
use hookreload::{commands, logging, ReloadError};

fn main() {
    // Initialize structured logging
    logging::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Err(err) = dispatch(cli) {
        let code = match err.downcast_ref::<ReloadError>() {
            // Already reported with remediation text
            Some(reload_err @ ReloadError::MissingDirectory { .. }) => reload_err.exit_code(),
            Some(reload_err) => {
                eprintln!("{} {}", hookreload_prefix(), reload_err);
                reload_err.exit_code()
            }
            None => {
                eprintln!("{} {:#}", hookreload_prefix(), err);
                1
            }
        };
        std::process::exit(code);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        None | Some(Commands::Reload) => commands::reload::run(&cli.config),
        Some(Commands::Status) => commands::status::run(&cli.config),
        Some(Commands::Init(args)) => commands::init::run(&cli.config, &args),
    }
}
