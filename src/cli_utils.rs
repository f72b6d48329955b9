/// CLI utilities for consistent output formatting
use std::io::IsTerminal;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Get a colored prefix
///
/// Returns bright cyan if stderr is a TTY, plain text otherwise.
pub fn hookreload_prefix() -> &'static str {
    if std::io::stderr().is_terminal() {
        "\x1b[96m[hookreload]\x1b[0m"
    } else {
        "[hookreload]"
    }
}

/// Render a file timestamp in local time
pub fn format_mtime(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Explain a vanished target directory and how to recover by hand
pub fn report_missing_directory(path: &Path, program: &str) {
    let prefix = hookreload_prefix();
    eprintln!(
        "{} Cannot find target directory {}; did you move it?",
        prefix,
        path.display()
    );
    eprintln!(
        "{} Cannot force reload; run \"{} reload\" manually and try again",
        prefix, program
    );
}
