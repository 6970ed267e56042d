//! Command-line and environment configuration.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/usuario";

/// TUI to list, create, edit and delete records of a REST usuario collection.
#[derive(Debug, Clone, Parser)]
#[command(name = "usuarios-tui", version, about)]
pub struct Cli {
    /// Collection endpoint; items live at `<base-url>/<id>`.
    #[arg(long, env = "USUARIOS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds; 0 disables it. Only one request runs
    /// at a time, so with 0 a server that never answers blocks every later
    /// submit and reload until restart.
    #[arg(long, env = "USUARIOS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Where to write the log (the terminal belongs to the UI).
    #[arg(long, env = "USUARIOS_LOG_FILE", default_value = "usuarios-tui.log")]
    pub log_file: PathBuf,

    /// Log filter used when RUST_LOG is unset, e.g. `debug` or `usuarios_tui=trace`.
    #[arg(long, env = "USUARIOS_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
