//! tracing setup. The terminal is owned by the UI, so events go to a file.
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global subscriber writing to `path`. `RUST_LOG` wins over
/// `default_filter`.
pub fn init(path: &Path, default_filter: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_thread_names(true)
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter '{default_filter}'"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    tracing::info!(log = %path.display(), "tracing initialized");
    Ok(())
}
