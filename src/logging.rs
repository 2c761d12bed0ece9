//! src/logging.rs
//!
//! Tracing setup. Output goes to a file since the terminal is in raw mode.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins over `fallback` when set.
fn filter(fallback: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback)
            .wrap_err_with(|| format!("invalid log level {fallback:?}")),
    }
}

pub fn init(path: &Path, fallback: &str) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(filter(fallback)?)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .wrap_err("tracing subscriber already installed")?;
    Ok(())
}
