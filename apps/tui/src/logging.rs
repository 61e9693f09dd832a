//! Tracing setup for the terminal client.
//!
//! The terminal UI owns stdout and stderr while it runs, so interactive
//! sessions log to a file. Headless runs log to stderr.
//!
//! `RUST_LOG` filters events as usual (default `info`).

use color_eyre::eyre::{Result, WrapErr};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn for_run(interactive: bool, log_file: &Path) -> Self {
        if interactive {
            Self::File(log_file.to_path_buf())
        } else {
            Self::Stderr
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(target: &LogTarget) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;
        }
    }

    Ok(())
}
