//! Tracing setup
//!
//! The terminal UI owns stdout/stderr while it runs, so it logs to a file in
//! the user cache directory. Non-interactive commands log to stderr.

use crate::error::Result;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Default log file for interactive sessions (~/.cache/nsi-explorer/nsi-explorer.log)
    pub fn default_file() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("nsi-explorer").join("nsi-explorer.log"))
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides `level` when set. Returns an error if the log file
/// cannot be created; calling it twice in one process is a no-op.
pub fn init_tracing(level: &str, json: bool, target: &LogTarget) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = match target {
        LogTarget::Stderr => {
            let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
            if json {
                Registry::default()
                    .with(env_filter)
                    .with(layer.json())
                    .try_init()
            } else {
                Registry::default().with(env_filter).with(layer).try_init()
            }
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = File::options().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            if json {
                Registry::default()
                    .with(env_filter)
                    .with(layer.json())
                    .try_init()
            } else {
                Registry::default().with(env_filter).with(layer).try_init()
            }
        }
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }

    tracing::debug!(level, json, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_location() {
        if let Some(path) = LogTarget::default_file() {
            assert!(path.ends_with("nsi-explorer/nsi-explorer.log"));
        }
    }

    #[test]
    fn test_init_creates_log_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("explorer.log");

        init_tracing("debug", false, &LogTarget::File(path.clone())).unwrap();

        assert!(path.exists());
    }
}
