//! File logging for the kiosk.
//!
//! The terminal belongs to the UI, so log lines go to a file. `RUST_LOG`
//! overrides the default `info` filter.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "stockscan.log";

/// Default log location: `<data_dir>/stockscan/stockscan.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockscan")
        .join(LOG_FILE_NAME)
}

/// Install the global subscriber writing to `path` (or the default path).
///
/// Returns the file actually used, or `None` when it could not be opened;
/// the kiosk then runs without logs.
pub fn init_logging(path: Option<&Path>) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Warning: cannot create log directory {}: {}", parent.display(), err);
            return None;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), err);
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    // A subscriber may already be installed (tests, embedding); keep it.
    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with("stockscan/stockscan.log"));
    }

    #[test]
    fn unwritable_location_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        // A regular file cannot be a parent directory.
        assert!(init_logging(Some(&blocker.join("app.log"))).is_none());
    }
}
