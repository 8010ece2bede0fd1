use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "wpm=info";
const LOG_FILE_NAME: &str = "wpm.log";

/// `$XDG_STATE_HOME/wpm/wpm.log` on Linux, the local data dir elsewhere
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wpm").map(|dirs| log_path_in(&dirs))
}

fn log_path_in(dirs: &ProjectDirs) -> PathBuf {
    dirs.state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .join(LOG_FILE_NAME)
}

/// Install a file-backed subscriber. The terminal belongs to the TUI, so
/// nothing is ever written to stdout/stderr.
///
/// Returns the log path on success. Failure leaves logging disabled.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).or_else(default_log_path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .ok()?;

    Some(path)
}
