use anyhow::Context;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable holding the env_logger filter.
pub const LOG_ENV_VAR: &str = "UFO_GAME_LOG";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_DIR_NAME: &str = "ufo-game";
const LOG_FILE_NAME: &str = "ufo-game.log";

// Conditional logging macros - only active in debug builds.
// Release builds still type-check the arguments so they never go unused.

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Default log file under the user's local data directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Route `log` records to `path` (or the default log file).
///
/// The terminal belongs to the game, so nothing is ever written to stderr.
/// Returns the file in use, or `None` when there is nowhere to log to.
pub fn init_logging(path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(LOG_ENV_VAR, DEFAULT_LOG_FILTER),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    })
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init()
    .context("installing logger")?;

    log::info!("logging to {}", path.display());
    Ok(Some(path))
}
