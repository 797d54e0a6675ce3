//! Application data directory resolution.
//!
//! [`AppPaths`] is resolved once at startup and handed to every component that
//! reads or writes persistent state.

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "File and Folder Manager";

pub const DATA_FILE: &str = "file_manager_data.json";
pub const BACKUP_FILE: &str = "file_manager_backup.json";
pub const LOG_FILE: &str = "file_manager.log";
pub const CONFIG_FILE: &str = "config.toml";

/// Resolved data directory and the files kept inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Resolves the per-user data directory for `app_name` and creates it if missing.
    ///
    /// On Windows this is `%APPDATA%\<app_name>`. Elsewhere it is
    /// `~/.<app_name>` lower-cased with spaces replaced by underscores.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory cannot be created.
    pub fn resolve(app_name: &str) -> Result<Self> {
        let base = data_root_from(|key| std::env::var(key).ok())?;
        Self::resolve_in(&base, app_name)
    }

    /// Like [`AppPaths::resolve`], with the base directory given instead of
    /// read from the environment.
    pub fn resolve_in(base: &Path, app_name: &str) -> Result<Self> {
        Self::at(base.join(dir_name(app_name)))
    }

    /// Uses `data_dir` as the data directory, creating it if missing.
    ///
    /// Only the final component is created; a missing parent is an error.
    pub fn at(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        ensure_dir(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    pub fn backup_file_path(&self) -> PathBuf {
        self.data_dir.join(BACKUP_FILE)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

/// Name of the data directory for `app_name` on the current platform.
pub fn dir_name(app_name: &str) -> String {
    if cfg!(windows) {
        app_name.to_string()
    } else {
        format!(".{}", app_name.to_lowercase().replace(' ', "_"))
    }
}

/// Base directory the data directory lives under, reading variables through `env`.
///
/// `APPDATA` on Windows when set, otherwise the home directory (`HOME`, then
/// `USERPROFILE`).
pub fn data_root_from<F>(env: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if cfg!(windows) {
        if let Some(appdata) = env("APPDATA") {
            return Ok(PathBuf::from(appdata));
        }
    }

    env("HOME")
        .or_else(|| env("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| eyre!("Could not determine home directory"))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e).wrap_err_with(|| {
            format!("Failed to create data directory {}", dir.display())
        }),
    }
}
