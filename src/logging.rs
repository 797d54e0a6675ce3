//! Log file setup.
//!
//! Everything in the crate logs through the `log` macros. [`init`] installs a
//! log4rs logger once at startup, writing to `file_manager.log` in the data
//! directory and rolling it over once it grows past `logging.max_size_bytes`.
//! Rolled files are named `file_manager.log.1` (newest) up to
//! `file_manager.log.<backup_count>`; older ones are deleted.

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::policy::compound::roll::Roll;
use log4rs::append::rolling_file::policy::compound::roll::delete::DeleteRoller;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::config::LoggingConfig;
use crate::paths::AppPaths;

/// `2024-01-31 12:00:00,123 - filekeep::commands - INFO - message`
pub const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S,%3f)} - {M} - {l} - {m}{n}";

const APPENDER: &str = "file";

/// Builds the log4rs configuration for a rolling log at `log_path`.
pub fn build_config(log_path: &Path, settings: &LoggingConfig) -> Result<Config> {
    let roller: Box<dyn Roll> = if settings.backup_count == 0 {
        Box::new(DeleteRoller::new())
    } else {
        let pattern = format!("{}.{{}}", log_path.display());
        Box::new(
            FixedWindowRoller::builder()
                .build(&pattern, settings.backup_count)
                .map_err(|e| eyre!("Invalid log roll pattern '{}': {}", pattern, e))?,
        )
    };
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(settings.max_size_bytes)), roller);

    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(log_path, Box::new(policy))
        .wrap_err_with(|| format!("Failed to open log file {}", log_path.display()))?;

    Config::builder()
        .appender(Appender::builder().build(APPENDER, Box::new(appender)))
        .build(Root::builder().appender(APPENDER).build(settings.level))
        .map_err(|e| eyre!("Invalid logging configuration: {}", e))
}

/// Installs the global logger. Call once, after the configuration is loaded.
pub fn init(paths: &AppPaths, settings: &LoggingConfig) -> Result<log4rs::Handle> {
    let config = build_config(&paths.log_file_path(), settings)?;
    let handle = log4rs::init_config(config).wrap_err("Logger already installed")?;
    log::debug!("Logging to {}", paths.log_file_path().display());
    Ok(handle)
}
