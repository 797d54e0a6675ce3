//! # filekeep - File and Folder Manager Core
//!
//! The non-GUI core of a desktop file and folder manager. It decides which
//! category and icon a filesystem entry is shown with, finds the per-user
//! directory where the manager keeps its state, and carries the configuration
//! (window sizes, polling intervals, theme colors, stylesheets) the GUI layer
//! reads.
//!
//! ## Features
//!
//! - **File Classification**: Maps paths to one of eleven categories and an icon
//!   glyph by extension; directories are always folders
//! - **Data Directory Resolution**: `%APPDATA%\File and Folder Manager` on Windows,
//!   `~/.file_and_folder_manager` elsewhere, created on first use
//! - **Theme and Stylesheets**: Eighteen named colors and Qt-style sheets rendered from them
//! - **Tracked Items**: JSON data store with an automatic backup copy
//! - **Rotating Log**: log4rs file appender, size-capped with a bounded number of backups
//! - **Directory Watching**: Polls a directory and reports entries as they come and go
//!
//! ## Command Line Usage
//!
//! ```bash
//! # Classify paths (they need not exist)
//! filekeep classify ~/report.docx ~/archive.tar.gz
//!
//! # List a directory with icons and a summary
//! filekeep list ~/Downloads --summary
//!
//! # Watch a directory on the configured polling interval
//! filekeep watch ~/Downloads --track
//!
//! # Manage tracked items
//! filekeep items add ~/Projects ~/notes.txt
//! filekeep items list
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use filekeep::classify::CategoryTable;
//! use filekeep::config::Config;
//! use filekeep::paths::{APP_NAME, AppPaths};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let paths = AppPaths::resolve(APP_NAME)?;
//!     let config = Config::load(&paths)?;
//!     let table = CategoryTable::with_extra(&config.categories)?;
//!
//!     let result = table.classify("/tmp/holiday.JPG");
//!     println!("{} {}", result.glyph, result.category);
//!     println!("Data file: {}", paths.data_file_path().display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! `config.toml` in the data directory. On first run, a default configuration
//! is created automatically; missing keys fall back to defaults.
//!
//! ## Module Organization
//!
//! - [`classify`]: Category table and path classification
//! - [`cli`]: Command-line argument parsing
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration management
//! - [`logging`]: Rotating log file setup
//! - [`paths`]: Data directory resolution
//! - [`scanner`]: Directory listing and statistics
//! - [`store`]: Tracked items data store
//! - [`styles`]: GUI stylesheets
//! - [`tui`]: Terminal user interface components
//! - [`watch`]: Polling directory monitor

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod paths;
pub mod scanner;
pub mod store;
pub mod styles;
pub mod tui;
pub mod watch;

// Re-export commonly used types
pub use classify::{Category, CategoryTable, Classification};
pub use config::Config;
pub use paths::AppPaths;
