//! Command-line interface definitions.
//!
//! This module defines the CLI structure using clap, including all commands
//! and their arguments.

use crate::tui::BANNER;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filekeep")]
#[command(about = "File and folder manager: classify, list, watch and track files")]
#[command(before_help = BANNER)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the category and icon of each path
    Classify {
        /// Paths to classify; they need not exist
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List a directory with icons and categories
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Include hidden entries
        #[arg(short, long)]
        all: bool,

        /// Print a per-category summary after the listing
        #[arg(short, long)]
        summary: bool,
    },
    /// Poll a directory and report entries as they appear or disappear
    Watch {
        /// Directory to watch
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Polling period in milliseconds (defaults to timing.file_check_interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Include hidden entries
        #[arg(short, long)]
        all: bool,

        /// Add new entries to the tracked items, autosaving periodically
        #[arg(long)]
        track: bool,
    },
    /// Manage tracked files and folders
    Items {
        #[command(subcommand)]
        action: ItemsAction,
    },
    /// Print the data directory and the files kept in it
    Paths,
    /// Print GUI stylesheets rendered with the configured theme
    Styles {
        /// Stylesheet name (main_window, scroll_area, item_widget, dialog, instruction_label, remove_button)
        name: Option<String>,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum ItemsAction {
    /// Show tracked items
    List,
    /// Track files or folders
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Stop tracking a file or folder
    Remove { path: PathBuf },
    /// Forget tracked items that no longer exist
    Prune,
    /// Forget every tracked item
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_list_defaults() {
        let args = Args::try_parse_from(["filekeep", "list"]).unwrap();
        match args.command {
            Commands::List {
                dir,
                recursive,
                all,
                summary,
            } => {
                assert_eq!(dir, PathBuf::from("."));
                assert!(!recursive && !all && !summary);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_watch_interval() {
        let args =
            Args::try_parse_from(["filekeep", "watch", "/tmp", "--interval-ms", "250", "--track"])
                .unwrap();
        match args.command {
            Commands::Watch {
                dir,
                interval_ms,
                track,
                ..
            } => {
                assert_eq!(dir, PathBuf::from("/tmp"));
                assert_eq!(interval_ms, Some(250));
                assert!(track);
            }
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_classify_requires_paths() {
        assert!(Args::try_parse_from(["filekeep", "classify"]).is_err());
    }

    #[test]
    fn test_parse_items_clear() {
        let args = Args::try_parse_from(["filekeep", "items", "clear", "-y"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Items {
                action: ItemsAction::Clear { yes: true }
            }
        ));
    }
}
