//! Command handlers.
//!
//! [`App`] is built once at startup from the resolved data directory and the
//! loaded configuration, then handed to whichever handler the CLI selected.

use color_eyre::Result;
use color_eyre::eyre::eyre;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classify::CategoryTable;
use crate::cli::ItemsAction;
use crate::config::Config;
use crate::paths::AppPaths;
use crate::scanner::{ScanOptions, scan_directory};
use crate::store::{ItemStore, LoadSource};
use crate::styles::Stylesheet;
use crate::tui::{Mode, UI};
use crate::watch::{ChangeKind, DirectoryWatcher, WatchEvent, WatchHandler};

/// Everything a command needs, resolved once.
pub struct App {
    pub paths: AppPaths,
    pub config: Config,
    pub table: Arc<CategoryTable>,
    pub ui: UI,
}

impl App {
    /// Loads configuration from `paths` and builds the classifier table.
    pub fn new(paths: AppPaths) -> Result<Self> {
        let config = Config::load(&paths)?;
        let table = Arc::new(CategoryTable::with_extra(&config.categories)?);
        let ui = UI::new(&config.theme);

        Ok(Self {
            paths,
            config,
            table,
            ui,
        })
    }

    fn scan_options(&self, recursive: bool, include_hidden: bool) -> ScanOptions {
        ScanOptions {
            recursive,
            include_hidden,
            max_detail_size: self.config.limits.max_file_size_bytes(),
        }
    }
}

pub fn handle_classify(app: &App, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let result = app.table.classify(path);
        app.ui
            .print_classification(&path.display().to_string(), result.category, result.glyph)?;
    }
    Ok(())
}

pub async fn handle_list(
    app: &App,
    dir: &Path,
    recursive: bool,
    include_hidden: bool,
    summary: bool,
) -> Result<()> {
    let spinner = app.ui.create_spinner(&format!("Reading {}", dir.display()));
    let stats = scan_directory(
        dir,
        Arc::clone(&app.table),
        app.scan_options(recursive, include_hidden),
        |_| {},
    )
    .await;
    spinner.finish_and_clear();
    let stats = stats?;

    if summary {
        app.ui.print_banner_with_mode(&Mode::List)?;
    }
    app.ui.print_listing(&stats)?;
    if summary {
        app.ui.print_summary("SUMMARY", &stats)?;
    }

    if !stats.errors.is_empty() {
        app.ui.print_warning(&format!(
            "{} entr(ies) skipped due to permission errors or I/O failures",
            stats.errors.len()
        ))?;
        for error in &stats.errors {
            log::warn!("{}", error);
        }
    }

    log::debug!("Listed {} ({} entries)", dir.display(), stats.total_entries());
    Ok(())
}

/// Prints watch events and, with tracking on, adds new entries to the store.
struct WatchTracker<'a> {
    ui: &'a UI,
    store: Option<ItemStore>,
    changes: usize,
}

impl WatchHandler for WatchTracker<'_> {
    fn on_events(&mut self, events: &[WatchEvent]) -> Result<()> {
        self.changes += events.len();
        self.ui.print_watch_events(events)?;

        if let Some(store) = self.store.as_mut() {
            for event in events.iter().filter(|e| e.kind == ChangeKind::Added) {
                // The entry may already be gone again
                if let Err(e) = store.add(&event.path) {
                    log::debug!("Not tracking {}: {:#}", event.path.display(), e);
                }
            }
        }
        Ok(())
    }

    fn on_autosave(&mut self) -> Result<()> {
        if let Some(store) = self.store.as_mut() {
            if store.save_if_dirty()? {
                log::debug!("Autosaved {} tracked item(s)", store.items().len());
            }
        }
        Ok(())
    }
}

/// Watches `dir` until Ctrl-C.
///
/// With `track`, entries that appear are added to the tracked items, which
/// are saved every `timing.autosave_interval_ms` and once more on exit.
pub async fn handle_watch(
    app: &App,
    dir: &Path,
    interval_ms: Option<u64>,
    include_hidden: bool,
    track: bool,
) -> Result<()> {
    let period = match interval_ms {
        Some(ms) => std::time::Duration::from_millis(ms.max(1)),
        None => app.config.timing.file_check_interval(),
    };

    let watcher = DirectoryWatcher::new(dir, Arc::clone(&app.table), include_hidden)?;
    let (store, autosave) = if track {
        (Some(load_store(app)?), Some(app.config.timing.autosave_interval()))
    } else {
        (None, None)
    };

    app.ui.print_banner_with_mode(&Mode::Watch)?;
    app.ui.print_info(&format!(
        "Watching {} every {} ms ({} entries). Press Ctrl-C to stop.",
        watcher.dir().display(),
        period.as_millis(),
        watcher.known().len()
    ))?;
    log::info!("Watching {}", watcher.dir().display());

    let mut tracker = WatchTracker {
        ui: &app.ui,
        store,
        changes: 0,
    };
    watcher.run(period, autosave, None, &mut tracker).await?;

    if let Some(store) = tracker.store.as_mut() {
        if store.save_if_dirty()? {
            app.ui.print_success("Tracked items saved")?;
        }
    }

    log::info!(
        "Stopped watching {} after {} change(s)",
        dir.display(),
        tracker.changes
    );
    Ok(())
}

pub fn handle_items(app: &App, action: ItemsAction) -> Result<()> {
    let mut store = load_store(app)?;

    match action {
        ItemsAction::List => {
            app.ui.print_banner_with_mode(&Mode::Items)?;
            let items = store.classify_items(&app.table);
            app.ui.print_items(&items)?;

            let missing = store.missing().len();
            if missing > 0 {
                app.ui.print_warning(&format!(
                    "{} tracked item(s) no longer exist; `items prune` removes them",
                    missing
                ))?;
            }
        }
        ItemsAction::Add { paths } => {
            for path in &paths {
                match store.add(path) {
                    Ok(true) => app.ui.print_success(&format!("Tracking {}", path.display()))?,
                    Ok(false) => app
                        .ui
                        .print_info(&format!("Already tracked: {}", path.display()))?,
                    Err(e) => {
                        app.ui.print_error(&e.to_string())?;
                        log::error!("{:#}", e);
                    }
                }
            }
        }
        ItemsAction::Remove { path } => {
            if store.remove(&path) {
                app.ui
                    .print_success(&format!("No longer tracking {}", path.display()))?;
            } else {
                return Err(eyre!("Not tracked: {}", path.display()));
            }
        }
        ItemsAction::Prune => {
            let removed = store.prune_missing();
            app.ui
                .print_success(&format!("Removed {} missing item(s)", removed))?;
        }
        ItemsAction::Clear { yes } => {
            let count = store.items().len();
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Forget all {} tracked item(s)?", count))
                    .default(false)
                    .interact()?;
            if confirmed {
                store.clear();
                app.ui.print_success("Cleared tracked items")?;
            }
        }
    }

    if store.save_if_dirty()? {
        log::info!("Saved {} tracked item(s)", store.items().len());
    }
    Ok(())
}

pub fn handle_paths(app: &App) -> Result<()> {
    let rows = [
        ("data dir", app.paths.data_dir().to_path_buf()),
        ("data", app.paths.data_file_path()),
        ("backup", app.paths.backup_file_path()),
        ("log", app.paths.log_file_path()),
        ("config", app.paths.config_file_path()),
    ];
    for (label, path) in rows {
        app.ui.term.write_line(&format!("{:<9} {}", label, path.display()))?;
    }
    Ok(())
}

pub fn handle_styles(app: &App, name: Option<&str>) -> Result<()> {
    let sheets = match name {
        Some(name) => vec![
            Stylesheet::from_name(name).ok_or_else(|| eyre!("Unknown stylesheet '{}'", name))?,
        ],
        None => Stylesheet::ALL.to_vec(),
    };

    for sheet in sheets {
        app.ui.term.write_line(&format!("/* {} */", sheet))?;
        app.ui
            .term
            .write_line(&sheet.render(&app.config.theme, &app.config.visual))?;
    }
    Ok(())
}

pub fn handle_config(app: &App) -> Result<()> {
    app.ui.term.write_line(&format!(
        "# {}",
        app.paths.config_file_path().display()
    ))?;
    app.ui.term.write_line(&toml::to_string_pretty(&app.config)?)?;

    app.ui.term.write_line("# Effective extension table")?;
    for rule in app.table.rules() {
        app.ui.term.write_line(&format!(
            "# {:<12} {}",
            rule.category.key(),
            rule.extensions.join(" ")
        ))?;
    }
    Ok(())
}

fn load_store(app: &App) -> Result<ItemStore> {
    let (store, source) = ItemStore::load(&app.paths)?;
    if source == LoadSource::Backup {
        let message = format!(
            "{} was unreadable, restored tracked items from {}",
            app.paths.data_file_path().display(),
            app.paths.backup_file_path().display()
        );
        app.ui.print_warning(&message)?;
        log::warn!("{}", message);
    }
    Ok(store)
}
