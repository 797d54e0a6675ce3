//! Polling directory monitor.
//!
//! Re-reads a directory on a fixed interval and reports entries that appeared
//! or disappeared since the previous poll, classified for display. Each read
//! runs on the blocking pool; the watcher only reads the classifier table.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::classify::{CategoryTable, Classification};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
    /// For removed entries, the classification they had when last seen
    pub classification: Classification,
}

pub type Snapshot = BTreeMap<PathBuf, Classification>;

/// Reads the top level of `dir` and classifies each entry.
pub fn snapshot(dir: &Path, table: &CategoryTable, include_hidden: bool) -> Result<Snapshot> {
    let mut entries = Snapshot::new();

    let read_dir = std::fs::read_dir(dir)
        .wrap_err_with(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in read_dir {
        // Entries can vanish between readdir and stat; skip them
        let Ok(entry) = entry else { continue };
        if !include_hidden && entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let classification = table.classify(&path);
        entries.insert(path, classification);
    }

    Ok(entries)
}

/// Entries added in `new` and removed from `old`, added first, each in path order.
pub fn diff(old: &Snapshot, new: &Snapshot) -> Vec<WatchEvent> {
    let added = new
        .iter()
        .filter(|(path, _)| !old.contains_key(*path))
        .map(|(path, classification)| WatchEvent {
            kind: ChangeKind::Added,
            path: path.clone(),
            classification: *classification,
        });

    let removed = old
        .iter()
        .filter(|(path, _)| !new.contains_key(*path))
        .map(|(path, classification)| WatchEvent {
            kind: ChangeKind::Removed,
            path: path.clone(),
            classification: *classification,
        });

    added.chain(removed).collect()
}

pub struct DirectoryWatcher {
    dir: PathBuf,
    table: Arc<CategoryTable>,
    include_hidden: bool,
    known: Snapshot,
}

impl DirectoryWatcher {
    /// Takes the initial snapshot of `dir`.
    pub fn new(dir: impl Into<PathBuf>, table: Arc<CategoryTable>, include_hidden: bool) -> Result<Self> {
        let dir = dir.into();
        let known = snapshot(&dir, &table, include_hidden)?;
        Ok(Self {
            dir,
            table,
            include_hidden,
            known,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entries as of the last poll.
    pub fn known(&self) -> &Snapshot {
        &self.known
    }

    /// Re-reads the directory and returns what changed since the last poll.
    pub async fn poll(&mut self) -> Result<Vec<WatchEvent>> {
        let dir = self.dir.clone();
        let table = Arc::clone(&self.table);
        let include_hidden = self.include_hidden;

        let current =
            task::spawn_blocking(move || snapshot(&dir, &table, include_hidden)).await??;

        let events = diff(&self.known, &current);
        self.known = current;
        Ok(events)
    }

    /// Polls every `period` until Ctrl-C, or until `max_polls` polls have run.
    ///
    /// With `autosave` set, [`WatchHandler::on_autosave`] also fires on that
    /// period, whether or not anything changed.
    pub async fn run<H>(
        mut self,
        period: Duration,
        autosave: Option<Duration>,
        max_polls: Option<u64>,
        handler: &mut H,
    ) -> Result<()>
    where
        H: WatchHandler + ?Sized,
    {
        let mut poll_ticker = ticker(period).await;
        let mut save_ticker = match autosave {
            Some(every) => Some(ticker(every).await),
            None => None,
        };

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut polls = 0u64;
        loop {
            if max_polls.is_some_and(|max| polls >= max) {
                return Ok(());
            }

            tokio::select! {
                _ = poll_ticker.tick() => {
                    let events = self.poll().await?;
                    if !events.is_empty() {
                        handler.on_events(&events)?;
                    }
                    polls += 1;
                }
                _ = next_tick(save_ticker.as_mut()) => handler.on_autosave()?,
                _ = &mut ctrl_c => return Ok(()),
            }
        }
    }
}

/// Receives what a running [`DirectoryWatcher`] observes.
pub trait WatchHandler {
    /// Called after each poll that found changes.
    fn on_events(&mut self, events: &[WatchEvent]) -> Result<()>;

    /// Called once per autosave period.
    fn on_autosave(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<F> WatchHandler for F
where
    F: FnMut(&[WatchEvent]) -> Result<()>,
{
    fn on_events(&mut self, events: &[WatchEvent]) -> Result<()> {
        self(events)
    }
}

async fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    ticker.tick().await;
    ticker
}

async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
