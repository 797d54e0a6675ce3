//! Tracked items, persisted as JSON.
//!
//! The manager keeps a list of files and folders the user added. It lives in
//! the data file; every save first copies the previous data file over the
//! backup, as long as that data file still parses, and a corrupt or
//! unreadable data file is recovered from the backup on load.

use chrono::{DateTime, Local};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{Category, CategoryTable};
use crate::paths::AppPaths;

const STORE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem {
    pub path: PathBuf,
    pub name: String,
    pub kind: ItemKind,
    pub added_at: DateTime<Local>,
}

impl TrackedItem {
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    items: Vec<TrackedItem>,
}

/// Where a loaded store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Data,
    Backup,
    Empty,
}

#[derive(Debug)]
pub struct ItemStore {
    data_path: PathBuf,
    backup_path: PathBuf,
    items: Vec<TrackedItem>,
    dirty: bool,
}

impl ItemStore {
    /// Loads the store from the data file, falling back to the backup.
    ///
    /// Returns the store and which file it was read from. When neither file
    /// exists the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error only if both files exist and neither can be parsed.
    pub fn load(paths: &AppPaths) -> Result<(Self, LoadSource)> {
        let data_path = paths.data_file_path();
        let backup_path = paths.backup_file_path();

        let (items, source) = match read_store(&data_path) {
            Ok(Some(items)) => (items, LoadSource::Data),
            data_result => match (read_store(&backup_path), data_result) {
                (Ok(Some(items)), _) => (items, LoadSource::Backup),
                (Ok(None), Err(e)) | (Err(e), _) => return Err(e),
                (Ok(None), _) => (Vec::new(), LoadSource::Empty),
            },
        };

        Ok((
            Self {
                data_path,
                backup_path,
                items,
                dirty: false,
            },
            source,
        ))
    }

    pub fn items(&self) -> &[TrackedItem] {
        &self.items
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Adds `path`, made absolute. Returns `false` if it is already tracked.
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist.
    pub fn add(&mut self, path: &Path) -> Result<bool> {
        let path = std::path::absolute(path)
            .wrap_err_with(|| format!("Invalid path {}", path.display()))?;
        if !path.exists() {
            return Err(eyre!("No such file or directory: {}", path.display()));
        }
        if self.items.iter().any(|item| item.path == path) {
            return Ok(false);
        }

        let kind = if path.is_dir() {
            ItemKind::Folder
        } else {
            ItemKind::File
        };
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        self.items.push(TrackedItem {
            path,
            name,
            kind,
            added_at: Local::now(),
        });
        self.dirty = true;
        Ok(true)
    }

    /// Stops tracking `path`. Returns `false` if it wasn't tracked.
    pub fn remove(&mut self, path: &Path) -> bool {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let before = self.items.len();
        self.items.retain(|item| item.path != absolute && item.path != path);

        let removed = self.items.len() != before;
        self.dirty |= removed;
        removed
    }

    /// Drops every tracked item whose path no longer exists. Returns how many.
    pub fn prune_missing(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(TrackedItem::exists);

        let removed = before - self.items.len();
        self.dirty |= removed > 0;
        removed
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.dirty = true;
        }
    }

    /// Tracked items that no longer exist on disk.
    pub fn missing(&self) -> Vec<&TrackedItem> {
        self.items.iter().filter(|item| !item.exists()).collect()
    }

    /// Category of each tracked item, as displayed.
    pub fn classify_items(&self, table: &CategoryTable) -> Vec<(&TrackedItem, Category)> {
        self.items
            .iter()
            .map(|item| (item, table.classify(&item.path).category))
            .collect()
    }

    /// Writes the store, first copying the current data file to the backup.
    ///
    /// A data file that doesn't parse is never copied; the backup keeps the
    /// last good version. The new data file is written next to the old one
    /// and renamed over it.
    pub fn save(&mut self) -> Result<()> {
        match read_store(&self.data_path) {
            Ok(Some(_)) => {
                fs::copy(&self.data_path, &self.backup_path).wrap_err_with(|| {
                    format!("Failed to back up {}", self.data_path.display())
                })?;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Not backing up unreadable data file: {:#}", e),
        }

        let file = StoreFile {
            version: STORE_VERSION,
            items: self.items.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        let staging = self.data_path.with_extension("json.tmp");
        fs::write(&staging, contents)
            .wrap_err_with(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.data_path)
            .wrap_err_with(|| format!("Failed to write {}", self.data_path.display()))?;

        self.dirty = false;
        Ok(())
    }

    /// Saves only if something changed since the last load or save.
    pub fn save_if_dirty(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

/// `Ok(None)` when the file doesn't exist.
fn read_store(path: &Path) -> Result<Option<Vec<TrackedItem>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents =
        fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let file: StoreFile = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Corrupt data file {}", path.display()))?;

    if file.version > STORE_VERSION {
        return Err(eyre!(
            "{} was written by a newer version (format {})",
            path.display(),
            file.version
        ));
    }

    Ok(Some(file.items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        tmp: TempDir,
        paths: AppPaths,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::at(tmp.path().join("data")).unwrap();
        fs::write(tmp.path().join("report.docx"), b"doc").unwrap();
        fs::create_dir(tmp.path().join("photos")).unwrap();
        Fixture { tmp, paths }
    }

    #[test]
    fn test_load_empty() {
        let f = fixture();
        let (store, source) = ItemStore::load(&f.paths).unwrap();

        assert_eq!(source, LoadSource::Empty);
        assert!(store.items().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_add_and_save_round_trip() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();

        assert!(store.add(&f.tmp.path().join("report.docx")).unwrap());
        assert!(store.add(&f.tmp.path().join("photos")).unwrap());
        assert!(!store.add(&f.tmp.path().join("report.docx")).unwrap());
        assert!(store.is_dirty());
        store.save().unwrap();
        assert!(!store.is_dirty());

        let (loaded, source) = ItemStore::load(&f.paths).unwrap();
        assert_eq!(source, LoadSource::Data);
        assert_eq!(loaded.items(), store.items());
        assert_eq!(loaded.items()[0].kind, ItemKind::File);
        assert_eq!(loaded.items()[0].name, "report.docx");
        assert_eq!(loaded.items()[1].kind, ItemKind::Folder);
    }

    #[test]
    fn test_add_missing_path_is_error() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();

        assert!(store.add(&f.tmp.path().join("nope.txt")).is_err());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_save_writes_backup_of_previous_data() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();
        store.add(&f.tmp.path().join("report.docx")).unwrap();
        store.save().unwrap();
        assert!(!f.paths.backup_file_path().exists());

        store.add(&f.tmp.path().join("photos")).unwrap();
        store.save().unwrap();

        let backup = read_store(&f.paths.backup_file_path()).unwrap().unwrap();
        assert_eq!(backup.len(), 1);
        let data = read_store(&f.paths.data_file_path()).unwrap().unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_load_recovers_from_backup() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();
        store.add(&f.tmp.path().join("report.docx")).unwrap();
        store.save().unwrap();
        store.save().unwrap();

        fs::write(f.paths.data_file_path(), "{ not json").unwrap();

        let (loaded, source) = ItemStore::load(&f.paths).unwrap();
        assert_eq!(source, LoadSource::Backup);
        assert_eq!(loaded.items().len(), 1);
    }

    #[test]
    fn test_save_after_recovery_keeps_good_backup() {
        let f = fixture();
        let doc = f.tmp.path().join("report.docx");
        let photos = f.tmp.path().join("photos");
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();
        store.add(&doc).unwrap();
        store.save().unwrap();
        store.save().unwrap();

        fs::write(f.paths.data_file_path(), "{ not json").unwrap();

        let (mut recovered, source) = ItemStore::load(&f.paths).unwrap();
        assert_eq!(source, LoadSource::Backup);
        recovered.add(&photos).unwrap();
        recovered.save().unwrap();

        let backup = read_store(&f.paths.backup_file_path()).unwrap().unwrap();
        assert_eq!(backup.len(), 1);
        assert_eq!(backup[0].path, doc);
        let data = read_store(&f.paths.data_file_path()).unwrap().unwrap();
        assert_eq!(data.len(), 2);
        assert!(!f.paths.data_dir().join("file_manager_data.json.tmp").exists());
    }

    #[test]
    fn test_load_corrupt_without_backup_is_error() {
        let f = fixture();
        fs::write(f.paths.data_file_path(), "[]").unwrap();

        assert!(ItemStore::load(&f.paths).is_err());
    }

    #[test]
    fn test_remove_and_prune() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();
        let doc = f.tmp.path().join("report.docx");
        let photos = f.tmp.path().join("photos");
        store.add(&doc).unwrap();
        store.add(&photos).unwrap();
        store.save().unwrap();

        assert!(store.remove(&photos));
        assert!(!store.remove(&photos));
        assert!(store.is_dirty());

        fs::remove_file(&doc).unwrap();
        assert_eq!(store.missing().len(), 1);
        assert_eq!(store.prune_missing(), 1);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_save_if_dirty() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();

        assert!(!store.save_if_dirty().unwrap());
        assert!(!f.paths.data_file_path().exists());

        store.add(&f.tmp.path().join("photos")).unwrap();
        assert!(store.save_if_dirty().unwrap());
        assert!(f.paths.data_file_path().exists());
    }

    #[test]
    fn test_classify_items() {
        let f = fixture();
        let (mut store, _) = ItemStore::load(&f.paths).unwrap();
        store.add(&f.tmp.path().join("report.docx")).unwrap();
        store.add(&f.tmp.path().join("photos")).unwrap();

        let table = CategoryTable::default();
        let categories: Vec<_> = store
            .classify_items(&table)
            .into_iter()
            .map(|(_, c)| c)
            .collect();

        assert_eq!(categories, vec![Category::Document, Category::Folder]);
    }
}
