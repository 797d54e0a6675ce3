//! Directory listing and classification.
//!
//! Walks a directory, classifies every entry with a [`CategoryTable`] and
//! collects per-category statistics. Hidden entries are skipped unless asked
//! for.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;
use walkdir::WalkDir;

use crate::classify::{Category, CategoryTable, Classification};

/// Options controlling a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Walk subdirectories instead of listing only the top level
    pub recursive: bool,
    pub include_hidden: bool,
    /// Entries larger than this are listed without modification details
    pub max_detail_size: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            include_hidden: false,
            max_detail_size: 1024 * 1024 * 1024,
        }
    }
}

/// A classified directory entry.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub path: PathBuf,
    pub name: String,
    /// Size in bytes; zero for folders
    pub size: u64,
    pub classification: Classification,
    /// Only filled in for entries within the detail size limit
    pub modified: Option<DateTime<Local>>,
}

impl EntryInfo {
    pub fn category(&self) -> Category {
        self.classification.category
    }
}

/// Statistics collected during a scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    pub entries: Vec<EntryInfo>,
    pub total_size: u64,
    pub errors: Vec<String>,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: EntryInfo) {
        self.total_size += entry.size;
        self.entries.push(entry);
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns `(category, count, total_size)` rows sorted by count, descending.
    pub fn get_summary(&self) -> Vec<(Category, usize, u64)> {
        let mut by_category: BTreeMap<Category, (usize, u64)> = BTreeMap::new();
        for entry in &self.entries {
            let slot = by_category.entry(entry.category()).or_default();
            slot.0 += 1;
            slot.1 += entry.size;
        }

        let mut summary: Vec<_> = by_category
            .into_iter()
            .map(|(category, (count, size))| (category, count, size))
            .collect();

        // Stable sort keeps category order for equal counts
        summary.sort_by(|a, b| b.1.cmp(&a.1));
        summary
    }

    /// Folders first, then by name.
    pub fn sorted_entries(&self) -> Vec<&EntryInfo> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| {
            let a_folder = a.category() != Category::Folder;
            let b_folder = b.category() != Category::Folder;
            a_folder
                .cmp(&b_folder)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        entries
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Classifies a single entry found while walking.
pub fn inspect_entry(path: &Path, table: &CategoryTable, max_detail_size: u64) -> std::io::Result<EntryInfo> {
    let metadata = std::fs::metadata(path)?;
    let classification = table.classify(path);
    let size = if metadata.is_dir() { 0 } else { metadata.len() };

    let modified = if size <= max_detail_size {
        metadata.modified().ok().map(DateTime::<Local>::from)
    } else {
        None
    };

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(EntryInfo {
        path: path.to_path_buf(),
        name,
        size,
        classification,
        modified,
    })
}

/// Scans a directory and classifies its entries.
///
/// `progress_callback` receives each entry's path as it is processed.
/// Unreadable entries are recorded in [`ScanStats::errors`] and skipped.
///
/// # Errors
///
/// Returns an error if `path` is not a directory or the blocking task fails.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use filekeep::classify::CategoryTable;
/// use filekeep::scanner::{ScanOptions, scan_directory};
///
/// # async fn example() -> color_eyre::Result<()> {
/// let table = Arc::new(CategoryTable::default());
/// let stats = scan_directory(Path::new("/tmp"), table, ScanOptions::default(), |_| {}).await?;
/// println!("{} entries", stats.total_entries());
/// # Ok(())
/// # }
/// ```
pub async fn scan_directory<F>(
    path: &Path,
    table: Arc<CategoryTable>,
    options: ScanOptions,
    progress_callback: F,
) -> color_eyre::Result<ScanStats>
where
    F: Fn(String) + Send + Sync + 'static,
{
    if !path.is_dir() {
        return Err(color_eyre::eyre::eyre!(
            "Not a directory: {}",
            path.display()
        ));
    }

    let path = path.to_path_buf();

    let stats = task::spawn_blocking(move || {
        let mut stats = ScanStats::new();
        let mut walker = WalkDir::new(&path).min_depth(1).follow_links(false);
        if !options.recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| options.include_hidden || !is_hidden(e))
        {
            match entry {
                Ok(entry) => {
                    let entry_path = entry.path();
                    match inspect_entry(entry_path, &table, options.max_detail_size) {
                        Ok(info) => {
                            progress_callback(entry_path.display().to_string());
                            stats.add_entry(info);
                        }
                        Err(e) => {
                            stats.add_error(format!("Error reading {}: {}", entry_path.display(), e));
                        }
                    }
                }
                Err(e) => {
                    stats.add_error(format!("Error walking directory: {}", e));
                }
            }
        }

        stats
    })
    .await?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn entry(name: &str, size: u64, category: Category) -> EntryInfo {
        EntryInfo {
            path: PathBuf::from("/test").join(name),
            name: name.to_string(),
            size,
            classification: category.into(),
            modified: None,
        }
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.JPG"), vec![0u8; 300]).unwrap();
        fs::write(tmp.path().join("notes.txt"), b"hello").unwrap();
        fs::write(tmp.path().join("backup.tar.gz"), b"gz").unwrap();
        fs::write(tmp.path().join("Makefile"), b"all:").unwrap();
        fs::write(tmp.path().join(".hidden.png"), b"x").unwrap();
        fs::create_dir(tmp.path().join("music.mp3")).unwrap();
        fs::write(tmp.path().join("music.mp3").join("track.flac"), b"f").unwrap();
        tmp
    }

    #[test]
    fn test_scan_stats_summary() {
        let mut stats = ScanStats::new();
        stats.add_entry(entry("a.txt", 10, Category::Document));
        stats.add_entry(entry("b.pdf", 20, Category::Document));
        stats.add_entry(entry("c.png", 5, Category::Image));

        let summary = stats.get_summary();

        assert_eq!(stats.total_entries(), 3);
        assert_eq!(stats.total_size, 35);
        assert_eq!(summary[0], (Category::Document, 2, 30));
        assert_eq!(summary[1], (Category::Image, 1, 5));
    }

    #[test]
    fn test_sorted_entries_folders_first() {
        let mut stats = ScanStats::new();
        stats.add_entry(entry("zeta.txt", 1, Category::Document));
        stats.add_entry(entry("Beta", 0, Category::Folder));
        stats.add_entry(entry("alpha.png", 1, Category::Image));
        stats.add_entry(entry("acme", 0, Category::Folder));

        let names: Vec<_> = stats.sorted_entries().iter().map(|e| e.name.clone()).collect();

        assert_eq!(names, vec!["acme", "Beta", "alpha.png", "zeta.txt"]);
    }

    #[tokio::test]
    async fn test_scan_top_level() {
        let tmp = fixture();
        let table = Arc::new(CategoryTable::default());

        let stats = scan_directory(tmp.path(), table, ScanOptions::default(), |_| {})
            .await
            .unwrap();

        assert_eq!(stats.total_entries(), 5);
        assert!(stats.errors.is_empty());

        let category_of = |name: &str| {
            stats
                .entries
                .iter()
                .find(|e| e.name == name)
                .map(|e| e.category())
                .unwrap()
        };
        assert_eq!(category_of("photo.JPG"), Category::Image);
        assert_eq!(category_of("notes.txt"), Category::Document);
        assert_eq!(category_of("backup.tar.gz"), Category::Archive);
        assert_eq!(category_of("Makefile"), Category::Other);
        assert_eq!(category_of("music.mp3"), Category::Folder);
    }

    #[tokio::test]
    async fn test_scan_recursive_with_hidden() {
        let tmp = fixture();
        let table = Arc::new(CategoryTable::default());
        let options = ScanOptions {
            recursive: true,
            include_hidden: true,
            ..ScanOptions::default()
        };

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let stats = scan_directory(tmp.path(), table, options, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

        assert_eq!(stats.total_entries(), 7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert!(stats.entries.iter().any(|e| e.name == "track.flac" && e.category() == Category::Audio));
        assert!(stats.entries.iter().any(|e| e.name == ".hidden.png"));
    }

    #[tokio::test]
    async fn test_scan_detail_limit() {
        let tmp = fixture();
        let table = Arc::new(CategoryTable::default());
        let options = ScanOptions {
            max_detail_size: 100,
            ..ScanOptions::default()
        };

        let stats = scan_directory(tmp.path(), table, options, |_| {}).await.unwrap();

        let photo = stats.entries.iter().find(|e| e.name == "photo.JPG").unwrap();
        let notes = stats.entries.iter().find(|e| e.name == "notes.txt").unwrap();
        assert_eq!(photo.size, 300);
        assert!(photo.modified.is_none());
        assert!(notes.modified.is_some());
    }

    #[tokio::test]
    async fn test_scan_rejects_file() {
        let tmp = fixture();
        let table = Arc::new(CategoryTable::default());

        let result = scan_directory(&tmp.path().join("notes.txt"), table, ScanOptions::default(), |_| {}).await;

        assert!(result.is_err());
    }
}
