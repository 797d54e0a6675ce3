//! File classification and extension mapping.
//!
//! Maps a filesystem path to a display [`Category`] and an icon glyph. The
//! mapping is an ordered list of rules whose extension sets are disjoint, so
//! the result never depends on evaluation order. Directories always classify
//! as [`Category::Folder`].

use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// Display bucket for a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Folder,
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Executable,
    Code,
    Spreadsheet,
    Presentation,
    Other,
}

impl Category {
    /// Every category, in lookup priority order (Folder first, Other last).
    pub const ALL: [Category; 11] = [
        Category::Folder,
        Category::Image,
        Category::Video,
        Category::Audio,
        Category::Document,
        Category::Archive,
        Category::Executable,
        Category::Code,
        Category::Spreadsheet,
        Category::Presentation,
        Category::Other,
    ];

    /// Icon shown next to entries of this category.
    pub fn glyph(&self) -> &'static str {
        match self {
            Category::Folder => "📁",
            Category::Image => "🖼️",
            Category::Video => "🎬",
            Category::Audio => "🎵",
            Category::Document => "📄",
            Category::Archive => "📦",
            Category::Executable => "⚙️",
            Category::Code => "💻",
            Category::Spreadsheet | Category::Presentation => "📊",
            Category::Other => "📄",
        }
    }

    /// Human-facing name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Folder => "Folder",
            Category::Image => "Image",
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Document => "Document",
            Category::Archive => "Archive",
            Category::Executable => "Executable",
            Category::Code => "Code",
            Category::Spreadsheet => "Spreadsheet",
            Category::Presentation => "Presentation",
            Category::Other => "File",
        }
    }

    /// Key used for this category in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Folder => "folder",
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Document => "document",
            Category::Archive => "archive",
            Category::Executable => "executable",
            Category::Code => "code",
            Category::Spreadsheet => "spreadsheet",
            Category::Presentation => "presentation",
            Category::Other => "other",
        }
    }

    /// Parses a configuration key back into a category.
    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.to_lowercase();
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub glyph: &'static str,
}

impl From<Category> for Classification {
    fn from(category: Category) -> Self {
        Self {
            category,
            glyph: category.glyph(),
        }
    }
}

/// One entry of the lookup table: a set of extensions and the category they map to.
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: Category,
    /// Lower-cased, with leading dot
    pub extensions: Vec<String>,
}

impl Rule {
    pub fn new(category: Category, extensions: &[&str]) -> Self {
        Self {
            category,
            extensions: extensions.iter().map(|e| normalize_extension(e)).collect(),
        }
    }
}

/// Returns the built-in rules in priority order.
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            Category::Image,
            &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg"],
        ),
        Rule::new(
            Category::Video,
            &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv"],
        ),
        Rule::new(
            Category::Audio,
            &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a"],
        ),
        Rule::new(
            Category::Document,
            &[".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt"],
        ),
        Rule::new(
            Category::Archive,
            &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"],
        ),
        Rule::new(
            Category::Executable,
            &[".exe", ".msi", ".app", ".deb", ".rpm"],
        ),
        Rule::new(
            Category::Code,
            &[".py", ".js", ".html", ".css", ".cpp", ".java", ".c", ".h"],
        ),
        Rule::new(Category::Spreadsheet, &[".xlsx", ".xls", ".csv"]),
        Rule::new(Category::Presentation, &[".pptx", ".ppt"]),
    ]
}

/// Ordered, disjoint extension rules.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    rules: Vec<Rule>,
    index: HashMap<String, Category>,
}

impl CategoryTable {
    /// Builds a table, rejecting any extension that appears in more than one rule.
    ///
    /// Folder and Other are implicit and cannot carry extensions.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut index = HashMap::new();

        for rule in &rules {
            if matches!(rule.category, Category::Folder | Category::Other) {
                return Err(eyre!(
                    "Category '{}' cannot be assigned extensions",
                    rule.category.key()
                ));
            }

            for ext in &rule.extensions {
                if ext.len() < 2 {
                    return Err(eyre!(
                        "Empty extension in category '{}'",
                        rule.category.key()
                    ));
                }
                if let Some(previous) = index.insert(ext.clone(), rule.category) {
                    if previous != rule.category {
                        return Err(eyre!(
                            "Extension '{}' is mapped to both '{}' and '{}'",
                            ext,
                            previous.key(),
                            rule.category.key()
                        ));
                    }
                }
            }
        }

        Ok(Self { rules, index })
    }

    /// Built-in table extended with user-supplied extensions per category key.
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut rules = builtin_rules();

        for (key, extensions) in extra {
            let category = Category::from_key(key)
                .ok_or_else(|| eyre!("Unknown category '{}' in extra extensions", key))?;

            let normalized = extensions.iter().map(|e| normalize_extension(e));
            match rules.iter_mut().find(|r| r.category == category) {
                Some(rule) => {
                    for ext in normalized {
                        if !rule.extensions.contains(&ext) {
                            rule.extensions.push(ext);
                        }
                    }
                }
                None => rules.push(Rule {
                    category,
                    extensions: normalized.collect(),
                }),
            }
        }

        Self::new(rules)
    }

    /// Rules in priority order, built-in extensions first.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Category for an extension with leading dot; case-insensitive.
    pub fn lookup(&self, extension: &str) -> Category {
        let ext = extension.to_lowercase();
        self.index.get(&ext).copied().unwrap_or(Category::Other)
    }

    /// Classifies a path. The target need not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekeep::classify::{Category, CategoryTable};
    ///
    /// let table = CategoryTable::default();
    /// assert_eq!(table.classify("/tmp/report.docx").category, Category::Document);
    /// assert_eq!(table.classify("/tmp/archive.tar.gz").category, Category::Archive);
    /// assert_eq!(table.classify("README").category, Category::Other);
    /// ```
    pub fn classify(&self, path: impl AsRef<Path>) -> Classification {
        let path = path.as_ref();

        if path.is_dir() {
            return Category::Folder.into();
        }

        self.lookup(&get_extension(path)).into()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let rules = builtin_rules();
        let index = rules
            .iter()
            .flat_map(|r| r.extensions.iter().map(|e| (e.clone(), r.category)))
            .collect();
        Self { rules, index }
    }
}

/// Extracts the extension of a path, lower-cased with a leading dot.
///
/// Returns an empty string if the path has no extension or it isn't UTF-8.
///
/// ```
/// use std::path::Path;
/// use filekeep::classify::get_extension;
///
/// assert_eq!(get_extension(Path::new("/home/user/photo.JPG")), ".jpg");
/// assert_eq!(get_extension(Path::new("Makefile")), "");
/// ```
pub fn get_extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| format!(".{}", s.to_lowercase()))
        .unwrap_or_default()
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_classify_images() {
        let table = CategoryTable::default();
        for ext in [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg"] {
            let result = table.classify(format!("x{}", ext));
            assert_eq!(result.category, Category::Image, "{}", ext);
            assert_eq!(result.glyph, "🖼️");

            let upper = table.classify(format!("x{}", ext.to_uppercase()));
            assert_eq!(upper.category, Category::Image, "{}", ext);
        }
    }

    #[test]
    fn test_classify_each_category() {
        let table = CategoryTable::default();

        assert_eq!(table.classify("clip.mkv").category, Category::Video);
        assert_eq!(table.classify("song.flac").category, Category::Audio);
        assert_eq!(table.classify("notes.txt").category, Category::Document);
        assert_eq!(table.classify("bundle.7z").category, Category::Archive);
        assert_eq!(table.classify("setup.msi").category, Category::Executable);
        assert_eq!(table.classify("main.cpp").category, Category::Code);
        assert_eq!(table.classify("budget.csv").category, Category::Spreadsheet);
        assert_eq!(table.classify("slides.pptx").category, Category::Presentation);
    }

    #[test]
    fn test_classify_document_scenario() {
        let table = CategoryTable::default();
        let result = table.classify("/tmp/report.docx");

        assert_eq!(result.category, Category::Document);
        assert_eq!(result.glyph, "📄");
    }

    #[test]
    fn test_classify_multiple_dots() {
        let table = CategoryTable::default();

        assert_eq!(table.classify("/tmp/archive.tar.gz").category, Category::Archive);
        assert_eq!(table.classify("photo.backup.png").category, Category::Image);
        assert_eq!(table.classify("image.png.unknown").category, Category::Other);
    }

    #[test]
    fn test_classify_no_extension() {
        let table = CategoryTable::default();
        let result = table.classify("file");

        assert_eq!(result.category, Category::Other);
        assert_eq!(result.glyph, "📄");
        assert_eq!(table.classify("trailing.").category, Category::Other);
        assert_eq!(table.classify(".bashrc").category, Category::Other);
    }

    #[test]
    fn test_classify_case_insensitive() {
        let table = CategoryTable::default();

        assert_eq!(table.classify("a.PNG"), table.classify("a.png"));
        assert_eq!(table.classify("Report.DocX"), table.classify("report.docx"));
    }

    #[test]
    fn test_classify_directory_wins_over_extension() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("holiday.jpg");
        std::fs::create_dir(&dir).unwrap();

        let table = CategoryTable::default();
        let result = table.classify(&dir);

        assert_eq!(result.category, Category::Folder);
        assert_eq!(result.glyph, "📁");
        assert_eq!(table.classify(tmp.path()).category, Category::Folder);
    }

    #[test]
    fn test_classify_missing_path_is_not_folder() {
        let table = CategoryTable::default();
        let result = table.classify("/definitely/not/here/video.mp4");

        assert_eq!(result.category, Category::Video);
    }

    #[test]
    fn test_builtin_rules_are_disjoint() {
        let table = CategoryTable::new(builtin_rules()).unwrap();
        assert_eq!(table.rules().len(), 9);
    }

    #[test]
    fn test_builtin_rules_lowercase_with_dot() {
        for rule in builtin_rules() {
            assert!(!rule.extensions.is_empty(), "{} has no extensions", rule.category);
            for ext in &rule.extensions {
                assert!(ext.starts_with('.'));
                assert_eq!(ext, &ext.to_lowercase());
            }
        }
    }

    #[test]
    fn test_new_rejects_duplicate_extension() {
        let rules = vec![
            Rule::new(Category::Code, &[".ts"]),
            Rule::new(Category::Video, &["TS"]),
        ];

        let err = CategoryTable::new(rules).unwrap_err();
        assert!(err.to_string().contains(".ts"));
    }

    #[test]
    fn test_new_rejects_folder_rule() {
        let rules = vec![Rule::new(Category::Folder, &[".dir"])];
        assert!(CategoryTable::new(rules).is_err());
    }

    #[test]
    fn test_with_extra_extends_rule() {
        let mut extra = BTreeMap::new();
        extra.insert("image".to_string(), vec!["webp".to_string(), ".HEIC".to_string()]);
        extra.insert("code".to_string(), vec![".rs".to_string()]);

        let table = CategoryTable::with_extra(&extra).unwrap();

        assert_eq!(table.lookup(".webp"), Category::Image);
        assert_eq!(table.lookup(".heic"), Category::Image);
        assert_eq!(table.lookup(".rs"), Category::Code);
        assert_eq!(table.lookup(".jpg"), Category::Image);
    }

    #[test]
    fn test_with_extra_rejects_clash() {
        let mut extra = BTreeMap::new();
        extra.insert("code".to_string(), vec![".csv".to_string()]);

        assert!(CategoryTable::with_extra(&extra).is_err());
    }

    #[test]
    fn test_with_extra_rejects_unknown_category() {
        let mut extra = BTreeMap::new();
        extra.insert("fonts".to_string(), vec![".ttf".to_string()]);

        assert!(CategoryTable::with_extra(&extra).is_err());
    }

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(Path::new("file.txt")), ".txt");
        assert_eq!(get_extension(Path::new("image.JPG")), ".jpg");
        assert_eq!(get_extension(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(get_extension(Path::new("README")), "");
    }

    #[test]
    fn test_category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("IMAGE"), Some(Category::Image));
        assert_eq!(Category::from_key("misc"), None);
    }
}
