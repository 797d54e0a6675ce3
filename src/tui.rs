//! Terminal user interface components.
//!
//! Themed status lines, spinners and listings. Colors come from the
//! configured theme, mapped onto the xterm 256-color palette.

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;

use crate::classify::Category;
use crate::config::ThemeConfig;
use crate::scanner::{EntryInfo, ScanStats};
use crate::store::TrackedItem;
use crate::watch::{ChangeKind, WatchEvent};

pub const BANNER: &str = r#"
  ___ _ _       _
 | __(_) |___  | |_____ ___ _ __
 | _|| | / -_) | / / -_) -_) '_ \
 |_| |_|_\___| |_\_\___\___| .__/
                           |_|    "#;

pub enum Mode {
    List,
    Watch,
    Items,
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::List => "LIST",
            Mode::Watch => "WATCH",
            Mode::Items => "ITEMS",
        }
    }
}

pub struct UI {
    pub term: Term,
    accent: Style,
    info: Style,
    warning: Style,
    error: Style,
    success: Style,
    muted: Style,
}

impl UI {
    pub fn new(theme: &ThemeConfig) -> Self {
        Self {
            term: Term::stdout(),
            accent: themed(&theme.primary, Style::new().cyan()),
            info: themed(&theme.info, Style::new().cyan()),
            warning: themed(&theme.warning, Style::new().yellow()),
            error: themed(&theme.error, Style::new().red()),
            success: themed(&theme.success, Style::new().green()),
            muted: themed(&theme.text_disabled, Style::new().dim()),
        }
    }

    /// Print banner with mode
    pub fn print_banner_with_mode(&self, mode: &Mode) -> io::Result<()> {
        let white_bold = Style::new().white().bold();

        self.term
            .write_line(&self.accent.apply_to(BANNER).bold().to_string())?;
        self.term.write_line("")?;
        self.term
            .write_line(&white_bold.apply_to("=".repeat(70)).to_string())?;
        self.term.write_line(&format!(
            "{} {}",
            self.accent.apply_to("MODE:").bold(),
            white_bold.apply_to(mode.as_str()).italic()
        ))?;
        self.term
            .write_line(&white_bold.apply_to("=".repeat(70)).to_string())?;

        Ok(())
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// One line per classified path: glyph, category, path.
    pub fn print_classification(&self, path: &str, category: Category, glyph: &str) -> io::Result<()> {
        self.term.write_line(&format!(
            "{}  {:<13} {}",
            glyph,
            self.accent.apply_to(category.label()),
            path
        ))
    }

    /// Listing of a scanned directory, folders first.
    pub fn print_listing(&self, stats: &ScanStats) -> io::Result<()> {
        for entry in stats.sorted_entries() {
            self.term.write_line(&self.format_entry(entry))?;
        }
        Ok(())
    }

    fn format_entry(&self, entry: &EntryInfo) -> String {
        let size = if entry.category() == Category::Folder {
            String::new()
        } else {
            format_size(entry.size)
        };
        let modified = match entry.modified {
            Some(modified) => modified.format("%Y-%m-%d %H:%M").to_string(),
            None if entry.category() == Category::Folder => String::new(),
            None => "-".to_string(),
        };

        format!(
            "{}  {:<40} {:>12}  {:<13} {}",
            entry.classification.glyph,
            safe_truncate_path(&entry.name, 40),
            size,
            self.accent.apply_to(entry.category().label()),
            self.muted.apply_to(modified)
        )
    }

    /// Per-category counts and sizes.
    pub fn print_summary(&self, title: &str, stats: &ScanStats) -> io::Result<()> {
        let white_bold = Style::new().white().bold();

        self.term.write_line("")?;
        self.term
            .write_line(&self.accent.apply_to(title).bold().to_string())?;
        self.term
            .write_line(&white_bold.apply_to("─".repeat(70)).to_string())?;

        for (category, count, size) in stats.get_summary() {
            self.term.write_line(&format!(
                "{}  {:<13} {:>6} {:>12}",
                category.glyph(),
                category.label(),
                count,
                format_size(size)
            ))?;
        }

        self.term
            .write_line(&white_bold.apply_to("─".repeat(70)).to_string())?;
        self.term.write_line(&format!(
            "{} entries, {}",
            stats.total_entries(),
            format_size(stats.total_size)
        ))?;

        Ok(())
    }

    pub fn print_watch_events(&self, events: &[WatchEvent]) -> io::Result<()> {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        for event in events {
            let marker = match event.kind {
                ChangeKind::Added => self.success.apply_to("+").bold(),
                ChangeKind::Removed => self.error.apply_to("-").bold(),
            };
            self.term.write_line(&format!(
                "{} {} {}  {:<13} {}",
                self.muted.apply_to(&timestamp),
                marker,
                event.classification.glyph,
                event.classification.category.label(),
                event.path.display()
            ))?;
        }
        Ok(())
    }

    pub fn print_items(&self, items: &[(&TrackedItem, Category)]) -> io::Result<()> {
        if items.is_empty() {
            return self.print_info("No tracked items");
        }

        for (item, category) in items {
            let status = if item.exists() {
                String::new()
            } else {
                self.warning.apply_to("(missing)").to_string()
            };
            self.term.write_line(&format!(
                "{}  {:<30} {:<13} {} {}",
                category.glyph(),
                safe_truncate_path(&item.name, 30),
                self.accent.apply_to(category.label()),
                item.path.display(),
                status
            ))?;
        }
        Ok(())
    }

    pub fn print_info(&self, message: &str) -> io::Result<()> {
        self.status_line(&self.info, "[*]", message)
    }

    pub fn print_error(&self, message: &str) -> io::Result<()> {
        self.status_line(&self.error, "[!] ERROR:", message)
    }

    pub fn print_success(&self, message: &str) -> io::Result<()> {
        self.status_line(&self.success, "[✓]", message)
    }

    pub fn print_warning(&self, message: &str) -> io::Result<()> {
        self.status_line(&self.warning, "[!] WARNING:", message)
    }

    fn status_line(&self, style: &Style, tag: &str, message: &str) -> io::Result<()> {
        let white_bold = Style::new().white().bold();
        self.term.write_line(&format!(
            "{} {}",
            style.apply_to(tag).bold(),
            white_bold.apply_to(message)
        ))
    }
}

fn themed(hex: &str, fallback: Style) -> Style {
    match hex_to_ansi256(hex) {
        Some(color) => Style::new().color256(color),
        None => fallback,
    }
}

/// Maps `#rrggbb` onto the 6x6x6 color cube of the xterm palette.
pub fn hex_to_ansi256(hex: &str) -> Option<u8> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let level = |c: u8| (c as u16 * 5 + 127) / 255;

    Some((16 + 36 * level(r) + 6 * level(g) + level(b)) as u8)
}

/// Safely truncate a string to display width, respecting UTF-8 character boundaries
fn safe_truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();

    if chars.len() <= max_len || max_len < 5 {
        return path.to_string();
    }

    let prefix_len = (max_len - 3) / 2;
    let suffix_len = max_len - 3 - prefix_len;

    let prefix: String = chars.iter().take(prefix_len).collect();
    let suffix: String = chars.iter().skip(chars.len() - suffix_len).collect();

    format!("{}...{}", prefix, suffix)
}

// Helper function to format file sizes
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
