//! Stylesheets for the GUI toolkit.
//!
//! Each [`Stylesheet`] renders to a Qt-style sheet string with the theme
//! colors and scrollbar width substituted in.

use std::fmt;

use crate::config::{ThemeConfig, VisualConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stylesheet {
    MainWindow,
    ScrollArea,
    ItemWidget,
    Dialog,
    InstructionLabel,
    RemoveButton,
}

impl Stylesheet {
    pub const ALL: [Stylesheet; 6] = [
        Stylesheet::MainWindow,
        Stylesheet::ScrollArea,
        Stylesheet::ItemWidget,
        Stylesheet::Dialog,
        Stylesheet::InstructionLabel,
        Stylesheet::RemoveButton,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stylesheet::MainWindow => "main_window",
            Stylesheet::ScrollArea => "scroll_area",
            Stylesheet::ItemWidget => "item_widget",
            Stylesheet::Dialog => "dialog",
            Stylesheet::InstructionLabel => "instruction_label",
            Stylesheet::RemoveButton => "remove_button",
        }
    }

    pub fn from_name(name: &str) -> Option<Stylesheet> {
        Stylesheet::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn render(&self, theme: &ThemeConfig, visual: &VisualConfig) -> String {
        let t = theme;
        match self {
            Stylesheet::MainWindow => format!(
                r#"
QMainWindow {{
    background-color: {background};
    color: {text};
}}
QMenuBar {{
    background-color: {surface};
    color: {text};
    padding: 4px;
}}
QMenuBar::item {{
    background-color: transparent;
    padding: 8px 12px;
    border-radius: 4px;
}}
QMenuBar::item:selected {{
    background-color: {primary};
}}
QMenu {{
    background-color: {surface};
    color: {text};
    border: 1px solid {border};
    border-radius: 4px;
}}
QMenu::item {{
    padding: 8px 20px;
    border-radius: 4px;
    margin: 2px;
}}
QMenu::item:selected {{
    background-color: {primary};
}}
QStatusBar {{
    background-color: {surface};
    color: {text_secondary};
    border-top: 1px solid {border};
}}
"#,
                background = t.background,
                text = t.text_primary,
                surface = t.surface,
                primary = t.primary,
                border = t.border,
                text_secondary = t.text_secondary,
            ),
            Stylesheet::ScrollArea => format!(
                r#"
QScrollArea {{
    border: none;
    background-color: {background};
}}
QScrollBar:vertical {{
    background-color: {surface_variant};
    width: {width}px;
    border-radius: 6px;
}}
QScrollBar::handle:vertical {{
    background-color: {secondary};
    border-radius: 6px;
    min-height: 20px;
}}
QScrollBar::handle:vertical:hover {{
    background-color: {border_hover};
}}
"#,
                background = t.background,
                surface_variant = t.surface_variant,
                width = visual.scrollbar_width,
                secondary = t.secondary,
                border_hover = t.border_hover,
            ),
            Stylesheet::ItemWidget => format!(
                r#"
QFrame {{
    background-color: {surface_variant};
    border: 1px solid {border};
    border-radius: 8px;
    margin: 2px;
}}
QFrame:hover {{
    background-color: {surface_hover};
    border-color: {border_hover};
}}
QPushButton {{
    background-color: {primary};
    border: none;
    border-radius: 4px;
    color: white;
    font-weight: bold;
    padding: 4px;
}}
QPushButton:hover {{
    background-color: {primary_hover};
}}
"#,
                surface_variant = t.surface_variant,
                border = t.border,
                surface_hover = t.surface_hover,
                border_hover = t.border_hover,
                primary = t.primary,
                primary_hover = t.primary_hover,
            ),
            Stylesheet::Dialog => format!(
                r#"
QDialog {{
    background-color: {surface};
    color: {text};
}}
QLabel {{
    color: {text};
    font-weight: bold;
}}
QTextEdit {{
    background-color: {surface_variant};
    border: 1px solid {border};
    border-radius: 4px;
    color: {text};
    padding: 5px;
}}
QPushButton {{
    background-color: {primary};
    border: none;
    border-radius: 4px;
    color: white;
    padding: 8px 16px;
    font-weight: bold;
}}
QPushButton:hover {{
    background-color: {primary_hover};
}}
"#,
                surface = t.surface,
                text = t.text_primary,
                surface_variant = t.surface_variant,
                border = t.border,
                primary = t.primary,
                primary_hover = t.primary_hover,
            ),
            Stylesheet::InstructionLabel => format!(
                r#"
QLabel {{
    color: {disabled};
    font-size: 12pt;
    padding: 40px;
    border: 2px dashed {border};
    border-radius: 10px;
    background-color: {surface};
}}
"#,
                disabled = t.text_disabled,
                border = t.border,
                surface = t.surface,
            ),
            Stylesheet::RemoveButton => format!(
                r#"
QPushButton {{
    background-color: {error};
    border: none;
    border-radius: 12px;
    color: white;
    font-weight: bold;
}}
QPushButton:hover {{
    background-color: {error_hover};
}}
"#,
                error = t.error,
                error_hover = t.error_hover,
            ),
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
