//! Theme-to-color mapping for the widgets and screens.

use ratatui::style::Color;

use crate::config::Theme;

/// Resolved colors for the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen and panel borders.
    pub border: Color,
    /// The focused form field.
    pub focus: Color,
    /// Primary text.
    pub text: Color,
    /// Footers, hints, unfocused borders.
    pub dim: Color,
    /// Success feedback (copy confirmation).
    pub accent: Color,
    /// Validation and clipboard errors.
    pub error: Color,
}

impl Palette {
    /// Returns the palette for the given theme.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                border: Color::Cyan,
                focus: Color::Yellow,
                text: Color::White,
                dim: Color::DarkGray,
                accent: Color::Green,
                error: Color::Red,
            },
            Theme::Light => Self {
                border: Color::Blue,
                focus: Color::Magenta,
                text: Color::Black,
                dim: Color::Gray,
                accent: Color::Green,
                error: Color::Red,
            },
        }
    }
}
