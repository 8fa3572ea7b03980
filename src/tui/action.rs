//! Actions returned by screen event handlers.

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Replace the retained ticket with freshly formatted text.
    Retain(String),
    /// Copy the retained ticket text to the clipboard.
    Copy,
    /// Reset the form; when a ticket is retained, ask for confirmation and
    /// discard it too.
    Clear,
    /// Switch between dark and light theme and persist the choice.
    ToggleTheme,
    /// Quit the application.
    Quit,
}
