//! Help screen — scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::palette::Palette;

static ENTRY_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("\u{2190}/\u{2192}", "cycle select options"),
    ("Enter", "format ticket"),
    ("Alt+c", "copy output to clipboard"),
    ("Alt+r", "clear (y/n to confirm when output present)"),
    ("Alt+t", "toggle dark/light theme"),
    ("Esc", "quit"),
    ("F1", "help"),
];

static HELP_KEYS: &[(&str, &str)] = &[("\u{2191}/\u{2193}", "scroll"), ("q / Esc", "back")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] with scroll position at the top.
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(Screen::TicketEntry),
            _ => Action::None,
        }
    }
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (title, keys) in [("Ticket Entry", ENTRY_KEYS), ("Help", HELP_KEYS)] {
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(palette.border)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<18}"), Style::default().fg(palette.focus)),
                Span::styled(*desc, Style::default().fg(palette.text)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let paragraph = Paragraph::new(lines).scroll((state.scroll(), 0));
    frame.render_widget(paragraph, body_area);

    let footer = Paragraph::new("\u{2191}/\u{2193}: scroll  q/Esc: back")
        .style(Style::default().fg(palette.dim));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn new_starts_at_top() {
        assert_eq!(HelpState::new().scroll(), 0);
    }

    #[test]
    fn down_scrolls_and_up_returns() {
        let mut state = HelpState::new();
        state.handle_key(press(KeyCode::Down));
        state.handle_key(press(KeyCode::Down));
        assert_eq!(state.scroll(), 2);
        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.scroll(), 1);
    }

    #[test]
    fn up_at_top_saturates() {
        let mut state = HelpState::new();
        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn q_and_esc_return_to_entry() {
        let mut state = HelpState::new();
        assert_eq!(
            state.handle_key(press(KeyCode::Char('q'))),
            Action::Navigate(Screen::TicketEntry)
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Esc)),
            Action::Navigate(Screen::TicketEntry)
        );
    }

    #[test]
    fn reset_returns_to_top() {
        let mut state = HelpState::new();
        state.handle_key(press(KeyCode::Down));
        state.reset();
        assert_eq!(state.scroll(), 0);
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;
        use crate::config::Theme;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        #[test]
        fn renders_keybindings() {
            let backend = TestBackend::new(70, 20);
            let mut terminal = Terminal::new(backend).unwrap();
            let palette = Palette::for_theme(Theme::Dark);
            let state = HelpState::new();
            terminal
                .draw(|frame| {
                    draw_help(&state, frame, frame.area(), &palette);
                })
                .unwrap();
            let output = buffer_to_string(terminal.backend().buffer());
            assert!(output.contains("Help"), "should show title");
            assert!(output.contains("format ticket"), "should list Enter binding");
            assert!(output.contains("Alt+c"), "should list copy binding");
        }
    }
}
