//! Output panel widget — shows the retained ticket text and the copy state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::palette::Palette;

/// Copy feedback shown in the panel footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CopyState {
    /// No copy attempted since the last state change.
    #[default]
    Idle,
    /// The last clipboard write succeeded; label reverts after a delay.
    Copied,
    /// The clipboard write failed; the text stays selectable in the panel.
    Failed(String),
}

/// Data passed to the output panel widget; decoupled from the app state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputContext {
    /// The retained ticket text; empty means no ticket has been formatted.
    pub text: String,
    /// Creation time label for the panel title (e.g. `14:32`), empty if none.
    pub created_label: String,
    /// Current copy feedback.
    pub copy_state: CopyState,
}

impl OutputContext {
    /// Returns `true` if there is ticket text to copy.
    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Renders the output panel: retained text, creation time, copy hint.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_output(ctx: &OutputContext, frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = if ctx.created_label.is_empty() {
        " Ticket Output ".to_string()
    } else {
        format!(" Ticket Output \u{b7} {} ", ctx.created_label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    if ctx.has_content() {
        let lines: Vec<Line> = ctx.text.lines().map(Line::from).collect();
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(palette.text)),
            text_area,
        );
    } else {
        frame.render_widget(
            Paragraph::new("No ticket yet. Fill the form and press Enter.")
                .style(Style::default().fg(palette.dim)),
            text_area,
        );
    }

    let footer = match &ctx.copy_state {
        CopyState::Copied => Span::styled("Copied!", Style::default().fg(palette.accent)),
        CopyState::Failed(msg) => Span::styled(msg.as_str(), Style::default().fg(palette.error)),
        CopyState::Idle if ctx.has_content() => {
            Span::styled("Alt+c: copy", Style::default().fg(palette.text))
        }
        CopyState::Idle => Span::styled("Alt+c: copy (no ticket)", Style::default().fg(palette.dim)),
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), footer_area);
}
