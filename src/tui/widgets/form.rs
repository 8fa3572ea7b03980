//! Reusable form widget for the ticket entry screen.
//!
//! Extends a plain text form with select fields (option cycling) and
//! per-field visibility, so the entry screen can apply the visibility
//! policy without rebuilding the form.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::palette::Palette;

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, edited by appending and deleting characters.
    Text,
    /// One of a fixed option list, cycled with left/right. The empty value
    /// ("not set") sits between the last and first option.
    Select(&'static [&'static str]),
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown on the field border.
    pub label: String,
    /// Edit behavior.
    pub kind: FieldKind,
    /// Current value; empty means "not set".
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field must be non-empty on submit.
    pub required: bool,
    /// Whether the field is rendered and focusable.
    pub visible: bool,
}

impl FormField {
    /// Creates a visible text field.
    pub fn text(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::Text,
            value: String::new(),
            error: None,
            required,
            visible: true,
        }
    }

    /// Creates a visible select field over the given options.
    pub fn select(label: impl Into<String>, options: &'static [&'static str], required: bool) -> Self {
        Self {
            label: label.into(),
            kind: FieldKind::Select(options),
            value: String::new(),
            error: None,
            required,
            visible: true,
        }
    }
}

/// A multi-field form with focus management over visible fields.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Sets focus to the given index.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    /// Moves focus to the next visible field, wrapping around.
    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    /// Moves focus to the previous visible field, wrapping around.
    pub fn focus_prev(&mut self) {
        self.step_focus(self.fields.len().saturating_sub(1));
    }

    fn step_focus(&mut self, step: usize) {
        if self.fields.is_empty() {
            return;
        }
        let len = self.fields.len();
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + step) % len;
            if self.fields[next].visible {
                self.focus = next;
                return;
            }
        }
    }

    /// Moves focus to the first visible field if the focused one is hidden.
    ///
    /// Called after a visibility change so focus never rests on a hidden
    /// field.
    pub fn ensure_focus_visible(&mut self) {
        if self.fields.get(self.focus).is_some_and(|f| f.visible) {
            return;
        }
        if let Some(first) = self.fields.iter().position(|f| f.visible) {
            self.focus = first;
        }
    }

    /// Appends a character to the focused field. Select fields ignore typed
    /// characters.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Text
        {
            field.value.push(ch);
        }
    }

    /// Deletes the last character from the focused text field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Text
        {
            field.value.pop();
        }
    }

    /// Cycles the focused select field forward or backward through its
    /// options, passing through the empty "not set" value at the wrap point.
    /// Text fields are unaffected.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let FieldKind::Select(options) = field.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }

        let pos = options.iter().position(|o| *o == field.value);
        field.value = match (pos, forward) {
            (None, true) => options[0].to_string(),
            (None, false) => options[options.len() - 1].to_string(),
            (Some(i), true) if i + 1 < options.len() => options[i + 1].to_string(),
            (Some(_), true) => String::new(),
            (Some(0), false) => String::new(),
            (Some(i), false) => options[i - 1].to_string(),
        };
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out
    /// of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Sets the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Shows or hides the field at `index`.
    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(field) = self.fields.get_mut(index) {
            field.visible = visible;
        }
    }

    /// Returns `true` if the field at `index` is visible.
    pub fn is_visible(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(|f| f.visible)
    }

    /// Marks the field at `index` required or optional.
    pub fn set_required(&mut self, index: usize, required: bool) {
        if let Some(field) = self.fields.get_mut(index) {
            field.required = required;
        }
    }

    /// Returns `true` if the field at `index` is required.
    pub fn is_required(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(|f| f.required)
    }

    /// Resets all field values and errors; focus returns to the first field.
    ///
    /// Visibility flags are untouched — the caller re-applies the visibility
    /// policy after a reset.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.focus = 0;
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Renders the visible form fields, scrolled so the focused field stays on
/// screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, frame: &mut Frame, area: Rect, palette: &Palette) {
    let row_height = 3_u16;
    let max_rows = (area.height / row_height).max(1) as usize;

    let visible: Vec<(usize, &FormField)> = form
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.visible)
        .collect();
    if visible.is_empty() {
        return;
    }

    // Scroll window around the focused field.
    let focus_pos = visible
        .iter()
        .position(|(i, _)| *i == form.focus)
        .unwrap_or(0);
    let start = focus_pos.saturating_sub(max_rows.saturating_sub(1));
    let window = &visible[start..visible.len().min(start + max_rows)];

    let constraints: Vec<Constraint> = window
        .iter()
        .map(|_| Constraint::Length(row_height))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (row, (index, field)) in window.iter().enumerate() {
        let is_focused = *index == form.focus;

        let border_color = if field.error.is_some() {
            palette.error
        } else if is_focused {
            palette.focus
        } else {
            palette.dim
        };

        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(&field.value)];
        match field.kind {
            FieldKind::Text => {
                if is_focused {
                    spans.push(Span::styled(
                        "\u{2588}",
                        Style::default().add_modifier(Modifier::SLOW_BLINK),
                    ));
                }
            }
            FieldKind::Select(_) => {
                if is_focused {
                    spans.push(Span::styled(
                        "  \u{25c2} \u{25b8}",
                        Style::default().fg(palette.dim),
                    ));
                }
            }
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[row]);

        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(palette.error)));
            let err_area = Rect {
                x: rows[row].x + 2,
                y: rows[row].y + row_height.saturating_sub(1),
                width: rows[row].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
