//! Ticket entry screen — the call wrap-up form and output panel.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::format::format_ticket;
use crate::model::{
    CallStatus, Field, TicketInput, ValidationError, VisibilityTrigger, compute_visibility,
};
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::palette::Palette;
use crate::tui::widgets::form::{Form, FormField, draw_form};
use crate::tui::widgets::output::{OutputContext, draw_output};

/// Field index for the customer name.
pub const CUSTOMER_NAME: usize = 0;
/// Field index for the customer phone.
pub const CUSTOMER_PHONE: usize = 1;
/// Field index for the call status select.
pub const CALL_STATUS: usize = 2;
/// Field index for the activation status select.
pub const ACTIVATION_STATUS: usize = 3;
/// Field index for the shipping status select.
pub const SHIPPING_STATUS: usize = 4;
/// Field index for the shipping SLA select.
pub const SHIPPING_SLA: usize = 5;
/// Field index for the menu status select.
pub const MENU_STATUS: usize = 6;
/// Field index for the installation status select.
pub const INSTALLATION_STATUS: usize = 7;
/// Field index for the installation date/time.
pub const INSTALLATION_DATETIME: usize = 8;
/// Field index for the training status select.
pub const TRAINING_STATUS: usize = 9;
/// Field index for the training date/time.
pub const TRAINING_DATETIME: usize = 10;
/// Field index for the WhatsApp ticket id.
pub const WHATSAPP_TICKET: usize = 11;
/// Field index for the dated follow-up.
pub const FOLLOW_UP_DATETIME: usize = 12;
/// Field index for the follow-up notes.
pub const FOLLOW_UP_NOTES: usize = 13;
/// Field index for the standalone next follow-up.
pub const STANDALONE_NEXT_FOLLOW_UP: usize = 14;
/// Field index for the free comment.
pub const FREE_COMMENT: usize = 15;

static CALL_STATUS_OPTIONS: &[&str] = &[
    "Connected",
    "Not connected",
    "Call back requested",
    "Dropped",
    "Contacted on WhatsApp",
];
static ACTIVATION_OPTIONS: &[&str] = &["Done", "Pending", "No need"];
static SHIPPING_OPTIONS: &[&str] = &[
    "Not started yet",
    "Not yet delivered",
    "Delivered",
    "No line item/ no hw to be shipped.",
];
static SHIPPING_SLA_OPTIONS: &[&str] = &["Same day", "24h", "48h", "72h"];
static MENU_OPTIONS: &[&str] = &["Not started yet", "In progress", "Done", "Not line item"];
static INSTALLATION_OPTIONS: &[&str] =
    &["Not started yet", "Scheduled", "Done", "Not line item"];
static TRAINING_OPTIONS: &[&str] = &["Not started yet", "Scheduled", "Done", "Not line item"];

/// Form indices of the fields the visibility policy controls.
static FIELD_BINDINGS: &[(usize, Field)] = &[
    (ACTIVATION_STATUS, Field::ActivationStatus),
    (SHIPPING_STATUS, Field::ShippingStatus),
    (SHIPPING_SLA, Field::ShippingSla),
    (MENU_STATUS, Field::MenuStatus),
    (INSTALLATION_STATUS, Field::InstallationStatus),
    (INSTALLATION_DATETIME, Field::InstallationDatetime),
    (TRAINING_STATUS, Field::TrainingStatus),
    (TRAINING_DATETIME, Field::TrainingDatetime),
    (WHATSAPP_TICKET, Field::WhatsappTicket),
    (FOLLOW_UP_DATETIME, Field::FollowUpDatetime),
    (FOLLOW_UP_NOTES, Field::FollowUpNotes),
    (STANDALONE_NEXT_FOLLOW_UP, Field::StandaloneNextFollowUp),
];

/// State for the ticket entry screen.
#[derive(Debug, Clone)]
pub struct TicketEntryState {
    form: Form,
    error: Option<String>,
}

impl Default for TicketEntryState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketEntryState {
    /// Creates the form with the visibility policy already applied.
    pub fn new() -> Self {
        let form = Form::new(vec![
            FormField::text("Customer Name", true),
            FormField::text("Customer Phone", false),
            FormField::select("Call Status", CALL_STATUS_OPTIONS, true),
            FormField::select("Activation", ACTIVATION_OPTIONS, false),
            FormField::select("Shipping", SHIPPING_OPTIONS, false),
            FormField::select("Shipping SLA", SHIPPING_SLA_OPTIONS, false),
            FormField::select("Menu", MENU_OPTIONS, false),
            FormField::select("Installation", INSTALLATION_OPTIONS, false),
            FormField::text("Installation Date & Time", false),
            FormField::select("Training", TRAINING_OPTIONS, false),
            FormField::text("Training Date & Time", false),
            FormField::text("WhatsApp Ticket", false),
            FormField::text("Next Follow-up", false),
            FormField::text("Follow-up Notes", false),
            FormField::text("Next Follow up", false),
            FormField::text("Comment", false),
        ]);

        let mut state = Self { form, error: None };
        state.apply_visibility();
        state
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('c') => return Action::Copy,
                KeyCode::Char('r') => return Action::Clear,
                KeyCode::Char('t') => return Action::ToggleTheme,
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Left => {
                self.cycle_focused(false);
                Action::None
            }
            KeyCode::Right => {
                self.cycle_focused(true);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::F(1) => Action::Navigate(Screen::Help),
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns the current screen-level error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets a screen-level error message to display.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    /// Clears values and errors and re-applies the visibility policy.
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.error = None;
        self.apply_visibility();
    }

    /// Cycles the focused select and re-applies the visibility policy, since
    /// any select can be one of the trigger fields.
    fn cycle_focused(&mut self, forward: bool) {
        self.form.cycle_option(forward);
        self.apply_visibility();
    }

    /// Recomputes field visibility from the current trigger values.
    fn apply_visibility(&mut self) {
        let spec = compute_visibility(&VisibilityTrigger {
            call_status: CallStatus::from_label(self.form.value(CALL_STATUS)),
            shipping_status: self.form.value(SHIPPING_STATUS),
            installation_status: self.form.value(INSTALLATION_STATUS),
            training_status: self.form.value(TRAINING_STATUS),
        });

        for (index, field) in FIELD_BINDINGS {
            self.form.set_visible(*index, spec.is_visible(*field));
            self.form.set_required(*index, spec.is_required(*field));
        }
        self.form.ensure_focus_visible();
    }

    /// Snapshots the form into a [`TicketInput`].
    ///
    /// Hidden fields contribute empty strings so a stale value from a
    /// previous call-status selection can never reach the output.
    fn snapshot(&self) -> TicketInput {
        TicketInput {
            customer_name: self.form.value(CUSTOMER_NAME).trim().to_string(),
            customer_phone: self.form.value(CUSTOMER_PHONE).trim().to_string(),
            call_status: CallStatus::from_label(self.form.value(CALL_STATUS)),
            activation_status: self.visible_value(ACTIVATION_STATUS),
            shipping_status: self.visible_value(SHIPPING_STATUS),
            shipping_sla: self.visible_value(SHIPPING_SLA),
            menu_status: self.visible_value(MENU_STATUS),
            installation_status: self.visible_value(INSTALLATION_STATUS),
            installation_datetime: self.visible_value(INSTALLATION_DATETIME),
            training_status: self.visible_value(TRAINING_STATUS),
            training_datetime: self.visible_value(TRAINING_DATETIME),
            whatsapp_ticket: self.visible_trimmed(WHATSAPP_TICKET),
            follow_up_datetime: self.visible_value(FOLLOW_UP_DATETIME),
            follow_up_notes: self.visible_trimmed(FOLLOW_UP_NOTES),
            standalone_next_follow_up: self.visible_trimmed(STANDALONE_NEXT_FOLLOW_UP),
            free_comment: self.form.value(FREE_COMMENT).to_string(),
        }
    }

    fn visible_value(&self, index: usize) -> String {
        if self.form.is_visible(index) {
            self.form.value(index).to_string()
        } else {
            String::new()
        }
    }

    fn visible_trimmed(&self, index: usize) -> String {
        if self.form.is_visible(index) {
            self.form.value(index).trim().to_string()
        } else {
            String::new()
        }
    }

    /// Validates the form and formats the ticket.
    ///
    /// Visible required fields must be non-empty (the collector's rule);
    /// the formatter then runs its own ordered checks. On any failure the
    /// offending fields are marked and nothing else changes.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.error = None;

        let mut missing = false;
        for index in 0..self.form.fields().len() {
            if self.form.is_visible(index)
                && self.form.is_required(index)
                && self.form.value(index).trim().is_empty()
            {
                let label = self.form.fields()[index].label.clone();
                self.form.set_error(index, format!("{label} is required"));
                missing = true;
            }
        }
        if missing {
            self.error = Some("fill in the required fields".to_string());
            return Action::None;
        }

        match format_ticket(&self.snapshot()) {
            Ok(text) => Action::Retain(text),
            Err(e) => {
                self.form.set_error(error_field(&e), e.to_string());
                self.error = Some(e.to_string());
                Action::None
            }
        }
    }
}

/// Maps a validation error to the form field it belongs to.
fn error_field(error: &ValidationError) -> usize {
    match error {
        ValidationError::MissingCustomerName => CUSTOMER_NAME,
        ValidationError::MissingCallStatus => CALL_STATUS,
        ValidationError::InvalidPhone(_) => CUSTOMER_PHONE,
        ValidationError::MissingShippingSla => SHIPPING_SLA,
    }
}

/// Renders the ticket entry screen: form on the left, output panel on the
/// right, key hints at the bottom.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_ticket_entry(
    state: &TicketEntryState,
    output: &OutputContext,
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
) {
    let [content_area, error_area, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let [form_area, output_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(content_area);

    let block = Block::default()
        .title(" New Ticket ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    let form_inner = block.inner(form_area);
    frame.render_widget(block, form_area);
    draw_form(state.form(), frame, form_inner, palette);

    draw_output(output, frame, output_area, palette);

    if let Some(err) = state.error() {
        let err_line = Paragraph::new(Span::styled(err, Style::default().fg(palette.error)));
        frame.render_widget(err_line, error_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab: next  \u{2190}/\u{2192}: choose  Enter: format  Alt+c: copy  Alt+r: clear  Alt+t: theme  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(palette.dim));
    frame.render_widget(footer, footer_area);
}
