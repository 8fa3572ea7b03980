use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use crate::config::{PreferencesStore, Theme};
use crate::tui::clipboard::{self, MANUAL_COPY_HINT};
use crate::tui::palette::Palette;
use crate::tui::screens::{
    HelpState, TicketEntryState, draw_help, draw_ticket_entry,
};
use crate::tui::widgets::output::{CopyState, OutputContext};

use super::action::Action;
use super::error::AppError;

/// How long the transient "Copied!" label stays before reverting.
const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The call wrap-up form and output panel.
    TicketEntry,
    /// Keybinding help.
    Help,
    /// Confirmation prompt before discarding the retained ticket.
    ConfirmClear,
}

/// The single retained formatted ticket.
///
/// Replaced atomically on each successful submission; its text is always
/// exactly what the formatter produced, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedTicket {
    text: String,
    created_at: DateTime<Local>,
}

impl RetainedTicket {
    /// Wraps freshly formatted text, stamping the creation time.
    pub fn new(text: String) -> Self {
        Self {
            text,
            created_at: Local::now(),
        }
    }

    /// Returns the formatted ticket text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation time label shown in the output panel title.
    pub fn created_label(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    entry: TicketEntryState,
    help: HelpState,
    store: PreferencesStore,
    theme: Theme,
    retained: Option<RetainedTicket>,
    copy_state: CopyState,
    copied_at: Option<Instant>,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the entry screen, loading the saved theme.
    pub fn new(store: PreferencesStore) -> Result<Self, AppError> {
        let theme = store.load()?;
        Ok(Self {
            screen: Screen::TicketEntry,
            entry: TicketEntryState::new(),
            help: HelpState::new(),
            store,
            theme,
            retained: None,
            copy_state: CopyState::Idle,
            copied_at: None,
            should_quit: false,
        })
    }

    /// Main event loop: draw → poll → dispatch → tick.
    ///
    /// The short poll timeout exists only so the transient copy label can
    /// revert without a key press.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(Duration::from_millis(200))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Renders the current screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let palette = Palette::for_theme(self.theme);

        match self.screen {
            Screen::TicketEntry => {
                draw_ticket_entry(&self.entry, &self.output_context(), frame, area, &palette);
            }
            Screen::Help => draw_help(&self.help, frame, area, &palette),
            Screen::ConfirmClear => {
                let block = Block::default()
                    .title(" callpad ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border));
                let lines = vec![
                    Line::from(""),
                    Line::from("Clear the ticket output?"),
                    Line::from("This cannot be undone."),
                    Line::from(""),
                    Line::from("y: clear  n: cancel"),
                ];
                let paragraph = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(block);
                let [centered] = Layout::vertical([Constraint::Min(0)])
                    .flex(Flex::Center)
                    .areas(area);
                frame.render_widget(paragraph, centered);
            }
        }
    }

    /// Handles a key event: dispatches to the active screen and applies the
    /// resulting action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = match self.screen {
            Screen::TicketEntry => self.entry.handle_key(key),
            Screen::Help => self.help.handle_key(key),
            Screen::ConfirmClear => self.handle_confirm_key(key),
        };
        self.apply(action);
    }

    /// Keys on the confirm-clear prompt: `y` discards, `n`/Esc cancels.
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y') => {
                self.retained = None;
                self.copy_state = CopyState::Idle;
                self.copied_at = None;
                self.entry.reset_form();
                Action::Navigate(Screen::TicketEntry)
            }
            KeyCode::Char('n') | KeyCode::Esc => Action::Navigate(Screen::TicketEntry),
            _ => Action::None,
        }
    }

    /// Applies an action returned by a screen handler.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                if screen == Screen::Help {
                    self.help.reset();
                }
                self.screen = screen;
            }
            Action::Retain(text) => {
                self.retained = Some(RetainedTicket::new(text));
                self.copy_state = CopyState::Idle;
                self.copied_at = None;
                self.entry.reset_form();
            }
            Action::Copy => self.copy_output(),
            Action::Clear => {
                if self.retained.is_some() {
                    self.screen = Screen::ConfirmClear;
                } else {
                    self.entry.reset_form();
                }
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(e) = self.store.save(self.theme) {
                    self.entry.set_error(format!("could not save theme: {e}"));
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Attempts the clipboard write for the retained ticket.
    ///
    /// A no-op when nothing is retained — the copy action is disabled then.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn copy_output(&mut self) {
        let Some(ticket) = &self.retained else {
            return;
        };
        let result = clipboard::copy_text(ticket.text());
        self.apply_copy_result(result, Instant::now());
    }

    /// Records the outcome of a clipboard write.
    ///
    /// Success shows the transient label (a repeat copy restarts the timer);
    /// failure pins the manual-copy instruction. The retained text itself is
    /// never touched.
    fn apply_copy_result(&mut self, result: Result<(), String>, now: Instant) {
        match result {
            Ok(()) => {
                self.copy_state = CopyState::Copied;
                self.copied_at = Some(now);
            }
            Err(_) => {
                self.copy_state = CopyState::Failed(MANUAL_COPY_HINT.to_string());
                self.copied_at = None;
            }
        }
    }

    /// Reverts the transient copy label once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.copy_state == CopyState::Copied
            && let Some(copied_at) = self.copied_at
            && now.duration_since(copied_at) >= COPY_FEEDBACK_DURATION
        {
            self.copy_state = CopyState::Idle;
            self.copied_at = None;
        }
    }

    /// Builds the output panel context from the retained ticket.
    fn output_context(&self) -> OutputContext {
        match &self.retained {
            Some(ticket) => OutputContext {
                text: ticket.text().to_string(),
                created_label: ticket.created_label(),
                copy_state: self.copy_state.clone(),
            },
            None => OutputContext {
                copy_state: self.copy_state.clone(),
                ..OutputContext::default()
            },
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns the retained ticket text, if any.
    pub fn retained_text(&self) -> Option<&str> {
        self.retained.as_ref().map(RetainedTicket::text)
    }

    /// Returns the current copy feedback state.
    pub fn copy_state(&self) -> &CopyState {
        &self.copy_state
    }

    /// Returns the active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns a reference to the entry screen state.
    pub fn entry(&self) -> &TicketEntryState {
        &self.entry
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};

    use super::*;
    use crate::tui::screens::ticket_entry::{CALL_STATUS, CUSTOMER_NAME};

    fn make_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::with_path(dir.path().join("preferences.json"));
        (dir, App::new(store).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn alt_press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::ALT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn retain_ticket(app: &mut App) {
        app.apply(Action::Retain(
            "Customer: Jane Doe\nPhone: -\nCall: Connected".to_string(),
        ));
    }

    mod construction {
        use super::*;

        #[test]
        fn starts_on_entry_with_empty_slot() {
            let (_dir, app) = make_app();
            assert_eq!(app.screen(), Screen::TicketEntry);
            assert_eq!(app.retained_text(), None);
            assert_eq!(app.copy_state(), &CopyState::Idle);
            assert!(!app.should_quit());
        }

        #[test]
        fn loads_saved_theme() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("preferences.json");
            PreferencesStore::with_path(path.clone())
                .save(Theme::Light)
                .unwrap();

            let app = App::new(PreferencesStore::with_path(path)).unwrap();
            assert_eq!(app.theme(), Theme::Light);
        }
    }

    mod retained_ticket {
        use super::*;

        #[test]
        fn retain_fills_the_slot_and_resets_the_form() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Char('J')));
            assert_eq!(app.entry().form().value(CUSTOMER_NAME), "J");

            retain_ticket(&mut app);
            assert_eq!(
                app.retained_text(),
                Some("Customer: Jane Doe\nPhone: -\nCall: Connected")
            );
            assert_eq!(app.entry().form().value(CUSTOMER_NAME), "");
        }

        #[test]
        fn retain_replaces_the_previous_ticket() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.apply(Action::Retain("Customer: Bob\nPhone: -\nCall: Dropped".into()));
            assert_eq!(
                app.retained_text(),
                Some("Customer: Bob\nPhone: -\nCall: Dropped")
            );
        }

        #[test]
        fn retain_resets_copy_feedback() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.apply_copy_result(Ok(()), Instant::now());
            assert_eq!(app.copy_state(), &CopyState::Copied);

            retain_ticket(&mut app);
            assert_eq!(app.copy_state(), &CopyState::Idle);
        }

        #[test]
        fn created_label_is_hh_mm() {
            let ticket = RetainedTicket::new("x".into());
            let label = ticket.created_label();
            assert_eq!(label.len(), 5);
            assert_eq!(&label[2..3], ":");
        }
    }

    mod clear {
        use super::*;

        #[test]
        fn clear_without_ticket_resets_form_only() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Char('J')));
            app.handle_key(alt_press(KeyCode::Char('r')));
            assert_eq!(app.screen(), Screen::TicketEntry);
            assert_eq!(app.entry().form().value(CUSTOMER_NAME), "");
        }

        #[test]
        fn clear_with_ticket_asks_for_confirmation() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.handle_key(alt_press(KeyCode::Char('r')));
            assert_eq!(app.screen(), Screen::ConfirmClear);
            assert!(app.retained_text().is_some());
        }

        #[test]
        fn confirm_discards_the_ticket() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.handle_key(alt_press(KeyCode::Char('r')));
            app.handle_key(press(KeyCode::Char('y')));
            assert_eq!(app.screen(), Screen::TicketEntry);
            assert_eq!(app.retained_text(), None);
        }

        #[test]
        fn cancel_keeps_the_ticket() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.handle_key(alt_press(KeyCode::Char('r')));
            app.handle_key(press(KeyCode::Char('n')));
            assert_eq!(app.screen(), Screen::TicketEntry);
            assert!(app.retained_text().is_some());
        }

        #[test]
        fn esc_cancels_the_confirmation() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.handle_key(alt_press(KeyCode::Char('r')));
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::TicketEntry);
            assert!(app.retained_text().is_some());
        }

        #[test]
        fn other_keys_on_confirmation_do_nothing() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.handle_key(alt_press(KeyCode::Char('r')));
            app.handle_key(press(KeyCode::Char('x')));
            assert_eq!(app.screen(), Screen::ConfirmClear);
        }
    }

    mod copy_feedback {
        use super::*;

        #[test]
        fn copy_without_ticket_is_a_noop() {
            let (_dir, mut app) = make_app();
            app.apply(Action::Copy);
            assert_eq!(app.copy_state(), &CopyState::Idle);
        }

        #[test]
        fn success_shows_transient_label() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            let now = Instant::now();
            app.apply_copy_result(Ok(()), now);
            assert_eq!(app.copy_state(), &CopyState::Copied);

            app.tick(now + Duration::from_millis(1999));
            assert_eq!(app.copy_state(), &CopyState::Copied);

            app.tick(now + Duration::from_millis(2000));
            assert_eq!(app.copy_state(), &CopyState::Idle);
        }

        #[test]
        fn repeat_copy_restarts_the_timer() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            let now = Instant::now();
            app.apply_copy_result(Ok(()), now);
            app.apply_copy_result(Ok(()), now + Duration::from_millis(1500));

            app.tick(now + Duration::from_millis(2500));
            assert_eq!(app.copy_state(), &CopyState::Copied);

            app.tick(now + Duration::from_millis(3500));
            assert_eq!(app.copy_state(), &CopyState::Idle);
        }

        #[test]
        fn failure_pins_the_manual_hint() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            let now = Instant::now();
            app.apply_copy_result(Err("no clipboard".to_string()), now);
            assert_eq!(
                app.copy_state(),
                &CopyState::Failed(MANUAL_COPY_HINT.to_string())
            );

            // The failure message does not time out.
            app.tick(now + Duration::from_millis(5000));
            assert!(matches!(app.copy_state(), CopyState::Failed(_)));
        }

        #[test]
        fn failure_keeps_the_retained_text() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            app.apply_copy_result(Err("no clipboard".to_string()), Instant::now());
            assert_eq!(
                app.retained_text(),
                Some("Customer: Jane Doe\nPhone: -\nCall: Connected")
            );
        }
    }

    mod theme {
        use super::*;

        #[test]
        fn toggle_flips_and_persists() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("preferences.json");
            let mut app = App::new(PreferencesStore::with_path(path.clone())).unwrap();
            assert_eq!(app.theme(), Theme::Dark);

            app.handle_key(alt_press(KeyCode::Char('t')));
            assert_eq!(app.theme(), Theme::Light);
            assert_eq!(
                PreferencesStore::with_path(path).load().unwrap(),
                Theme::Light
            );
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn f1_opens_help_and_q_returns() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Char('q')));
            assert_eq!(app.screen(), Screen::TicketEntry);
        }

        #[test]
        fn esc_on_entry_quits() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn release_events_are_ignored() {
            let (_dir, mut app) = make_app();
            app.handle_key(release(KeyCode::Esc));
            assert!(!app.should_quit());
        }
    }

    mod submission_flow {
        use super::*;

        fn type_string(app: &mut App, s: &str) {
            for ch in s.chars() {
                app.handle_key(press(KeyCode::Char(ch)));
            }
        }

        #[test]
        fn full_submission_retains_formatted_ticket() {
            let (_dir, mut app) = make_app();
            type_string(&mut app, "Jane Doe");
            // Move to the call status select and pick "Not connected".
            app.handle_key(press(KeyCode::Tab));
            app.handle_key(press(KeyCode::Tab));
            assert_eq!(app.entry().form().focus(), CALL_STATUS);
            app.handle_key(press(KeyCode::Right));
            app.handle_key(press(KeyCode::Right));

            app.handle_key(press(KeyCode::Enter));
            assert_eq!(
                app.retained_text(),
                Some("Customer: Jane Doe\nPhone: -\nCall: Not connected")
            );
        }

        #[test]
        fn failed_submission_leaves_slot_unchanged() {
            let (_dir, mut app) = make_app();
            retain_ticket(&mut app);
            // Empty form: name is missing, submission must fail.
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(
                app.retained_text(),
                Some("Customer: Jane Doe\nPhone: -\nCall: Connected")
            );
        }
    }
}
