//! Wizard dialog
//!
//! One dialog renders every flow built on the wizard engine: recharge,
//! withdrawal, instant transfer, card charge and card request. Enter
//! advances (or submits on the last step), Esc goes back a step and closes
//! the dialog from step 1.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::error::{WalletError, WalletResult};
use crate::services::{SubmissionOutcome, SubmissionService};
use crate::tui::app::{App, RetryAction};
use crate::tui::layout::centered_rect;
use crate::tui::widgets::{TextBuffer, TextInput};
use crate::wizard::{field, FieldRule, FieldSpec, Flow, Wizard, WizardConfig};

/// State for the wizard dialog
#[derive(Debug, Clone)]
pub struct WizardDialogState {
    pub flow: Flow,
    pub wizard: Wizard,
    /// Focused field on the current step
    pub focused: usize,
    /// Edit buffer of the focused field
    pub input: TextBuffer,
    /// Error from the last submit that is not tied to a field
    pub submit_error: Option<String>,
}

impl WizardDialogState {
    pub fn new(flow: Flow, config: WizardConfig) -> Self {
        let mut state = Self {
            flow,
            wizard: Wizard::new(config),
            focused: 0,
            input: TextBuffer::default(),
            submit_error: None,
        };
        state.load_focus();
        state
    }

    /// Fields of the current step
    pub fn step_fields(&self) -> &[FieldSpec] {
        self.wizard
            .current_spec()
            .map(|s| s.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn focused_field(&self) -> Option<&FieldSpec> {
        self.step_fields().get(self.focused)
    }

    pub fn next_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 {
            self.focused = (self.focused + 1) % count;
            self.load_focus();
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.step_fields().len();
        if count > 0 {
            self.focused = (self.focused + count - 1) % count;
            self.load_focus();
        }
    }

    /// Apply an edit to the focused field and push it into the wizard
    pub fn edit(&mut self, apply: impl FnOnce(&mut TextBuffer)) {
        let Some(name) = self.focused_field().map(|f| f.name) else {
            return;
        };
        apply(&mut self.input);
        self.wizard.update_field(name, self.input.value());
        self.submit_error = None;
    }

    /// Cycle a choice field through its options
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(spec) = self.focused_field() else {
            return;
        };
        let FieldRule::OneOf { options, .. } = &spec.rule else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let name = spec.name;
        let current = options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(self.wizard.field(name).trim()));
        let index = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        let value = options[index].clone();
        self.input = TextBuffer::new(value.clone());
        self.wizard.update_field(name, value);
        self.submit_error = None;
    }

    /// Validate the step and move on; false leaves the errors on the fields
    pub fn advance(&mut self) -> bool {
        if !self.wizard.go_to_next_step() {
            return false;
        }
        self.focused = 0;
        self.load_focus();
        true
    }

    /// Go back a step; false when already on step 1
    pub fn back(&mut self) -> bool {
        if self.wizard.current_step() <= 1 {
            return false;
        }
        self.wizard.go_to_previous_step();
        self.focused = 0;
        self.submit_error = None;
        self.load_focus();
        true
    }

    fn load_focus(&mut self) {
        let value = self
            .focused_field()
            .map(|f| self.wizard.field(f.name).to_string())
            .unwrap_or_default();
        self.input = TextBuffer::new(value);
    }
}

/// Render the wizard dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(state) = app.wizard.as_ref() else {
        return;
    };
    let wizard = &state.wizard;
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(
            " {} ({}/{}) ",
            wizard.config().title,
            wizard.current_step(),
            wizard.total_steps()
        ))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let Some(step) = wizard.current_spec() else {
        return;
    };

    let mut constraints = vec![
        Constraint::Length(1),                       // Step title
        Constraint::Length(step.hint.len() as u16), // Hints
        Constraint::Length(1),                       // Spacer
    ];
    constraints.extend(step.fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(1)); // Submit error
    constraints.push(Constraint::Min(0)); // Remaining
    constraints.push(Constraint::Length(1)); // Hints
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            step.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))),
        chunks[0],
    );

    let hint_lines: Vec<Line> = step
        .hint
        .iter()
        .map(|h| Line::from(Span::styled(h.as_str(), Style::default().fg(Color::Gray))))
        .collect();
    frame.render_widget(Paragraph::new(hint_lines).wrap(Wrap { trim: false }), chunks[1]);

    for (i, spec) in step.fields.iter().enumerate() {
        let focused = i == state.focused;
        let value = if focused {
            state.input.value()
        } else {
            wizard.field(spec.name)
        };
        let widget = TextInput::new(&spec.label, value)
            .placeholder(&spec.placeholder)
            .cursor(focused.then(|| state.input.cursor()))
            .error(wizard.error(spec.name));
        frame.render_widget(widget, chunks[3 + i]);
    }

    let error_row = chunks[3 + step.fields.len()];
    if let Some(error) = &state.submit_error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))),
            error_row,
        );
    }

    let action = if wizard.is_final_step() {
        " تأكيد  "
    } else {
        " التالي  "
    };
    let back = if wizard.current_step() > 1 {
        " رجوع"
    } else {
        " إلغاء"
    };
    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(action),
        Span::styled("[Tab]", Style::default().fg(Color::White)),
        Span::raw(" حقل  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(back),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[chunks.len() - 1]);
}

/// Handle key input for the wizard dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let Some(state) = app.wizard.as_mut() else {
        return false;
    };

    match key.code {
        KeyCode::Esc => {
            if !state.back() {
                app.close_dialog();
            }
        }
        KeyCode::Enter => {
            if state.wizard.is_final_step() {
                execute_submit(app);
            } else {
                state.advance();
            }
        }
        KeyCode::Tab | KeyCode::Down => state.next_field(),
        KeyCode::BackTab | KeyCode::Up => state.prev_field(),
        KeyCode::Left if is_choice(state) => state.cycle_choice(false),
        KeyCode::Right if is_choice(state) => state.cycle_choice(true),
        KeyCode::Left => state.input.move_left(),
        KeyCode::Right => state.input.move_right(),
        KeyCode::Home => state.input.move_start(),
        KeyCode::End => state.input.move_end(),
        KeyCode::Backspace => state.edit(|input| input.backspace()),
        KeyCode::Delete => state.edit(|input| input.delete()),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.edit(|input| input.insert(c));
        }
        _ => return false,
    }
    true
}

fn is_choice(state: &WizardDialogState) -> bool {
    matches!(
        state.focused_field().map(|f| &f.rule),
        Some(FieldRule::OneOf { .. })
    )
}

/// Submit the open wizard through the flow's submission operation
///
/// Success closes the dialog. Validation and balance errors stay inline on
/// the wizard; backend failures keep the wizard on its step and offer a
/// retry.
pub fn execute_submit(app: &mut App) {
    let submissions = SubmissionService::new(app.backend, app.system, app.settings);
    let card = app.card().cloned();
    let Some(state) = app.wizard.as_mut() else {
        return;
    };

    let result: WalletResult<SubmissionOutcome> = match state.flow {
        Flow::Recharge => state.wizard.submit(|intent| submissions.recharge(&intent)),
        Flow::Withdraw => state.wizard.submit(|intent| submissions.withdraw(&intent)),
        Flow::InstantTransfer => state
            .wizard
            .submit(|intent| submissions.instant_transfer(&intent)),
        Flow::CardCharge(currency) => match card {
            Some(card) => state
                .wizard
                .submit(|intent| submissions.charge_card(&card, intent.amount, currency)),
            None => Err(WalletError::card_not_found("physical card")),
        },
        Flow::CardRequest => state.wizard.submit_form(|values| {
            let country = values.get(field::COUNTRY).map(String::as_str).unwrap_or("");
            let address = values.get(field::ADDRESS).map(String::as_str).unwrap_or("");
            submissions.request_card(country, address)
        }),
    };

    match result {
        Ok(outcome) => {
            tracing::info!(flow = ?state.flow, "wizard submitted");
            app.close_dialog();
            app.on_submitted(outcome);
        }
        Err(e) if e.is_retryable() => {
            state.submit_error = None;
            app.on_failed(&e, RetryAction::Wizard);
        }
        Err(e) => {
            state.submit_error = Some(match &e {
                WalletError::Validation(msg) => msg.clone(),
                other => other.to_string(),
            });
            state.focused = 0;
            state.load_focus();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{BalanceRecord, Currency, Money, TransactionKind};
    use crate::services::{BackendOp, MemoryBackend, RecordingNotifier, WalletBackend};
    use crate::tui::app::ActiveDialog;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_recharge_below_minimum_stays_on_step_one() {
        let backend = MemoryBackend::new();
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::Recharge);
        type_str(&mut app, "500");
        handle_key(&mut app, key(KeyCode::Enter));

        let state = app.wizard.as_ref().unwrap();
        assert_eq!(state.wizard.current_step(), 1);
        assert_eq!(
            state.wizard.error(field::AMOUNT),
            Some("الحد الأدنى: 1000 دج")
        );
    }

    #[test]
    fn test_recharge_walkthrough_submits_once() {
        let backend = MemoryBackend::new();
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::Recharge);
        type_str(&mut app, "5000");
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Enter));
        type_str(&mut app, "AB12345");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.wizard.is_none());
        assert!(matches!(app.active_dialog, ActiveDialog::None));
        let txns = backend.all_transactions();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].kind, TransactionKind::Recharge);
        assert_eq!(txns[0].amount, Money::from_units(5_000));
        assert_eq!(system.sent().len(), 1);
    }

    #[test]
    fn test_escape_goes_back_then_closes() {
        let backend = MemoryBackend::new();
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::Recharge);
        type_str(&mut app, "5000");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.wizard.as_ref().unwrap().wizard.current_step(), 2);

        handle_key(&mut app, key(KeyCode::Esc));
        let state = app.wizard.as_ref().unwrap();
        assert_eq!(state.wizard.current_step(), 1);
        assert_eq!(state.input.value(), "5000");

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.wizard.is_none());
    }

    #[test]
    fn test_backend_failure_keeps_step_and_retries() {
        let backend = MemoryBackend::with_balance(BalanceRecord {
            dzd: Some(Money::from_units(5_000)),
            ..Default::default()
        });
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::InstantTransfer);
        type_str(&mut app, "amina@example.com");
        handle_key(&mut app, key(KeyCode::Enter));
        type_str(&mut app, "1000");

        backend.fail(BackendOp::SubmitBalance);
        handle_key(&mut app, key(KeyCode::Enter));

        let state = app.wizard.as_ref().unwrap();
        assert_eq!(state.wizard.current_step(), 2);
        assert_eq!(state.wizard.field(field::AMOUNT), "1000");
        assert_eq!(app.pending_retry, Some(RetryAction::Wizard));
        assert!(backend.all_transactions().is_empty());

        backend.recover(BackendOp::SubmitBalance);
        app.retry();

        assert!(app.wizard.is_none());
        assert_eq!(app.dashboard.balance.dzd, Money::from_units(4_000));
        assert_eq!(backend.all_transactions().len(), 1);
    }

    #[test]
    fn test_card_request_cycles_countries() {
        let backend = MemoryBackend::new();
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::CardRequest);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(
            app.wizard.as_ref().unwrap().wizard.field(field::COUNTRY),
            "algeria"
        );

        handle_key(&mut app, key(KeyCode::Tab));
        type_str(&mut app, "12 Rue Didouche Mourad");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.wizard.is_none());
        assert_eq!(backend.cards().unwrap().len(), 1);
        assert!(app.dashboard.card.is_some());
    }

    #[test]
    fn test_card_charge_limited_to_available() {
        let backend = MemoryBackend::with_balance(BalanceRecord {
            eur: Some(Money::from_units(20)),
            ..Default::default()
        });
        backend.add_card(crate::models::Card::new_solid());
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::CardCharge(Currency::Eur));
        type_str(&mut app, "25");
        handle_key(&mut app, key(KeyCode::Enter));

        let state = app.wizard.as_ref().unwrap();
        assert_eq!(state.wizard.current_step(), 1);
        assert!(state.wizard.error(field::AMOUNT).is_some());
        assert!(backend.all_transactions().is_empty());
        assert_eq!(app.dashboard.balance.eur, Money::from_units(20));
    }
}
