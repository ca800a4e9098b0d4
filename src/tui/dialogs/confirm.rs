//! Confirmation dialog
//!
//! Simple yes/no confirmation before card and bonus actions

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Currency;
use crate::services::SubmissionService;
use crate::tui::app::{App, ConfirmAction};
use crate::tui::layout::centered_rect_fixed;

/// Question shown for an action
pub fn message(app: &App, action: ConfirmAction) -> String {
    match action {
        ConfirmAction::FreezeCard => "تجميد البطاقة؟ لن تعمل أي عملية دفع حتى إلغاء التجميد".into(),
        ConfirmAction::UnfreezeCard => "إلغاء تجميد البطاقة؟".into(),
        ConfirmAction::ClaimBonus => {
            let bonus = SubmissionService::new(app.backend, app.system, app.settings)
                .bonus_amount();
            format!("المطالبة بمكافأة {}؟", Currency::Dzd.format(bonus))
        }
    }
}

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, app: &App, action: ConfirmAction) {
    let area = centered_rect_fixed(56, 7, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" تأكيد ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message(app, action),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" نعم  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" لا  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" إلغاء"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Handle key input for the confirmation dialog
pub fn handle_key(app: &mut App, action: ConfirmAction, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.close_dialog();
            app.execute_confirmed(action);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{BalanceRecord, Card, Money};
    use crate::services::{MemoryBackend, RecordingNotifier, WalletBackend};
    use crate::tui::app::ActiveDialog;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_yes_freezes_card() {
        let backend = MemoryBackend::new();
        backend.add_card(Card::new_solid());
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_dialog(ActiveDialog::Confirm(ConfirmAction::FreezeCard));
        handle_key(
            &mut app,
            ConfirmAction::FreezeCard,
            KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE),
        );

        assert!(!app.has_dialog());
        assert!(backend.cards().unwrap()[0].is_frozen);
    }

    #[test]
    fn test_no_leaves_balance_untouched() {
        let backend = MemoryBackend::with_balance(BalanceRecord {
            dzd: Some(Money::from_units(10_000)),
            ..Default::default()
        });
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_dialog(ActiveDialog::Confirm(ConfirmAction::ClaimBonus));
        handle_key(
            &mut app,
            ConfirmAction::ClaimBonus,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        );

        assert!(!app.has_dialog());
        assert_eq!(app.dashboard.balance.dzd, Money::from_units(10_000));
        assert!(backend.all_transactions().is_empty());
    }

    #[test]
    fn test_bonus_message_shows_amount() {
        let backend = MemoryBackend::with_balance(BalanceRecord {
            dzd: Some(Money::from_units(10_000)),
            ..Default::default()
        });
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let app = App::new(&backend, &system, &settings);

        assert!(message(&app, ConfirmAction::ClaimBonus).contains("500"));
    }
}
