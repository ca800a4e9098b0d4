//! Card activation dialog
//!
//! Three-digit code entry. A wrong code shows an error that clears itself
//! on a later tick unless the user types or closes the dialog first.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::activation::ActivationOutcome;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::validation::CVV_LEN;

/// Render the activation dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(56, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" تفعيل البطاقة ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let activation = &app.activation;
    let entered = activation.code().chars().count();
    let slots: String = (0..CVV_LEN)
        .map(|i| if i < entered { "● " } else { "_ " })
        .collect();

    let confirm_style = if activation.can_activate() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "أدخل الرمز المكون من 3 أرقام الموجود خلف البطاقة",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            slots,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match activation.error() {
        Some(error) => lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }

    lines.push(Line::from(vec![
        Span::styled("[Enter]", confirm_style),
        Span::raw(" تفعيل  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" إلغاء"),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Handle key input for the activation dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Backspace => app.activation.backspace(),
        KeyCode::Char(c) => app.activation.input_char(c),
        KeyCode::Enter => match app.activation.try_activate(Instant::now()) {
            ActivationOutcome::Activated => app.execute_activation(),
            ActivationOutcome::Rejected => {
                tracing::debug!("activation code rejected");
            }
            ActivationOutcome::Incomplete => {}
        },
        _ => return false,
    }
    true
}
