//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(get_help_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Get help lines for the current context
fn get_help_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("Tab", "Next view"),
        key_line("1/2/3", "Home / Card / History"),
        key_line("g", "Reload from storage"),
        key_line("r", "Retry a failed action (when offered)"),
        Line::from(""),
    ];

    match app.active_view {
        ActiveView::Home => {
            lines.push(section("Home"));
            lines.push(Line::from(""));
            lines.push(key_line("r", "Recharge via BaridiMob"));
            lines.push(key_line("w", "Withdraw to bank"));
            lines.push(key_line("t", "Instant transfer"));
            lines.push(key_line("b", "Claim bonus"));
        }
        ActiveView::Card => {
            lines.push(section("Card"));
            lines.push(Line::from(""));
            lines.push(key_line("n", "Request a physical card"));
            lines.push(key_line("a", "Activate with security code"));
            lines.push(key_line("c", "Charge card from wallet"));
            lines.push(key_line("f", "Freeze / unfreeze"));
            lines.push(key_line("v", "Show / hide card number"));
        }
        ActiveView::History => {
            lines.push(section("History"));
            lines.push(Line::from(""));
            lines.push(key_line("j/k", "Move selection down/up"));
        }
    }

    lines.push(Line::from(""));
    lines.push(section("Wizards"));
    lines.push(Line::from(""));
    lines.push(key_line("Enter", "Next step / confirm"));
    lines.push(key_line("Esc", "Previous step / cancel"));
    lines.push(key_line("Tab", "Next field"));
    lines.push(key_line("←/→", "Change choice"));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
