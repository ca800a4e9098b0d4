//! Transaction history view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::TransactionView;
use crate::models::TransactionStatus;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" المعاملات ({}) ", app.history.len()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.history.is_empty() {
        let text = Paragraph::new("لا توجد معاملات حتى الآن")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(3),  // Icon
        Constraint::Length(11), // Date
        Constraint::Length(24), // Title
        Constraint::Min(20),    // Details
        Constraint::Length(16), // Amount
        Constraint::Length(10), // Status
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Date").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Details").style(bold),
        Cell::from("Amount").style(bold),
        Cell::from("Status").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .history
        .iter()
        .map(|txn| {
            let view = TransactionView::from_record(txn);
            let amount_style = if view.is_inflow {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            let status_color = match txn.status {
                TransactionStatus::Pending => Color::Yellow,
                TransactionStatus::Completed => Color::Green,
                TransactionStatus::Failed => Color::Red,
            };

            Row::new(vec![
                Cell::from(view.icon.glyph()),
                Cell::from(view.date),
                Cell::from(view.title),
                Cell::from(view.description),
                Cell::from(view.amount).style(amount_style),
                Cell::from(txn.status.to_string()).style(Style::default().fg(status_color)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
