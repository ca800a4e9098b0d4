//! Home view
//!
//! Balance card, quick actions and the latest transactions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Currency;
use crate::tui::app::App;
use crate::tui::layout::HomeLayout;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = HomeLayout::new(area);
    render_balance(frame, app, layout.balance);
    render_actions(frame, layout.actions);
    render_recent(frame, app, layout.recent);
}

fn render_balance(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" الرصيد ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let balance = &app.dashboard.balance;
    let main = if app.dashboard.loading {
        "...".to_string()
    } else {
        Currency::Dzd.format(balance.dzd)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            main,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let others: Vec<Span> = [Currency::Eur, Currency::Usd, Currency::Gbp]
        .into_iter()
        .flat_map(|currency| {
            [
                Span::styled(
                    format!("{} ", currency.code()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}   ", currency.format(balance.get(currency))),
                    Style::default().fg(Color::Gray),
                ),
            ]
        })
        .collect();
    lines.push(Line::from(others));

    if app.dashboard.unread_notifications > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("🔔 {} إشعارات غير مقروءة", app.dashboard.unread_notifications),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_actions(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled("[r]", key),
        Span::raw(" شحن   "),
        Span::styled("[w]", key),
        Span::raw(" سحب   "),
        Span::styled("[t]", key),
        Span::raw(" تحويل   "),
        Span::styled("[b]", key),
        Span::raw(" مكافأة"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_recent(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" آخر المعاملات ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.dashboard.preview.is_empty() {
        let text = Paragraph::new("لا توجد معاملات حتى الآن")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let lines: Vec<Line> = app
        .dashboard
        .preview
        .iter()
        .map(|view| {
            let amount_color = if view.is_inflow { Color::Green } else { Color::Red };
            Line::from(vec![
                Span::raw(format!("{} ", view.icon.glyph())),
                Span::styled(
                    format!("{:<22}", view.title),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>16}  ", view.amount),
                    Style::default().fg(amount_color),
                ),
                Span::styled(view.date.clone(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
