//! Card view
//!
//! Shows the physical card, or how to request one

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::display::format_card_details;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" البطاقة ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(card) = app.card() else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "لا توجد بطاقة فعلية بعد",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("[n]", Style::default().fg(Color::Cyan)),
                Span::raw(" طلب بطاقة"),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    };

    let status_color = if card.is_frozen {
        Color::Blue
    } else if card.is_activated {
        Color::Green
    } else {
        Color::Yellow
    };

    let details = format_card_details(card, app.settings.limits.card_daily_limit, app.reveal_card);
    let mut lines: Vec<Line> = details
        .lines()
        .enumerate()
        .map(|(i, text)| {
            let style = if i == 1 {
                Style::default().fg(status_color)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(text.to_string(), style))
        })
        .collect();

    lines.push(Line::from(""));
    let key = Style::default().fg(Color::Cyan);
    let mut hints = Vec::new();
    if !card.is_activated {
        hints.push(Span::styled("[a]", key));
        hints.push(Span::raw(" تفعيل  "));
    }
    hints.push(Span::styled("[c]", key));
    hints.push(Span::raw(" شحن  "));
    hints.push(Span::styled("[f]", key));
    hints.push(Span::raw(if card.is_frozen { " إلغاء التجميد  " } else { " تجميد  " }));
    hints.push(Span::styled("[v]", key));
    hints.push(Span::raw(if app.reveal_card { " إخفاء الرقم" } else { " إظهار الرقم" }));
    lines.push(Line::from(hints));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
