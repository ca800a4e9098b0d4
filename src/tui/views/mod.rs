//! TUI Views module
//!
//! Contains the main views (home, card, history), the tab bar and the
//! status bar.

pub mod card;
pub mod history;
pub mod home;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Tabs},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::{toast_area, AppLayout};
use super::widgets::{error_dialog_area, ErrorDialog, ToastWidget};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Home => home::render(frame, app, layout.main),
        ActiveView::Card => card::render(frame, app, layout.main),
        ActiveView::History => history::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }

    if let Some(toast) = app.toasts.current() {
        let area = toast_area(frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(ToastWidget::new(toast), area);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let selected = ActiveView::ALL
        .iter()
        .position(|v| *v == app.active_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Dinar Wallet ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog.clone() {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(action) => dialogs::confirm::render(frame, app, action),
        ActiveDialog::Wizard => dialogs::wizard::render(frame, app),
        ActiveDialog::ActivateCard => dialogs::activate_card::render(frame, app),
        ActiveDialog::Error(info) => {
            let area = error_dialog_area(frame.area());
            frame.render_widget(Clear, area);
            frame.render_widget(ErrorDialog::new(&info), area);
        }
        ActiveDialog::None => {}
    }
}
