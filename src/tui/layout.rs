//! Layout definitions for the TUI
//!
//! Defines the overall layout structure: view tabs, main panel, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    /// View tabs across the top
    pub tabs: Rect,
    /// Main content area
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: vertical[0],
            main: vertical[1],
            status_bar: vertical[2],
        }
    }
}

/// Layout for the home view
pub struct HomeLayout {
    /// Balance card
    pub balance: Rect,
    /// Quick actions
    pub actions: Rect,
    /// Recent transactions preview
    pub recent: Rect,
}

impl HomeLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // Balance
                Constraint::Length(3), // Actions
                Constraint::Min(3),    // Recent
            ])
            .split(area);

        Self {
            balance: chunks[0],
            actions: chunks[1],
            recent: chunks[2],
        }
    }
}

/// Area for a toast in the top-right corner
pub fn toast_area(r: Rect) -> Rect {
    let width = 48.min(r.width);
    let height = 5.min(r.height);
    Rect::new(r.x + r.width - width, r.y, width, height)
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed_fits_small_areas() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect_fixed(50, 7, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn test_toast_area_is_top_right() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = toast_area(area);
        assert_eq!(rect.x + rect.width, 100);
        assert_eq!(rect.y, 0);
    }
}
