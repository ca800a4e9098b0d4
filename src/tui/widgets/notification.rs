//! Toast notification widget
//!
//! Displays temporary notifications to the user. Error toasts for failed
//! backend calls carry a retry hint.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::models::NotificationKind;

/// Type of toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Get the color for this toast type
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// Get the icon/prefix for this toast type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }
}

impl From<NotificationKind> for ToastKind {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Success => Self::Success,
            NotificationKind::Error => Self::Error,
            NotificationKind::Warning => Self::Warning,
            NotificationKind::Info => Self::Info,
        }
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    /// Show the `[r] Retry` hint
    pub retry: bool,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            retry: false,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title, message)
    }

    /// Set the display duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Offer a retry; the toast then stays until dismissed or retried
    pub fn with_retry(mut self) -> Self {
        self.retry = true;
        self
    }

    /// Check if the toast has expired at `now`
    pub fn is_expired(&self, now: Instant) -> bool {
        !self.retry && now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// Widget for rendering a toast
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }
}

impl<'a> Widget for ToastWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.toast.kind.color();

        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} {} ", self.toast.kind.icon(), self.toast.title))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        let mut lines = vec![Line::from(self.toast.message.as_str())];
        if self.toast.retry {
            lines.push(Line::from(vec![
                Span::styled("[r]", Style::default().fg(Color::Yellow)),
                Span::raw(" Retry  "),
                Span::styled("[Esc]", Style::default().fg(Color::Red)),
                Span::raw(" Dismiss"),
            ]));
        }

        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Toasts waiting to be shown, oldest first
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Remove expired toasts
    pub fn remove_expired(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    /// Get the current toast to display (if any)
    pub fn current(&self) -> Option<&Toast> {
        self.toasts.first()
    }

    /// Whether a retry is being offered
    pub fn has_retry(&self) -> bool {
        self.toasts.iter().any(|t| t.retry)
    }

    /// Drop retry toasts once the retry was taken or declined
    pub fn dismiss_retry(&mut self) {
        self.toasts.retain(|t| !t.retry);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let toast = Toast::success("ok", "done").with_duration(Duration::from_secs(3));
        let start = toast.created_at;

        assert!(!toast.is_expired(start + Duration::from_secs(2)));
        assert!(toast.is_expired(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_retry_toast_stays_until_dismissed() {
        let mut queue = ToastQueue::new();
        let toast = Toast::error("failed", "backend down").with_retry();
        let start = toast.created_at;
        queue.push(toast);
        queue.push(Toast::success("ok", "done"));

        queue.remove_expired(start + Duration::from_secs(60));
        assert_eq!(queue.len(), 1);
        assert!(queue.has_retry());

        queue.dismiss_retry();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_kind_from_notification_kind() {
        assert_eq!(ToastKind::from(NotificationKind::Success), ToastKind::Success);
        assert_eq!(ToastKind::from(NotificationKind::Error).color(), Color::Red);
    }
}
