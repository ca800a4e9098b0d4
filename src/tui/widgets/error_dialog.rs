//! Error dialog widget
//!
//! Displays detailed error information with recovery suggestions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::WalletError;

/// An error dialog with details and suggestions
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// The error title/summary
    pub title: String,
    /// Detailed error message
    pub details: String,
    /// Suggested recovery actions
    pub suggestions: Vec<String>,
    /// Whether the failed action can be retried as-is
    pub retryable: bool,
}

impl ErrorInfo {
    /// Create error info from a WalletError
    pub fn from_error(error: &WalletError) -> Self {
        let (title, details, suggestions) = match error {
            WalletError::Config(msg) => (
                "Configuration Error".to_string(),
                msg.clone(),
                vec![
                    "Check config.json for syntax errors".to_string(),
                    "Delete config.json to restore the defaults".to_string(),
                ],
            ),
            WalletError::Io(msg) => (
                "I/O Error".to_string(),
                msg.clone(),
                vec![
                    "Check that you have write permissions to the data directory".to_string(),
                    "Ensure there is enough disk space".to_string(),
                ],
            ),
            WalletError::Json(msg) => (
                "Data File Error".to_string(),
                format!("Failed to read or write data: {}", msg),
                vec!["The data file may be corrupted".to_string()],
            ),
            WalletError::Storage(msg) => (
                "Storage Error".to_string(),
                msg.clone(),
                vec!["Check that the data directory is accessible".to_string()],
            ),
            WalletError::Validation(msg) => (
                "Validation Error".to_string(),
                msg.clone(),
                vec!["Review the input values and try again".to_string()],
            ),
            WalletError::InsufficientFunds {
                currency,
                needed,
                available,
            } => (
                "Insufficient Funds".to_string(),
                format!(
                    "Need {}, have {}",
                    currency.format(*needed),
                    currency.format(*available)
                ),
                vec!["Recharge the wallet or enter a smaller amount".to_string()],
            ),
            WalletError::Backend { operation, message } => (
                "Request Failed".to_string(),
                format!("{} failed: {}", operation, message),
                vec![
                    "Nothing was changed; press r to try again".to_string(),
                    "Check your connection".to_string(),
                ],
            ),
            WalletError::InvalidStep(msg) => (
                "Wizard Error".to_string(),
                msg.clone(),
                vec!["Complete the remaining steps first".to_string()],
            ),
            WalletError::NotFound {
                entity_type,
                identifier,
            } => (
                format!("{} Not Found", entity_type),
                format!(
                    "Could not find {} '{}'",
                    entity_type.to_lowercase(),
                    identifier
                ),
                vec![format!("Request a {} first", entity_type.to_lowercase())],
            ),
            WalletError::Tui(msg) => (
                "Interface Error".to_string(),
                msg.clone(),
                vec![
                    "Try resizing your terminal window".to_string(),
                    "Use the CLI commands instead".to_string(),
                ],
            ),
        };

        Self {
            title,
            details,
            suggestions,
            retryable: error.is_retryable(),
        }
    }

    /// Create a simple error info
    pub fn simple(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
            suggestions: vec![],
            retryable: false,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// Widget for rendering an error dialog
pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self { error }
    }
}

impl<'a> Widget for ErrorDialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Error: {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Details
                Constraint::Min(1),    // Suggestions
                Constraint::Length(1), // Close hint
            ])
            .split(inner);

        Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        if !self.error.suggestions.is_empty() {
            let mut lines: Vec<Line> = vec![Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];
            for suggestion in &self.error.suggestions {
                lines.push(Line::from(vec![
                    Span::raw("  - "),
                    Span::raw(suggestion.as_str()),
                ]));
            }
            Paragraph::new(lines)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }

        let hint = if self.error.retryable {
            "r: Retry  Esc/Enter: Close"
        } else {
            "Press Esc or Enter to close"
        };
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Calculate the area for an error dialog (centered in parent)
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(10, 20).min(parent.height);

    let x = parent.x + (parent.width - width) / 2;
    let y = parent.y + (parent.height - height) / 2;

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Money};

    #[test]
    fn test_error_info_from_validation_error() {
        let error = WalletError::Validation("يرجى إدخال مبلغ صحيح".to_string());
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "Validation Error");
        assert!(info.details.contains("يرجى إدخال مبلغ صحيح"));
        assert!(!info.retryable);
    }

    #[test]
    fn test_backend_error_is_retryable() {
        let error = WalletError::backend("submit_balance", "timeout");
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "Request Failed");
        assert!(info.details.contains("submit_balance"));
        assert!(info.retryable);
    }

    #[test]
    fn test_insufficient_funds_formats_currency() {
        let error = WalletError::InsufficientFunds {
            currency: Currency::Dzd,
            needed: Money::from_units(5_000),
            available: Money::from_units(1_200),
        };
        let info = ErrorInfo::from_error(&error);

        assert!(info.details.contains("5,000 دج"));
        assert!(info.details.contains("1,200 دج"));
    }

    #[test]
    fn test_card_not_found() {
        let info = ErrorInfo::from_error(&WalletError::card_not_found("physical card"));
        assert_eq!(info.title, "Card Not Found");
    }

    #[test]
    fn test_simple_error_info() {
        let info =
            ErrorInfo::simple("Test Error", "Something went wrong").with_suggestion("Try again");

        assert_eq!(info.title, "Test Error");
        assert_eq!(info.suggestions.len(), 1);
    }
}
