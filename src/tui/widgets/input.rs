//! Text input widget
//!
//! A single-line field with a character cursor, a label and an inline error
//! line underneath.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Editable text with a cursor counted in characters, not bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

/// Renders a labelled field; two rows when an error is shown
pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    cursor: Option<usize>,
    error: Option<&'a str>,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            cursor: None,
            error: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Focus the field with the cursor at a character index
    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl<'a> Widget for TextInput<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let focused = self.cursor.is_some();

        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut spans = vec![
            Span::styled(self.label, label_style),
            Span::raw(": "),
        ];

        if self.value.is_empty() && !focused {
            spans.push(Span::styled(
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            let cursor = self.cursor.unwrap_or(usize::MAX);
            let before: String = self.value.chars().take(cursor).collect();
            let at = self.value.chars().nth(cursor);
            let after: String = self.value.chars().skip(cursor.saturating_add(1)).collect();

            spans.push(Span::styled(before, Style::default().fg(Color::White)));
            if focused {
                spans.push(Span::styled(
                    at.unwrap_or('_').to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ));
                spans.push(Span::styled(after, Style::default().fg(Color::White)));
            }
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if let Some(error) = self.error {
            if area.height > 1 {
                buf.set_line(
                    area.x,
                    area.y + 1,
                    &Line::from(Span::styled(
                        format!("  {}", error),
                        Style::default().fg(Color::Red),
                    )),
                    area.width,
                );
            }
        }
    }
}
