//! Card activation by security code
//!
//! The code is typed into a zeroized buffer, limited to three digits. A wrong
//! code shows an error that clears itself after a delay unless the user edits
//! the field or closes the dialog first.

use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use crate::timer::ScheduledAction;
use crate::validation::{sanitize_cvv, CVV_LEN};

/// Shown when the entered code does not match the card
pub const WRONG_CODE: &str = "الرمز خاطئ. تأكد من الرمز الموجود خلف البطاقة";

/// Result of an activation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    Rejected,
    /// Fewer than three digits entered; nothing happened
    Incomplete,
}

/// State of the activation dialog
pub struct ActivationState {
    code: Zeroizing<String>,
    expected: Zeroizing<String>,
    error: Option<String>,
    clear_error: ScheduledAction,
    error_delay: Duration,
}

impl std::fmt::Debug for ActivationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationState")
            .field("digits", &self.code.len())
            .field("error", &self.error)
            .field("clear_error", &self.clear_error)
            .finish()
    }
}

impl ActivationState {
    pub fn new(expected: &str, error_delay: Duration) -> Self {
        Self {
            code: Zeroizing::new(String::new()),
            expected: Zeroizing::new(sanitize_cvv(expected)),
            error: None,
            clear_error: ScheduledAction::new(),
            error_delay,
        }
    }

    /// Digits entered so far
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether an error auto-clear is armed
    pub fn clear_pending(&self) -> bool {
        self.clear_error.is_pending()
    }

    pub fn can_activate(&self) -> bool {
        self.code.len() == CVV_LEN
    }

    /// Replace the whole input, e.g. from a paste
    pub fn set_input(&mut self, raw: &str) {
        self.code = Zeroizing::new(sanitize_cvv(raw));
        self.on_edit();
    }

    /// Append a typed character; non-digits and a fourth digit are ignored
    pub fn input_char(&mut self, c: char) {
        if c.is_ascii_digit() && self.code.len() < CVV_LEN {
            self.code.push(c);
        }
        self.on_edit();
    }

    pub fn backspace(&mut self) {
        self.code.pop();
        self.on_edit();
    }

    /// Compare the entered code against the card
    pub fn try_activate(&mut self, now: Instant) -> ActivationOutcome {
        if !self.can_activate() {
            return ActivationOutcome::Incomplete;
        }

        if self.code.as_str() == self.expected.as_str() {
            self.clear();
            ActivationOutcome::Activated
        } else {
            self.error = Some(WRONG_CODE.to_string());
            self.clear_error.schedule(now, self.error_delay);
            ActivationOutcome::Rejected
        }
    }

    /// Run the scheduled clear if it is due; returns true when it fired
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.clear_error.fire_if_due(now) {
            self.error = None;
            true
        } else {
            false
        }
    }

    /// Closing the dialog drops the input and any pending clear
    pub fn close(&mut self) {
        self.clear();
    }

    fn on_edit(&mut self) {
        self.error = None;
        self.clear_error.cancel();
    }

    fn clear(&mut self) {
        self.code = Zeroizing::new(String::new());
        self.on_edit();
    }
}
