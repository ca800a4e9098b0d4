//! Custom error types for the wallet
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{Currency, Money};

/// The main error type for wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Local storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Field or form validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Balance too low for the requested operation
    #[error("Insufficient {currency} balance: need {needed}, have {available}")]
    InsufficientFunds {
        currency: Currency,
        needed: Money,
        available: Money,
    },

    /// A call into the wallet backend failed
    #[error("Backend error during {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },

    /// A wizard action was invoked from the wrong step
    #[error("Invalid wizard step: {0}")]
    InvalidStep(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl WalletError {
    /// Create a backend failure for the named operation
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }

    /// Create a "not found" error for cards
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Card",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether retrying the same action can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend { .. } | Self::Io(_) | Self::Storage(_))
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = WalletError::card_not_found("solid");
        assert_eq!(err.to_string(), "Card not found: solid");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = WalletError::InsufficientFunds {
            currency: Currency::Dzd,
            needed: Money::from_units(5000),
            available: Money::from_units(3000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient DZD balance: need 5,000, have 3,000"
        );
    }

    #[test]
    fn test_backend_errors_are_retryable() {
        assert!(WalletError::backend("submit_balance", "timeout").is_retryable());
        assert!(!WalletError::Validation("bad".into()).is_retryable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wallet_err: WalletError = io_err.into();
        assert!(matches!(wallet_err, WalletError::Io(_)));
    }
}
