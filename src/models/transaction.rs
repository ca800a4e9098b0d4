//! Transaction model
//!
//! Records in the wallet ledger. The ledger itself lives behind the backend;
//! these types are what the wallet reads back and what it asks to append.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::balance::Currency;
use super::ids::TransactionId;
use super::money::Money;

/// Kind of ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Recharge,
    Transfer,
    InstantTransferSent,
    InstantTransferReceived,
    Investment,
    Bill,
    Conversion,
    Withdrawal,
    CardCharge,
    /// Any kind the wallet does not know about
    Other(String),
}

impl TransactionKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &str {
        match self {
            Self::Recharge => "recharge",
            Self::Transfer => "transfer",
            Self::InstantTransferSent => "instant_transfer_sent",
            Self::InstantTransferReceived => "instant_transfer_received",
            Self::Investment => "investment",
            Self::Bill => "bill",
            Self::Conversion => "conversion",
            Self::Withdrawal => "withdrawal",
            Self::CardCharge => "card_charge",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "recharge" => Self::Recharge,
            "transfer" => Self::Transfer,
            "instant_transfer_sent" => Self::InstantTransferSent,
            "instant_transfer_received" => Self::InstantTransferReceived,
            "investment" => Self::Investment,
            "bill" => Self::Bill,
            "conversion" => Self::Conversion,
            "withdrawal" => Self::Withdrawal,
            "card_charge" => Self::CardCharge,
            _ => Self::Other(s),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Waiting for manual verification (e.g. a BaridiMob recharge)
    Pending,
    #[default]
    Completed,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// A ledger entry as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,

    pub kind: TransactionKind,

    /// Signed amount (positive for inflow, negative for outflow)
    pub amount: Money,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: TransactionStatus,

    /// Instant (wallet-to-wallet) transfer
    #[serde(default)]
    pub is_instant: bool,

    /// Counterparty identifier (email or wallet handle)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// A ledger entry the wallet asks the backend to append
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Money,
    pub currency: Currency,
    pub description: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub is_instant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl NewTransaction {
    /// A completed dinar entry
    pub fn new(kind: TransactionKind, amount: Money, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            currency: Currency::Dzd,
            description: description.into(),
            status: TransactionStatus::Completed,
            is_instant: false,
            recipient: None,
        }
    }

    /// Set the currency
    pub fn in_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark as an instant transfer to `recipient`
    pub fn instant_to(mut self, recipient: impl Into<String>) -> Self {
        self.is_instant = true;
        self.recipient = Some(recipient.into());
        self
    }

    /// Materialize into a stored record
    pub fn into_record(self, created_at: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new(),
            kind: self.kind,
            amount: self.amount,
            currency: self.currency,
            description: self.description,
            status: self.status,
            is_instant: self.is_instant,
            recipient: self.recipient,
            recipient_name: None,
            sender_name: None,
            created_at,
        }
    }
}
