//! Transaction display formatting
//!
//! Pure mapping from a ledger record to what the home screen and history show:
//! an icon, a localized title, a one-line description and a signed amount.

use std::fmt;

use tabled::{settings::Style, Table, Tabled};

use crate::models::{TransactionKind, TransactionRecord};

/// Icon shown next to a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionIcon {
    Instant,
    Incoming,
    Outgoing,
    Growth,
    Receipt,
    Wallet,
}

impl TransactionIcon {
    /// Terminal glyph for the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Instant => "⚡",
            Self::Incoming => "↙",
            Self::Outgoing => "↗",
            Self::Growth => "📈",
            Self::Receipt => "🧾",
            Self::Wallet => "👛",
        }
    }
}

impl fmt::Display for TransactionIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instant => "instant",
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Growth => "growth",
            Self::Receipt => "receipt",
            Self::Wallet => "wallet",
        };
        write!(f, "{}", name)
    }
}

/// Pick the icon for a transaction
pub fn transaction_icon(txn: &TransactionRecord) -> TransactionIcon {
    if txn.is_instant {
        return TransactionIcon::Instant;
    }

    match txn.kind {
        TransactionKind::Recharge => TransactionIcon::Incoming,
        TransactionKind::Transfer | TransactionKind::InstantTransferSent => {
            if txn.amount.is_positive() {
                TransactionIcon::Incoming
            } else {
                TransactionIcon::Outgoing
            }
        }
        TransactionKind::Investment => TransactionIcon::Growth,
        TransactionKind::Bill => TransactionIcon::Receipt,
        TransactionKind::Withdrawal | TransactionKind::CardCharge => TransactionIcon::Outgoing,
        _ => TransactionIcon::Wallet,
    }
}

/// Localized title for a transaction
pub fn transaction_title(txn: &TransactionRecord) -> &'static str {
    if txn.is_instant {
        return if txn.kind == TransactionKind::InstantTransferSent {
            "تحويل فوري صادر"
        } else {
            "تحويل فوري وارد"
        };
    }

    match txn.kind {
        TransactionKind::Recharge => "شحن المحفظة",
        TransactionKind::Transfer => {
            if txn.amount.is_positive() {
                "تحويل مستلم"
            } else {
                "تحويل مرسل"
            }
        }
        TransactionKind::Investment => "استثمار",
        TransactionKind::Bill => "دفع فاتورة",
        TransactionKind::Conversion => "تحويل عملة",
        TransactionKind::Withdrawal => "سحب الأموال",
        TransactionKind::CardCharge => "شحن البطاقة",
        _ => "معاملة مالية",
    }
}

/// One-line description: counterparty for instant transfers, else the record's own
pub fn transaction_description(txn: &TransactionRecord) -> String {
    if !txn.is_instant {
        return txn.description.clone();
    }

    let recipient = txn.recipient.as_deref().unwrap_or("");
    if txn.kind == TransactionKind::InstantTransferSent {
        let name = non_empty(txn.recipient_name.as_deref()).unwrap_or(recipient);
        format!("إلى {}", name)
    } else {
        let name = non_empty(txn.sender_name.as_deref()).unwrap_or(recipient);
        format!("من {}", name)
    }
}

/// `+1,234 دج` for inflows, `1,234 دج` otherwise
pub fn format_amount_label(txn: &TransactionRecord) -> String {
    let sign = if txn.amount.is_positive() { "+" } else { "" };
    format!("{}{}", sign, txn.currency.format(txn.amount.abs()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Display-ready projection of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionView {
    pub icon: TransactionIcon,
    pub title: &'static str,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub is_inflow: bool,
}

impl TransactionView {
    pub fn from_record(txn: &TransactionRecord) -> Self {
        Self {
            icon: transaction_icon(txn),
            title: transaction_title(txn),
            description: transaction_description(txn),
            amount: format_amount_label(txn),
            date: txn.created_at.format("%Y-%m-%d").to_string(),
            is_inflow: txn.amount.is_positive(),
        }
    }
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    title: &'static str,
    #[tabled(rename = "Details")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format a list of transactions as a history table
pub fn format_transaction_history(transactions: &[TransactionRecord]) -> String {
    if transactions.is_empty() {
        return "لا توجد معاملات حتى الآن\n".to_string();
    }

    let rows: Vec<HistoryRow> = transactions
        .iter()
        .map(|txn| {
            let view = TransactionView::from_record(txn);
            HistoryRow {
                icon: view.icon.glyph(),
                date: view.date,
                title: view.title,
                description: truncate(&view.description, 40),
                amount: view.amount,
                status: txn.status.to_string(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
