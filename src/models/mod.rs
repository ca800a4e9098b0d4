//! Core data models for the wallet
//!
//! Balances, ledger records, notifications, cards and the intents produced by
//! completed wizards.

pub mod balance;
pub mod card;
pub mod ids;
pub mod intent;
pub mod money;
pub mod notification;
pub mod transaction;

pub use balance::{Balance, BalanceRecord, Currency};
pub use card::{Card, CardType};
pub use ids::{CardId, NotificationId, TransactionId};
pub use intent::{Channel, TransactionIntent};
pub use money::Money;
pub use notification::{Notification, NotificationKind};
pub use transaction::{NewTransaction, TransactionKind, TransactionRecord, TransactionStatus};
