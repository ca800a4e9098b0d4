//! Display formatting for terminal output
//!
//! Shared by the CLI and the TUI so both show transactions, balances and
//! cards the same way.

pub mod balance;
pub mod transaction;

pub use balance::{format_balance_summary, format_card_details};
pub use transaction::{
    format_amount_label, format_transaction_history, transaction_description, transaction_icon,
    transaction_title, TransactionIcon, TransactionView,
};
