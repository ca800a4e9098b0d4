//! Dialog modules for the TUI
//!
//! Contains modal dialogs for wallet operations

pub mod activate_card;
pub mod confirm;
pub mod help;
pub mod wizard;
