//! Terminal User Interface module
//!
//! Interactive front end for the wallet built on ratatui: a home view with
//! balances and quick actions, a card view, a history table, and modal
//! dialogs for the wizards and card activation.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
