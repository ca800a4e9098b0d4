//! Dinar Wallet - terminal client for a multi-currency digital wallet
//!
//! This library provides the core of the wallet: step wizards for recharge,
//! withdrawal and transfers, card activation, balance handling and the
//! services that submit completed actions to a backend.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (balances, transactions, cards, etc.)
//! - `validation`: Field validators shared by the wizards
//! - `wizard`: The step wizard engine and the flows built on it
//! - `activation`: Card activation code entry
//! - `services`: Backend seam and business logic
//! - `storage`: JSON file backend
//! - `display`: Text formatting for the CLI
//! - `cli` / `tui`: User interfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use dinar_wallet::config::{paths::WalletPaths, settings::Settings};
//!
//! let paths = WalletPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod activation;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod timer;
pub mod tui;
pub mod validation;
pub mod wizard;

pub use error::{WalletError, WalletResult};
