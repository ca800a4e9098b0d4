//! Configuration module for the wallet
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence (limits, timings, recharge account)

pub mod paths;
pub mod settings;

pub use paths::WalletPaths;
pub use settings::{RechargeAccount, Settings, WalletLimits};
