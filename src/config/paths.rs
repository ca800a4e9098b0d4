//! Path management for the wallet
//!
//! ## Path Resolution Order
//!
//! 1. `WALLET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on
//!    Unix, `%APPDATA%` on Windows) joined with `dinar-wallet`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::WalletError;

/// Directory name under the platform config directory
const APP_DIR: &str = "dinar-wallet";

/// Manages all paths used by the wallet
#[derive(Debug, Clone)]
pub struct WalletPaths {
    /// Base directory for all wallet data
    base_dir: PathBuf,
}

impl WalletPaths {
    /// Create a new WalletPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, WalletError> {
        let base_dir = if let Ok(custom) = std::env::var("WALLET_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create WalletPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the diagnostic log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("wallet.log")
    }

    /// Get the path to balance.json
    pub fn balance_file(&self) -> PathBuf {
        self.data_dir().join("balance.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to notifications.json
    pub fn notifications_file(&self) -> PathBuf {
        self.data_dir().join("notifications.json")
    }

    /// Get the path to cards.json
    pub fn cards_file(&self) -> PathBuf {
        self.data_dir().join("cards.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), WalletError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WalletError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| WalletError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
fn resolve_default_path() -> Result<PathBuf, WalletError> {
    let base = BaseDirs::new()
        .ok_or_else(|| WalletError::Config("Could not determine home directory".into()))?;
    Ok(base.config_dir().join(APP_DIR))
}
