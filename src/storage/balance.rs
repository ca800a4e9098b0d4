//! Balance repository for JSON storage
//!
//! Manages loading and saving the balance row in balance.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::WalletError;
use crate::models::{Balance, BalanceRecord};

use super::file_io::{read_json_optional, write_json_atomic};

/// Repository for the balance row
pub struct BalanceRepository {
    path: PathBuf,
    data: RwLock<Option<BalanceRecord>>,
}

impl BalanceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    /// Load the balance from disk; a missing file means no row yet
    pub fn load(&self) -> Result<(), WalletError> {
        let record: Option<BalanceRecord> = read_json_optional(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = record;
        Ok(())
    }

    /// Stored record, if any
    pub fn get(&self) -> Result<Option<BalanceRecord>, WalletError> {
        let data = self
            .data
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Write a new balance; the cached copy changes only after the file does
    pub fn set(&self, balance: &Balance) -> Result<(), WalletError> {
        let record = BalanceRecord::from(*balance);
        write_json_atomic(&self.path, &record)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = Some(record);
        Ok(())
    }
}
