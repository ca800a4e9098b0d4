//! Transaction repository for JSON storage
//!
//! Manages the append-only ledger in transactions.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::WalletError;
use crate::models::TransactionRecord;

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<TransactionRecord>,
}

/// Repository for ledger persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<TransactionRecord>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), WalletError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.transactions;
        Ok(())
    }

    /// Append a record and persist the ledger
    pub fn append(&self, record: TransactionRecord) -> Result<(), WalletError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut transactions = data.clone();
        transactions.push(record);
        write_json_atomic(&self.path, &TransactionData { transactions: transactions.clone() })?;

        *data = transactions;
        Ok(())
    }

    /// Newest first, at most `limit`
    pub fn recent(&self, limit: usize) -> Result<Vec<TransactionRecord>, WalletError> {
        let data = self
            .data
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut recent: Vec<_> = data.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    /// Total number of stored transactions
    pub fn count(&self) -> Result<usize, WalletError> {
        let data = self
            .data
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
