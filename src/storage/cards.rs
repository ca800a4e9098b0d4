//! Card repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::WalletError;
use crate::models::Card;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CardData {
    cards: Vec<Card>,
}

/// Repository for wallet cards
pub struct CardRepository {
    path: PathBuf,
    data: RwLock<Vec<Card>>,
}

impl CardRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), WalletError> {
        let file_data: CardData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.cards;
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<Card>, WalletError> {
        let data = self
            .data
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Insert or replace a card by id, then persist
    pub fn upsert(&self, card: &Card) -> Result<(), WalletError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut cards = data.clone();
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
        write_json_atomic(&self.path, &CardData { cards: cards.clone() })?;

        *data = cards;
        Ok(())
    }
}
