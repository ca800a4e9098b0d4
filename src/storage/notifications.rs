//! Notification repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::WalletError;
use crate::models::Notification;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct NotificationData {
    notifications: Vec<Notification>,
}

/// Repository for the notification inbox
pub struct NotificationRepository {
    path: PathBuf,
    data: RwLock<Vec<Notification>>,
}

impl NotificationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), WalletError> {
        let file_data: NotificationData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.notifications;
        Ok(())
    }

    pub fn push(&self, notification: Notification) -> Result<(), WalletError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut notifications = data.clone();
        notifications.push(notification);
        write_json_atomic(
            &self.path,
            &NotificationData {
                notifications: notifications.clone(),
            },
        )?;

        *data = notifications;
        Ok(())
    }

    /// Newest first
    pub fn get_all(&self) -> Result<Vec<Notification>, WalletError> {
        let data = self
            .data
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.iter().rev().cloned().collect())
    }
}
