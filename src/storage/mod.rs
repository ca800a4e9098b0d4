//! Local JSON storage backend
//!
//! Keeps the wallet usable without a remote service. Each entity lives in
//! its own file under the data directory; every mutation is written through
//! with an atomic rename before the in-memory copy changes.

pub mod balance;
pub mod cards;
pub mod file_io;
pub mod notifications;
pub mod transactions;

pub use balance::BalanceRepository;
pub use cards::CardRepository;
pub use file_io::{read_json, write_json_atomic};
pub use notifications::NotificationRepository;
pub use transactions::TransactionRepository;

use chrono::Utc;

use crate::config::paths::WalletPaths;
use crate::error::{WalletError, WalletResult};
use crate::models::{Balance, Card, NewTransaction, Notification, TransactionRecord};
use crate::services::backend::{BalanceSnapshot, WalletBackend};

/// File-backed implementation of [`WalletBackend`]
pub struct JsonStore {
    paths: WalletPaths,
    pub balance: BalanceRepository,
    pub transactions: TransactionRepository,
    pub notifications: NotificationRepository,
    pub cards: CardRepository,
}

impl JsonStore {
    /// Open the store, creating directories and loading every file
    pub fn open(paths: WalletPaths) -> WalletResult<Self> {
        paths.ensure_directories()?;

        let store = Self {
            balance: BalanceRepository::new(paths.balance_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            notifications: NotificationRepository::new(paths.notifications_file()),
            cards: CardRepository::new(paths.cards_file()),
            paths,
        };
        store.load_all()?;

        tracing::debug!(path = %store.paths.data_dir().display(), "opened wallet store");
        Ok(store)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &WalletPaths {
        &self.paths
    }

    /// Reload all data from disk
    pub fn load_all(&self) -> WalletResult<()> {
        self.balance.load()?;
        self.transactions.load()?;
        self.notifications.load()?;
        self.cards.load()?;
        Ok(())
    }
}

impl WalletBackend for JsonStore {
    fn balance_snapshot(&self) -> BalanceSnapshot {
        match self.balance.get() {
            Ok(record) => BalanceSnapshot {
                record,
                loading: false,
            },
            Err(e) => {
                tracing::warn!(error = %e, "balance unavailable");
                BalanceSnapshot::loading()
            }
        }
    }

    fn submit_balance(&self, balance: &Balance) -> WalletResult<()> {
        self.balance
            .set(balance)
            .map_err(|e| WalletError::backend("submit_balance", e.to_string()))
    }

    fn append_transaction(&self, transaction: NewTransaction) -> WalletResult<TransactionRecord> {
        let record = transaction.into_record(Utc::now());
        self.transactions
            .append(record.clone())
            .map_err(|e| WalletError::backend("append_transaction", e.to_string()))?;
        Ok(record)
    }

    fn dispatch_notification(&self, notification: &Notification) -> WalletResult<()> {
        self.notifications
            .push(notification.clone())
            .map_err(|e| WalletError::backend("dispatch_notification", e.to_string()))
    }

    fn recent_transactions(&self, limit: usize) -> WalletResult<Vec<TransactionRecord>> {
        self.transactions.recent(limit)
    }

    fn notifications(&self) -> WalletResult<Vec<Notification>> {
        self.notifications.get_all()
    }

    fn cards(&self) -> WalletResult<Vec<Card>> {
        self.cards.get_all()
    }

    fn update_card(&self, card: &Card) -> WalletResult<()> {
        self.cards
            .upsert(card)
            .map_err(|e| WalletError::backend("update_card", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Money, NotificationKind, TransactionKind};
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonStore::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        let snapshot = store.balance_snapshot();
        assert!(snapshot.record.is_none());
        assert!(!snapshot.loading);
    }

    #[test]
    fn test_writes_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let store = JsonStore::open(paths.clone()).unwrap();
            store
                .submit_balance(&Balance::zero().with(Currency::Dzd, Money::from_units(900)))
                .unwrap();
            store
                .append_transaction(NewTransaction::new(
                    TransactionKind::Recharge,
                    Money::from_units(900),
                    "شحن المحفظة",
                ))
                .unwrap();
            store
                .dispatch_notification(&Notification::new(
                    NotificationKind::Success,
                    "تم الشحن بنجاح",
                    "ok",
                ))
                .unwrap();
            store.update_card(&Card::new_solid()).unwrap();
        }

        let store = JsonStore::open(paths).unwrap();
        assert_eq!(
            store.balance_snapshot().record.and_then(|r| r.dzd),
            Some(Money::from_units(900))
        );
        assert_eq!(store.recent_transactions(5).unwrap().len(), 1);
        assert_eq!(store.notifications().unwrap().len(), 1);
        assert_eq!(store.cards().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_fails_open() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.cards_file(), "{").unwrap();

        assert!(matches!(
            JsonStore::open(paths),
            Err(WalletError::Storage(_))
        ));
    }
}
