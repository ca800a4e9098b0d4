//! Backend seams consumed by the services
//!
//! The wallet never owns balances or ledgers; it reads and writes them
//! through a [`WalletBackend`]. OS-level alerts go through a
//! [`SystemNotifier`].

use std::collections::HashSet;
use std::sync::RwLock;

use chrono::Utc;

use crate::error::{WalletError, WalletResult};
use crate::models::{
    Balance, BalanceRecord, Card, NewTransaction, Notification, TransactionRecord,
};

/// Balance as currently known by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// `None` when no balance row exists yet
    pub record: Option<BalanceRecord>,
    /// True while the first load is still in flight
    pub loading: bool,
}

impl BalanceSnapshot {
    pub fn loaded(record: BalanceRecord) -> Self {
        Self {
            record: Some(record),
            loading: false,
        }
    }

    pub fn loading() -> Self {
        Self {
            record: None,
            loading: true,
        }
    }
}

/// Storage and mutation service behind the wallet
pub trait WalletBackend {
    fn balance_snapshot(&self) -> BalanceSnapshot;

    /// Replace the stored balance
    fn submit_balance(&self, balance: &Balance) -> WalletResult<()>;

    /// Append a ledger entry, returning the stored record
    fn append_transaction(&self, transaction: NewTransaction) -> WalletResult<TransactionRecord>;

    /// Store a notification in the user's inbox
    fn dispatch_notification(&self, notification: &Notification) -> WalletResult<()>;

    /// Most recent transactions first
    fn recent_transactions(&self, limit: usize) -> WalletResult<Vec<TransactionRecord>>;

    /// Most recent notifications first
    fn notifications(&self) -> WalletResult<Vec<Notification>>;

    fn cards(&self) -> WalletResult<Vec<Card>>;

    /// Insert or replace a card by id
    fn update_card(&self, card: &Card) -> WalletResult<()>;
}

/// Fire-and-forget OS-level alert
pub trait SystemNotifier {
    fn notify(&self, title: &str, message: &str);
}

/// Notifier that only writes to the diagnostic log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl SystemNotifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        tracing::info!(target: "dinar_wallet::notify", title, message, "system notification");
    }
}

/// Notifier that keeps every alert, for tests and the TUI toast feed
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All alerts sent so far as (title, message)
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Remove and return pending alerts
    pub fn drain(&self) -> Vec<(String, String)> {
        self.sent
            .write()
            .map(|mut s| std::mem::take(&mut *s))
            .unwrap_or_default()
    }
}

impl SystemNotifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        if let Ok(mut sent) = self.sent.write() {
            sent.push((title.to_string(), message.to_string()));
        }
    }
}

/// Backend call that [`MemoryBackend`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    SubmitBalance,
    AppendTransaction,
    DispatchNotification,
    RecentTransactions,
    Notifications,
    Cards,
    UpdateCard,
}

impl BackendOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::SubmitBalance => "submit_balance",
            Self::AppendTransaction => "append_transaction",
            Self::DispatchNotification => "dispatch_notification",
            Self::RecentTransactions => "recent_transactions",
            Self::Notifications => "notifications",
            Self::Cards => "cards",
            Self::UpdateCard => "update_card",
        }
    }
}

#[derive(Debug, Default)]
struct MemoryData {
    balance: Option<BalanceRecord>,
    loading: bool,
    transactions: Vec<TransactionRecord>,
    notifications: Vec<Notification>,
    cards: Vec<Card>,
}

/// In-memory backend with failure injection
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<MemoryData>,
    failing: RwLock<HashSet<BackendOp>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a stored balance
    pub fn with_balance(record: BalanceRecord) -> Self {
        let backend = Self::default();
        if let Ok(mut data) = backend.data.write() {
            data.balance = Some(record);
        }
        backend
    }

    pub fn set_loading(&self, loading: bool) {
        if let Ok(mut data) = self.data.write() {
            data.loading = loading;
        }
    }

    /// Make every future call of `op` fail until cleared
    pub fn fail(&self, op: BackendOp) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(op);
        }
    }

    pub fn recover(&self, op: BackendOp) {
        if let Ok(mut failing) = self.failing.write() {
            failing.remove(&op);
        }
    }

    pub fn add_card(&self, card: Card) {
        if let Ok(mut data) = self.data.write() {
            data.cards.push(card);
        }
    }

    /// Every stored transaction, oldest first
    pub fn all_transactions(&self) -> Vec<TransactionRecord> {
        self.data
            .read()
            .map(|d| d.transactions.clone())
            .unwrap_or_default()
    }

    fn check(&self, op: BackendOp) -> WalletResult<()> {
        let failing = self
            .failing
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        if failing.contains(&op) {
            return Err(WalletError::backend(op.name(), "injected failure"));
        }
        Ok(())
    }

    fn read(&self) -> WalletResult<std::sync::RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> WalletResult<std::sync::RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|e| WalletError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl WalletBackend for MemoryBackend {
    fn balance_snapshot(&self) -> BalanceSnapshot {
        match self.data.read() {
            Ok(data) => BalanceSnapshot {
                record: data.balance.clone(),
                loading: data.loading,
            },
            Err(_) => BalanceSnapshot::loading(),
        }
    }

    fn submit_balance(&self, balance: &Balance) -> WalletResult<()> {
        self.check(BackendOp::SubmitBalance)?;
        self.write()?.balance = Some(BalanceRecord::from(*balance));
        Ok(())
    }

    fn append_transaction(&self, transaction: NewTransaction) -> WalletResult<TransactionRecord> {
        self.check(BackendOp::AppendTransaction)?;
        let record = transaction.into_record(Utc::now());
        self.write()?.transactions.push(record.clone());
        Ok(record)
    }

    fn dispatch_notification(&self, notification: &Notification) -> WalletResult<()> {
        self.check(BackendOp::DispatchNotification)?;
        self.write()?.notifications.push(notification.clone());
        Ok(())
    }

    fn recent_transactions(&self, limit: usize) -> WalletResult<Vec<TransactionRecord>> {
        self.check(BackendOp::RecentTransactions)?;
        let data = self.read()?;
        let mut recent: Vec<_> = data.transactions.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    fn notifications(&self) -> WalletResult<Vec<Notification>> {
        self.check(BackendOp::Notifications)?;
        let data = self.read()?;
        Ok(data.notifications.iter().rev().cloned().collect())
    }

    fn cards(&self) -> WalletResult<Vec<Card>> {
        self.check(BackendOp::Cards)?;
        Ok(self.read()?.cards.clone())
    }

    fn update_card(&self, card: &Card) -> WalletResult<()> {
        self.check(BackendOp::UpdateCard)?;
        let mut data = self.write()?;
        match data.cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => data.cards.push(card.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, Money, TransactionKind};

    #[test]
    fn test_empty_backend_snapshot() {
        let backend = MemoryBackend::new();
        let snapshot = backend.balance_snapshot();
        assert!(snapshot.record.is_none());
        assert!(!snapshot.loading);
    }

    #[test]
    fn test_submit_balance_round_trip() {
        let backend = MemoryBackend::new();
        let balance = Balance::zero().with(Currency::Dzd, Money::from_units(100));
        backend.submit_balance(&balance).unwrap();

        let record = backend.balance_snapshot().record.unwrap();
        assert_eq!(record.dzd, Some(Money::from_units(100)));
    }

    #[test]
    fn test_injected_failure_and_recovery() {
        let backend = MemoryBackend::new();
        backend.fail(BackendOp::SubmitBalance);

        let err = backend.submit_balance(&Balance::zero()).unwrap_err();
        assert!(matches!(
            err,
            WalletError::Backend {
                operation: "submit_balance",
                ..
            }
        ));
        assert!(backend.balance_snapshot().record.is_none());

        backend.recover(BackendOp::SubmitBalance);
        assert!(backend.submit_balance(&Balance::zero()).is_ok());
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let backend = MemoryBackend::new();
        for i in 1..=4 {
            backend
                .append_transaction(NewTransaction::new(
                    TransactionKind::Recharge,
                    Money::from_units(i),
                    format!("t{}", i),
                ))
                .unwrap();
        }

        let recent = backend.recent_transactions(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].description, "t4");
        assert_eq!(recent[1].description, "t3");
    }

    #[test]
    fn test_update_card_replaces_by_id() {
        let backend = MemoryBackend::new();
        let mut card = Card::new_solid();
        backend.update_card(&card).unwrap();

        card.is_frozen = true;
        backend.update_card(&card).unwrap();

        let cards = backend.cards().unwrap();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].is_frozen);
    }

    #[test]
    fn test_recording_notifier_drain() {
        let notifier = RecordingNotifier::new();
        notifier.notify("a", "b");
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(notifier.drain(), vec![("a".to_string(), "b".to_string())]);
        assert!(notifier.sent().is_empty());
    }
}
