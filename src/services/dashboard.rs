//! Home dashboard aggregation

use crate::display::TransactionView;
use crate::models::card::physical_card;
use crate::models::{Balance, Card, TransactionRecord};

use super::backend::{SystemNotifier, WalletBackend};
use super::balance::safe_balance;
use super::notifier::NotificationService;

/// How many recent transactions the home screen renders
pub const HOME_PREVIEW_COUNT: usize = 3;

/// Everything the home screen shows
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub balance: Balance,
    pub loading: bool,
    pub recent: Vec<TransactionRecord>,
    /// First few of `recent`, formatted
    pub preview: Vec<TransactionView>,
    pub unread_notifications: usize,
    pub card: Option<Card>,
}

/// Service that assembles the home screen
pub struct DashboardService<'a> {
    backend: &'a dyn WalletBackend,
    system: &'a dyn SystemNotifier,
}

impl<'a> DashboardService<'a> {
    pub fn new(backend: &'a dyn WalletBackend, system: &'a dyn SystemNotifier) -> Self {
        Self { backend, system }
    }

    /// Load the dashboard; read failures degrade to empty sections
    pub fn snapshot(&self, limit: usize) -> DashboardSnapshot {
        let balance_snapshot = self.backend.balance_snapshot();

        let recent = match self.backend.recent_transactions(limit) {
            Ok(recent) => recent,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load recent transactions");
                Vec::new()
            }
        };

        let preview = recent
            .iter()
            .take(HOME_PREVIEW_COUNT)
            .map(TransactionView::from_record)
            .collect();

        let card = match self.backend.cards() {
            Ok(cards) => physical_card(&cards).cloned(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cards");
                None
            }
        };

        DashboardSnapshot {
            balance: safe_balance(&balance_snapshot),
            loading: balance_snapshot.loading,
            recent,
            preview,
            unread_notifications: NotificationService::new(self.backend, self.system)
                .unread_count(),
            card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BalanceRecord, CardType, Money, NewTransaction, NotificationKind, TransactionKind,
    };
    use crate::services::backend::{BackendOp, MemoryBackend, RecordingNotifier};

    fn seeded() -> MemoryBackend {
        let backend = MemoryBackend::with_balance(BalanceRecord {
            dzd: Some(Money::from_units(8000)),
            ..Default::default()
        });
        for i in 1..=6 {
            backend
                .append_transaction(NewTransaction::new(
                    TransactionKind::Recharge,
                    Money::from_units(i * 100),
                    format!("t{}", i),
                ))
                .unwrap();
        }
        backend
    }

    #[test]
    fn test_snapshot_limits_and_preview() {
        let backend = seeded();
        let system = RecordingNotifier::new();
        let snapshot = DashboardService::new(&backend, &system).snapshot(5);

        assert_eq!(snapshot.balance.dzd, Money::from_units(8000));
        assert_eq!(snapshot.recent.len(), 5);
        assert_eq!(snapshot.preview.len(), 3);
        assert_eq!(snapshot.preview[0].amount, "+600 دج");
    }

    #[test]
    fn test_transaction_failure_yields_empty_list() {
        let backend = seeded();
        backend.fail(BackendOp::RecentTransactions);
        let system = RecordingNotifier::new();
        let snapshot = DashboardService::new(&backend, &system).snapshot(5);

        assert!(snapshot.recent.is_empty());
        assert!(snapshot.preview.is_empty());
        assert_eq!(snapshot.balance.dzd, Money::from_units(8000));
    }

    #[test]
    fn test_unread_and_card() {
        let backend = seeded();
        let system = RecordingNotifier::new();
        NotificationService::new(&backend, &system).send(NotificationKind::Info, "a", "b");

        let mut virtual_card = Card::new_solid();
        virtual_card.card_type = CardType::Virtual;
        backend.add_card(virtual_card);
        let solid = Card::new_solid();
        backend.add_card(solid.clone());

        let snapshot = DashboardService::new(&backend, &system).snapshot(5);
        assert_eq!(snapshot.unread_notifications, 1);
        assert_eq!(snapshot.card.map(|c| c.id), Some(solid.id));
    }
}
