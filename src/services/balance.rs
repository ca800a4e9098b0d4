//! Safe balance view
//!
//! Screens and calculations never see a partially loaded balance: while the
//! backend is loading everything reads as zero, and once loaded each missing
//! currency reads as zero on its own.

use crate::models::{Balance, Currency};

use super::backend::{BalanceSnapshot, WalletBackend};

/// Collapse a backend snapshot into a fully populated balance
pub fn safe_balance(snapshot: &BalanceSnapshot) -> Balance {
    if snapshot.loading {
        return Balance::zero();
    }

    let Some(record) = &snapshot.record else {
        return Balance::zero();
    };

    Currency::ALL.iter().fold(Balance::zero(), |balance, currency| {
        balance.with(*currency, record.get(*currency).unwrap_or_default())
    })
}

/// Read-only balance queries
pub struct BalanceService<'a> {
    backend: &'a dyn WalletBackend,
}

impl<'a> BalanceService<'a> {
    pub fn new(backend: &'a dyn WalletBackend) -> Self {
        Self { backend }
    }

    /// Current safe balance
    pub fn current(&self) -> Balance {
        safe_balance(&self.backend.balance_snapshot())
    }

    /// Whether the balance is still loading
    pub fn is_loading(&self) -> bool {
        self.backend.balance_snapshot().loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceRecord, Money};
    use crate::services::backend::MemoryBackend;

    #[test]
    fn test_loading_is_all_zero() {
        let snapshot = BalanceSnapshot {
            record: Some(BalanceRecord {
                dzd: Some(Money::from_units(5000)),
                ..Default::default()
            }),
            loading: true,
        };
        assert_eq!(safe_balance(&snapshot), Balance::zero());
    }

    #[test]
    fn test_missing_record_is_zero() {
        assert_eq!(safe_balance(&BalanceSnapshot::default()), Balance::zero());
    }

    #[test]
    fn test_missing_field_is_zero_others_pass_through() {
        let snapshot = BalanceSnapshot::loaded(BalanceRecord {
            dzd: Some(Money::from_units(12_500)),
            eur: Some(Money::from_cents(4_050)),
            usd: Some(Money::from_units(7)),
            gbp: None,
        });

        let balance = safe_balance(&snapshot);
        assert_eq!(balance.dzd, Money::from_units(12_500));
        assert_eq!(balance.eur, Money::from_cents(4_050));
        assert_eq!(balance.usd, Money::from_units(7));
        assert_eq!(balance.gbp, Money::zero());
    }

    #[test]
    fn test_service_reads_backend() {
        let backend = MemoryBackend::with_balance(BalanceRecord {
            eur: Some(Money::from_units(3)),
            ..Default::default()
        });
        let service = BalanceService::new(&backend);
        assert_eq!(service.current().eur, Money::from_units(3));
        assert!(!service.is_loading());

        backend.set_loading(true);
        assert!(service.is_loading());
        assert!(service.current().is_zero());
    }
}
