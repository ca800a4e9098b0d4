//! Action submission
//!
//! Turns validated intents and dashboard actions into backend writes. The
//! first write of an action is primary: if it fails nothing else happens and
//! the caller gets [`WalletError::Backend`]. Later writes (ledger entry, card
//! update, inbox notification) are secondary: their failures are logged and
//! reported as warnings on the outcome.

use crate::config::Settings;
use crate::error::{WalletError, WalletResult};
use crate::models::{
    Balance, Card, Channel, Currency, Money, NewTransaction, Notification, NotificationKind,
    TransactionIntent, TransactionKind, TransactionRecord, TransactionStatus,
};

use super::backend::{SystemNotifier, WalletBackend};
use super::balance::safe_balance;
use super::notifier::NotificationService;

/// What a savings deposit is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsGoal {
    Savings,
    Investment,
}

/// Result of a submitted action
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// Balance after the action
    pub balance: Balance,
    pub transaction: Option<TransactionRecord>,
    pub card: Option<Card>,
    pub notification: Option<Notification>,
    /// Secondary writes that failed
    pub warnings: Vec<String>,
}

impl SubmissionOutcome {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

struct Notice {
    kind: NotificationKind,
    title: String,
    message: String,
}

impl Notice {
    fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The writes one action performs, in order
#[derive(Default)]
struct Plan {
    balance: Option<Balance>,
    transaction: Option<NewTransaction>,
    card: Option<Card>,
    notice: Option<Notice>,
}

/// Service that applies wallet actions through the backend
pub struct SubmissionService<'a> {
    backend: &'a dyn WalletBackend,
    system: &'a dyn SystemNotifier,
    settings: &'a Settings,
}

impl<'a> SubmissionService<'a> {
    pub fn new(
        backend: &'a dyn WalletBackend,
        system: &'a dyn SystemNotifier,
        settings: &'a Settings,
    ) -> Self {
        Self {
            backend,
            system,
            settings,
        }
    }

    /// Record a BaridiMob recharge for manual verification
    ///
    /// The balance is untouched until the transfer is verified; only a
    /// pending ledger entry is written.
    pub fn recharge(&self, intent: &TransactionIntent) -> WalletResult<SubmissionOutcome> {
        expect_channel(intent, Channel::Baridimob)?;
        let amount = positive(intent.amount)?;

        tracing::info!(amount = %amount, reference = %intent.reference, "submitting recharge");

        self.commit(
            "recharge",
            Plan {
                transaction: Some(
                    NewTransaction::new(
                        TransactionKind::Recharge,
                        amount,
                        format!("شحن عبر بريدي موب - رقم المعاملة: {}", intent.reference),
                    )
                    .with_status(TransactionStatus::Pending),
                ),
                notice: Some(Notice::success(
                    "تم إرسال طلب الشحن",
                    format!(
                        "سوف نتحقق من المعاملة وإضافة {} دج في أقل من 10 دقائق",
                        amount
                    ),
                )),
                ..Default::default()
            },
        )
    }

    /// Withdraw dinars to a bank account
    pub fn withdraw(&self, intent: &TransactionIntent) -> WalletResult<SubmissionOutcome> {
        expect_channel(intent, Channel::Bank)?;
        let amount = positive(intent.amount)?;
        let current = self.loaded_balance("withdraw")?;
        ensure_funds(&current, Currency::Dzd, amount)?;

        tracing::info!(amount = %amount, "submitting withdrawal");

        self.commit(
            "withdraw",
            Plan {
                balance: Some(current.debit(Currency::Dzd, amount)),
                transaction: Some(
                    NewTransaction::new(
                        TransactionKind::Withdrawal,
                        -amount,
                        format!("سحب إلى RIB: {}", intent.reference),
                    )
                    .with_status(TransactionStatus::Pending),
                ),
                notice: Some(Notice::success(
                    "تم إرسال طلب السحب",
                    format!("سيتم تحويل {} دج إلى حسابك خلال 24 ساعة", amount),
                )),
                ..Default::default()
            },
        )
    }

    /// Send dinars to another wallet
    pub fn instant_transfer(&self, intent: &TransactionIntent) -> WalletResult<SubmissionOutcome> {
        expect_channel(intent, Channel::Internal)?;
        let amount = positive(intent.amount)?;
        let current = self.loaded_balance("instant_transfer")?;
        ensure_funds(&current, Currency::Dzd, amount)?;

        tracing::info!(amount = %amount, recipient = %intent.reference, "submitting instant transfer");

        self.commit(
            "instant_transfer",
            Plan {
                balance: Some(current.debit(Currency::Dzd, amount)),
                transaction: Some(
                    NewTransaction::new(
                        TransactionKind::InstantTransferSent,
                        -amount,
                        format!("تحويل فوري إلى {}", intent.reference),
                    )
                    .instant_to(intent.reference.clone()),
                ),
                notice: Some(Notice::success(
                    "تم التحويل بنجاح",
                    format!("تم إرسال {} دج بنجاح", amount),
                )),
                ..Default::default()
            },
        )
    }

    /// Move funds from one wallet currency onto a card
    pub fn charge_card(
        &self,
        card: &Card,
        amount: Money,
        currency: Currency,
    ) -> WalletResult<SubmissionOutcome> {
        let amount = positive(amount)?;
        if card.is_frozen {
            return Err(WalletError::Validation("البطاقة مجمدة".into()));
        }
        if !card.balance.is_zero() && card.currency != currency {
            return Err(WalletError::Validation(format!(
                "البطاقة مشحونة بعملة {}",
                card.currency
            )));
        }

        let current = self.loaded_balance("charge_card")?;
        ensure_funds(&current, currency, amount)?;

        let mut charged = card.clone();
        charged.balance += amount;
        charged.currency = currency;

        tracing::info!(amount = %amount, currency = %currency, card = %card.id, "charging card");

        self.commit(
            "charge_card",
            Plan {
                balance: Some(current.debit(currency, amount)),
                transaction: Some(
                    NewTransaction::new(TransactionKind::CardCharge, -amount, "شحن البطاقة")
                        .in_currency(currency),
                ),
                card: Some(charged),
                notice: Some(Notice::success(
                    "تم شحن البطاقة بنجاح",
                    format!("تم تحويل {} {} إلى البطاقة", amount, currency.symbol()),
                )),
            },
        )
    }

    /// Put dinars into savings or an investment
    pub fn savings_deposit(
        &self,
        amount: Money,
        goal: SavingsGoal,
    ) -> WalletResult<SubmissionOutcome> {
        let amount = positive(amount)?;
        let current = self.loaded_balance("savings_deposit")?;
        ensure_funds(&current, Currency::Dzd, amount)?;

        let (kind, description) = match goal {
            SavingsGoal::Investment => (TransactionKind::Investment, "استثمار"),
            SavingsGoal::Savings => (TransactionKind::Transfer, "إيداع في الادخار"),
        };

        self.commit(
            "savings_deposit",
            Plan {
                balance: Some(current.debit(Currency::Dzd, amount)),
                transaction: Some(NewTransaction::new(kind, -amount, description)),
                ..Default::default()
            },
        )
    }

    /// Credit an investment return
    pub fn investment_return(&self, amount: Money) -> WalletResult<SubmissionOutcome> {
        let amount = positive(amount)?;
        let current = self.loaded_balance("investment_return")?;

        self.commit(
            "investment_return",
            Plan {
                balance: Some(credited(current, Currency::Dzd, amount)?),
                transaction: Some(NewTransaction::new(
                    TransactionKind::Investment,
                    amount,
                    "عائد استثمار",
                )),
                ..Default::default()
            },
        )
    }

    /// Credit dinars directly
    pub fn add_money(&self, amount: Money) -> WalletResult<SubmissionOutcome> {
        let amount = positive(amount)?;
        let current = self.loaded_balance("add_money")?;

        self.commit(
            "add_money",
            Plan {
                balance: Some(credited(current, Currency::Dzd, amount)?),
                transaction: Some(NewTransaction::new(
                    TransactionKind::Recharge,
                    amount,
                    "شحن المحفظة",
                )),
                notice: Some(Notice::success(
                    "تم الشحن بنجاح",
                    format!("تم شحن {} دج في محفظتك", amount),
                )),
                ..Default::default()
            },
        )
    }

    /// Amount [`SubmissionService::claim_bonus`] would credit now
    pub fn bonus_amount(&self) -> Money {
        self.current_balance()
            .dzd
            .percent_floor(self.settings.limits.bonus_percent)
    }

    /// Credit the bonus, floored to whole dinars
    pub fn claim_bonus(&self) -> WalletResult<SubmissionOutcome> {
        let current = self.loaded_balance("claim_bonus")?;
        let percent = self.settings.limits.bonus_percent;
        let bonus = current.dzd.percent_floor(percent);
        if !bonus.is_positive() {
            return Err(WalletError::Validation(
                "الرصيد غير كافٍ للحصول على المكافأة".into(),
            ));
        }

        self.commit(
            "claim_bonus",
            Plan {
                balance: Some(credited(current, Currency::Dzd, bonus)?),
                transaction: Some(NewTransaction::new(
                    TransactionKind::Recharge,
                    bonus,
                    format!("كافأة خاصة - {}% من الرصيد", percent),
                )),
                notice: Some(Notice::success(
                    "تم الحصول على المكافأة!",
                    format!("تم إضافة {} دج ككافأة", bonus),
                )),
                ..Default::default()
            },
        )
    }

    /// Exchange between dinars and euros at amounts fixed by the caller
    pub fn convert_currency(
        &self,
        from: Currency,
        to: Currency,
        from_amount: Money,
        to_amount: Money,
    ) -> WalletResult<SubmissionOutcome> {
        let supported = matches!(
            (from, to),
            (Currency::Dzd, Currency::Eur) | (Currency::Eur, Currency::Dzd)
        );
        if !supported {
            return Err(WalletError::Validation(format!(
                "Conversion from {} to {} is not supported",
                from, to
            )));
        }
        let from_amount = positive(from_amount)?;
        let to_amount = positive(to_amount)?;

        let current = self.loaded_balance("convert_currency")?;
        ensure_funds(&current, from, from_amount)?;

        self.commit(
            "convert_currency",
            Plan {
                balance: Some(credited(current.debit(from, from_amount), to, to_amount)?),
                transaction: Some(
                    NewTransaction::new(
                        TransactionKind::Conversion,
                        -from_amount,
                        format!("تحويل {} إلى {}", from, to),
                    )
                    .in_currency(from),
                ),
                ..Default::default()
            },
        )
    }

    /// Freeze or unfreeze a card
    pub fn set_card_frozen(&self, card: &Card, frozen: bool) -> WalletResult<SubmissionOutcome> {
        let mut updated = card.clone();
        updated.is_frozen = frozen;

        let notice = if frozen {
            Notice::success(
                "تم تجميد البطاقة",
                "تم تجميد البطاقة بنجاح. يمكنك إلغاء التجميد في أي وقت.",
            )
        } else {
            Notice::success(
                "تم إلغاء تجميد البطاقة",
                "تم إلغاء تجميد البطاقة بنجاح. يمكنك الآن استخدامها.",
            )
        };

        self.commit(
            "set_card_frozen",
            Plan {
                card: Some(updated),
                notice: Some(notice),
                ..Default::default()
            },
        )
    }

    /// Mark a card activated once its security code has been checked
    pub fn activate_card(&self, card: &Card) -> WalletResult<SubmissionOutcome> {
        if card.is_activated {
            return Err(WalletError::Validation("البطاقة مفعلة بالفعل".into()));
        }
        let mut updated = card.clone();
        updated.is_activated = true;

        self.commit(
            "activate_card",
            Plan {
                card: Some(updated),
                notice: Some(Notice::success(
                    "تم تفعيل البطاقة بنجاح",
                    "البطاقة جاهزة للاستخدام في جميع المعاملات",
                )),
                ..Default::default()
            },
        )
    }

    /// Order a physical card for delivery
    pub fn request_card(&self, country: &str, address: &str) -> WalletResult<SubmissionOutcome> {
        if country.trim().is_empty() || address.trim().is_empty() {
            return Err(WalletError::Validation(
                "Country and address are required".into(),
            ));
        }

        let card = Card::new_solid();
        tracing::info!(card = %card.id, country = country.trim(), "requesting physical card");

        self.commit(
            "request_card",
            Plan {
                card: Some(card),
                notice: Some(Notice::success(
                    "تم طلب البطاقة بنجاح",
                    "سيتم توصيل البطاقة خلال 20-35 يوم عمل",
                )),
                ..Default::default()
            },
        )
    }

    fn current_balance(&self) -> Balance {
        safe_balance(&self.backend.balance_snapshot())
    }

    /// Safe balance for an action that writes one back
    ///
    /// While loading the safe balance is all zero; writing it back would
    /// replace the stored amounts, so the action fails as retryable instead.
    fn loaded_balance(&self, operation: &'static str) -> WalletResult<Balance> {
        let snapshot = self.backend.balance_snapshot();
        if snapshot.loading {
            tracing::warn!(operation, "balance not loaded, refusing to write");
            return Err(WalletError::backend(operation, "balance not loaded"));
        }
        Ok(safe_balance(&snapshot))
    }

    /// Run a plan's writes in order; the first one present is primary
    fn commit(&self, operation: &'static str, plan: Plan) -> WalletResult<SubmissionOutcome> {
        let mut outcome = SubmissionOutcome {
            balance: self.current_balance(),
            transaction: None,
            card: None,
            notification: None,
            warnings: Vec::new(),
        };
        let mut committed = false;

        if let Some(balance) = plan.balance {
            self.backend
                .submit_balance(&balance)
                .map_err(|e| as_backend(operation, e))?;
            outcome.balance = balance;
            committed = true;
        }

        if let Some(transaction) = plan.transaction {
            match self.backend.append_transaction(transaction) {
                Ok(record) => outcome.transaction = Some(record),
                Err(e) if !committed => return Err(as_backend(operation, e)),
                Err(e) => {
                    tracing::warn!(operation, error = %e, "failed to record transaction");
                    outcome.warnings.push(format!("transaction not recorded: {}", e));
                }
            }
            committed = true;
        }

        if let Some(card) = plan.card {
            match self.backend.update_card(&card) {
                Ok(()) => outcome.card = Some(card),
                Err(e) if !committed => return Err(as_backend(operation, e)),
                Err(e) => {
                    tracing::warn!(operation, error = %e, "failed to update card");
                    outcome.warnings.push(format!("card not updated: {}", e));
                }
            }
        }

        if let Some(notice) = plan.notice {
            let service = NotificationService::new(self.backend, self.system);
            let (notification, stored) = service.send(notice.kind, notice.title, notice.message);
            if let Err(e) = stored {
                outcome.warnings.push(format!("notification not stored: {}", e));
            }
            outcome.notification = Some(notification);
        }

        tracing::info!(operation, warnings = outcome.warnings.len(), "action submitted");
        Ok(outcome)
    }
}

fn as_backend(operation: &'static str, err: WalletError) -> WalletError {
    tracing::error!(operation, error = %err, "primary write failed");
    match err {
        WalletError::Backend { .. } => err,
        other => WalletError::backend(operation, other.to_string()),
    }
}

fn credited(balance: Balance, currency: Currency, amount: Money) -> WalletResult<Balance> {
    balance.credit(currency, amount).ok_or_else(|| {
        WalletError::Validation(format!("{} balance would overflow", currency))
    })
}

fn expect_channel(intent: &TransactionIntent, channel: Channel) -> WalletResult<()> {
    if intent.method == channel {
        Ok(())
    } else {
        Err(WalletError::Validation(format!(
            "Expected a {} intent, got {}",
            channel, intent.method
        )))
    }
}

fn positive(amount: Money) -> WalletResult<Money> {
    if amount.is_positive() {
        Ok(amount)
    } else {
        Err(WalletError::Validation(
            crate::validation::INVALID_AMOUNT.into(),
        ))
    }
}

fn ensure_funds(balance: &Balance, currency: Currency, needed: Money) -> WalletResult<()> {
    let available = balance.get(currency);
    if needed > available {
        return Err(WalletError::InsufficientFunds {
            currency,
            needed,
            available,
        });
    }
    Ok(())
}
