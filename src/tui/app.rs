//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! The backend and system notifier are injected so the same App runs against
//! the JSON store or an in-memory backend.

use std::time::{Duration, Instant};

use crate::activation::ActivationState;
use crate::config::Settings;
use crate::error::WalletError;
use crate::models::{Card, Currency, TransactionRecord};
use crate::services::{
    DashboardService, DashboardSnapshot, SubmissionOutcome, SubmissionService, SystemNotifier,
    WalletBackend,
};
use crate::wizard::Flow;

use super::dialogs::wizard::WizardDialogState;
use super::widgets::{ErrorInfo, Toast, ToastKind, ToastQueue};

/// Transactions loaded for the history view
pub const HISTORY_LIMIT: usize = 50;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Home,
    Card,
    History,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Home, ActiveView::Card, ActiveView::History];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "الرئيسية",
            Self::Card => "البطاقة",
            Self::History => "المعاملات",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Card,
            Self::Card => Self::History,
            Self::History => Self::Home,
        }
    }
}

/// Actions that ask for confirmation first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    FreezeCard,
    UnfreezeCard,
    ClaimBonus,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Wizard,
    ActivateCard,
    Confirm(ConfirmAction),
    Help,
    Error(ErrorInfo),
}

/// An action whose backend call failed and can be re-run as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Re-submit the open wizard
    Wizard,
    ActivateCard,
    Confirm(ConfirmAction),
}

/// Main application state
pub struct App<'a> {
    pub backend: &'a dyn WalletBackend,
    pub system: &'a dyn SystemNotifier,
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    pub active_view: ActiveView,
    pub active_dialog: ActiveDialog,

    /// Balance, recent transactions and card as last loaded
    pub dashboard: DashboardSnapshot,

    /// Transactions for the history view, newest first
    pub history: Vec<TransactionRecord>,

    /// Selected row in the history view
    pub selected_index: usize,

    /// Show the full card number
    pub reveal_card: bool,

    /// Open wizard, if any
    pub wizard: Option<WizardDialogState>,

    /// Card activation code entry
    pub activation: ActivationState,

    pub toasts: ToastQueue,

    /// Failed action offered for retry
    pub pending_retry: Option<RetryAction>,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App and load the dashboard
    pub fn new(
        backend: &'a dyn WalletBackend,
        system: &'a dyn SystemNotifier,
        settings: &'a Settings,
    ) -> Self {
        let mut app = Self {
            backend,
            system,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            dashboard: DashboardSnapshot::default(),
            history: Vec::new(),
            selected_index: 0,
            reveal_card: false,
            wizard: None,
            activation: ActivationState::new(
                &settings.activation_code,
                Duration::from_secs(settings.cvv_error_secs),
            ),
            toasts: ToastQueue::new(),
            pending_retry: None,
            status_message: None,
        };
        app.refresh();
        app
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Reload the dashboard and history from the backend
    pub fn refresh(&mut self) {
        self.dashboard = DashboardService::new(self.backend, self.system)
            .snapshot(self.settings.recent_transactions_limit);
        self.history = match self.backend.recent_transactions(HISTORY_LIMIT) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load transaction history");
                Vec::new()
            }
        };
        if self.selected_index >= self.history.len() {
            self.selected_index = self.history.len().saturating_sub(1);
        }
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.selected_index = 0;
    }

    /// The card the card view acts on
    pub fn card(&self) -> Option<&Card> {
        self.dashboard.card.as_ref()
    }

    /// Open a wizard for a flow, checking its preconditions first
    pub fn open_wizard(&mut self, flow: Flow) {
        match flow {
            Flow::CardCharge(_) => match self.card() {
                None => {
                    self.toast(Toast::error("لا توجد بطاقة", "اطلب بطاقة أولاً"));
                    return;
                }
                Some(card) if card.is_frozen => {
                    self.toast(Toast::error("البطاقة مجمدة", "قم بإلغاء التجميد أولاً"));
                    return;
                }
                Some(_) => {}
            },
            Flow::CardRequest if self.card().is_some() => {
                self.toast(Toast::warning("لديك بطاقة بالفعل", ""));
                return;
            }
            _ => {}
        }

        let config = flow.config(self.settings, &self.dashboard.balance);
        self.wizard = Some(WizardDialogState::new(flow, config));
        self.pending_retry = None;
        self.active_dialog = ActiveDialog::Wizard;
    }

    /// Open the activation dialog for an inactive card
    pub fn open_activation(&mut self) {
        match self.card() {
            None => self.toast(Toast::error("لا توجد بطاقة", "اطلب بطاقة أولاً")),
            Some(card) if card.is_activated => {
                self.toast(Toast::warning("البطاقة مفعلة بالفعل", ""))
            }
            Some(_) => {
                self.activation.close();
                self.active_dialog = ActiveDialog::ActivateCard;
            }
        }
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    /// Close the current dialog, dropping any wizard or code entry
    pub fn close_dialog(&mut self) {
        if matches!(self.active_dialog, ActiveDialog::ActivateCard) {
            self.activation.close();
        }
        if matches!(self.active_dialog, ActiveDialog::Wizard) {
            self.wizard = None;
        }
        self.active_dialog = ActiveDialog::None;
        self.dismiss_retry();
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Advance timed state: the activation error auto-clear and toast expiry
    pub fn on_tick(&mut self, now: Instant) {
        if self.activation.tick(now) {
            tracing::debug!("activation error cleared");
        }
        self.toasts.remove_expired(now);
    }

    /// Queue a toast with the configured duration
    pub fn toast(&mut self, toast: Toast) {
        let toast = toast.with_duration(Duration::from_secs(self.settings.toast_secs));
        self.toasts.push(toast);
    }

    /// Apply a successful action: toast its notification and reload
    pub fn on_submitted(&mut self, outcome: SubmissionOutcome) {
        self.dismiss_retry();
        if let Some(notification) = &outcome.notification {
            self.toast(Toast::new(
                ToastKind::from(notification.kind),
                notification.title.clone(),
                notification.message.clone(),
            ));
        }
        for warning in &outcome.warnings {
            self.toast(Toast::warning("تنبيه", warning.clone()));
        }
        self.refresh();
    }

    /// Surface a failed action
    ///
    /// Retryable failures keep the current dialog and offer `[r] Retry`.
    /// Anything else opens the error dialog, or a toast when another dialog
    /// is still open.
    pub fn on_failed(&mut self, error: &WalletError, retry: RetryAction) {
        tracing::warn!(error = %error, "action failed");
        let info = ErrorInfo::from_error(error);
        if info.retryable {
            self.toasts.dismiss_retry();
            self.toast(Toast::error(info.title, info.details).with_retry());
            self.pending_retry = Some(retry);
        } else if self.has_dialog() {
            self.toast(Toast::error(info.title, info.details));
        } else {
            self.active_dialog = ActiveDialog::Error(info);
        }
    }

    /// Drop the retry offer
    pub fn dismiss_retry(&mut self) {
        self.pending_retry = None;
        self.toasts.dismiss_retry();
    }

    /// Run a confirmed dashboard action
    pub fn execute_confirmed(&mut self, action: ConfirmAction) {
        let submissions = SubmissionService::new(self.backend, self.system, self.settings);
        let result = match action {
            ConfirmAction::ClaimBonus => submissions.claim_bonus(),
            ConfirmAction::FreezeCard | ConfirmAction::UnfreezeCard => match self.card() {
                Some(card) => {
                    submissions.set_card_frozen(card, action == ConfirmAction::FreezeCard)
                }
                None => Err(WalletError::card_not_found("physical card")),
            },
        };

        match result {
            Ok(outcome) => self.on_submitted(outcome),
            Err(e) => self.on_failed(&e, RetryAction::Confirm(action)),
        }
    }

    /// Mark the card activated after its code matched
    pub fn execute_activation(&mut self) {
        let Some(card) = self.card().cloned() else {
            self.close_dialog();
            return;
        };
        let submissions = SubmissionService::new(self.backend, self.system, self.settings);
        match submissions.activate_card(&card) {
            Ok(outcome) => {
                self.close_dialog();
                self.on_submitted(outcome);
            }
            Err(e) => self.on_failed(&e, RetryAction::ActivateCard),
        }
    }

    /// Re-run the action behind the retry toast
    pub fn retry(&mut self) {
        let Some(action) = self.pending_retry.take() else {
            return;
        };
        self.toasts.dismiss_retry();
        tracing::info!(?action, "retrying failed action");

        match action {
            RetryAction::Wizard => super::dialogs::wizard::execute_submit(self),
            RetryAction::ActivateCard => self.execute_activation(),
            RetryAction::Confirm(confirm) => self.execute_confirmed(confirm),
        }
    }

    /// Move selection up in the history view
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down in the history view
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.history.len() {
            self.selected_index += 1;
        }
    }

    /// Currency the card is charged from: the card's own once it holds funds
    pub fn card_charge_currency(&self) -> Currency {
        match self.card() {
            Some(card) if !card.balance.is_zero() => card.currency,
            _ => Currency::Dzd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceRecord, Money};
    use crate::services::{BackendOp, MemoryBackend, RecordingNotifier};

    fn funded(dzd: i64) -> MemoryBackend {
        MemoryBackend::with_balance(BalanceRecord {
            dzd: Some(Money::from_units(dzd)),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_loads_dashboard() {
        let backend = funded(12_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let app = App::new(&backend, &system, &settings);

        assert_eq!(app.dashboard.balance.dzd, Money::from_units(12_000));
        assert!(!app.dashboard.loading);
        assert_eq!(app.active_view, ActiveView::Home);
    }

    #[test]
    fn test_card_charge_needs_a_card() {
        let backend = funded(1_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_wizard(Flow::CardCharge(Currency::Dzd));
        assert!(!app.has_dialog());
        assert!(app.wizard.is_none());
        assert_eq!(app.toasts.len(), 1);
    }

    #[test]
    fn test_failed_bonus_offers_retry_then_succeeds() {
        let backend = funded(10_000);
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        backend.fail(BackendOp::SubmitBalance);
        app.execute_confirmed(ConfirmAction::ClaimBonus);
        assert_eq!(
            app.pending_retry,
            Some(RetryAction::Confirm(ConfirmAction::ClaimBonus))
        );
        assert!(app.toasts.has_retry());
        assert_eq!(app.dashboard.balance.dzd, Money::from_units(10_000));

        backend.recover(BackendOp::SubmitBalance);
        app.retry();
        assert!(app.pending_retry.is_none());
        assert!(!app.toasts.has_retry());
        assert_eq!(app.dashboard.balance.dzd, Money::from_units(10_500));
    }

    #[test]
    fn test_freeze_without_card_opens_error_dialog() {
        let backend = funded(0);
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.execute_confirmed(ConfirmAction::FreezeCard);
        assert!(app.pending_retry.is_none());
        assert!(matches!(app.active_dialog, ActiveDialog::Error(_)));
    }

    #[test]
    fn test_activation_close_drops_pending_clear() {
        let backend = funded(0);
        backend.add_card(Card::new_solid());
        let system = RecordingNotifier::new();
        let settings = Settings::default();
        let mut app = App::new(&backend, &system, &settings);

        app.open_activation();
        assert!(matches!(app.active_dialog, ActiveDialog::ActivateCard));
        app.activation.set_input("111");
        app.activation.try_activate(Instant::now());
        assert!(app.activation.clear_pending());

        app.close_dialog();
        assert!(!app.activation.clear_pending());
        assert!(app.activation.error().is_none());
    }
}
