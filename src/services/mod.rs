//! Service layer for the wallet
//!
//! Services sit between the UI surfaces and the backend. They take the
//! backend and system notifier by reference so any implementation can be
//! injected.

pub mod backend;
pub mod balance;
pub mod dashboard;
pub mod notifier;
pub mod submission;

pub use backend::{
    BackendOp, BalanceSnapshot, LogNotifier, MemoryBackend, RecordingNotifier, SystemNotifier,
    WalletBackend,
};
pub use balance::{safe_balance, BalanceService};
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use notifier::NotificationService;
pub use submission::{SavingsGoal, SubmissionOutcome, SubmissionService};
