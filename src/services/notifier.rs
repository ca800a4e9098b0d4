//! Notification creation and dispatch
//!
//! A notification is stored in the backend inbox and mirrored as an OS-level
//! alert. The alert is fire-and-forget; only the store can fail.

use crate::error::WalletResult;
use crate::models::{Notification, NotificationKind};

use super::backend::{SystemNotifier, WalletBackend};

/// Service for sending notifications
pub struct NotificationService<'a> {
    backend: &'a dyn WalletBackend,
    system: &'a dyn SystemNotifier,
}

impl<'a> NotificationService<'a> {
    pub fn new(backend: &'a dyn WalletBackend, system: &'a dyn SystemNotifier) -> Self {
        Self { backend, system }
    }

    /// Create a notification, store it, then raise the OS alert
    ///
    /// The alert fires even when storing fails, so the user still sees it.
    pub fn send(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> (Notification, WalletResult<()>) {
        let notification = Notification::new(kind, title, message);
        let stored = self.backend.dispatch_notification(&notification);
        if let Err(e) = &stored {
            tracing::warn!(error = %e, title = %notification.title, "failed to store notification");
        }
        self.system.notify(&notification.title, &notification.message);
        (notification, stored)
    }

    /// Number of unread notifications, zero if the inbox can't be read
    pub fn unread_count(&self) -> usize {
        match self.backend.notifications() {
            Ok(all) => all.iter().filter(|n| !n.is_read).count(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load notifications");
                0
            }
        }
    }
}
