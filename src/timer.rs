//! Cancellable deadlines driven by the UI tick

use std::time::{Duration, Instant};

/// A one-shot action due at a deadline
///
/// The owner polls [`ScheduledAction::fire_if_due`] on each tick. Dropping
/// the owner drops the deadline, so nothing fires after a dialog is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledAction {
    deadline: Option<Instant>,
}

impl ScheduledAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the action `delay` after `now`, replacing any earlier deadline
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the action is due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let start = Instant::now();
        let mut action = ScheduledAction::new();
        action.schedule(start, Duration::from_secs(3));

        assert!(action.is_pending());
        assert!(!action.fire_if_due(start + Duration::from_secs(2)));
        assert!(action.fire_if_due(start + Duration::from_secs(3)));
        assert!(!action.fire_if_due(start + Duration::from_secs(4)));
        assert!(!action.is_pending());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let start = Instant::now();
        let mut action = ScheduledAction::new();
        action.schedule(start, Duration::from_secs(3));
        action.cancel();

        assert!(!action.fire_if_due(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let start = Instant::now();
        let mut action = ScheduledAction::new();
        action.schedule(start, Duration::from_secs(3));
        action.schedule(start + Duration::from_secs(2), Duration::from_secs(3));

        assert!(!action.fire_if_due(start + Duration::from_secs(4)));
        assert_eq!(
            action.remaining(start + Duration::from_secs(4)),
            Some(Duration::from_secs(1))
        );
        assert!(action.fire_if_due(start + Duration::from_secs(5)));
    }
}
