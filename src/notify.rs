use std::time::{Duration, Instant};

use crate::types::Severity;

/// How long a notification stays visible unless dismissed.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub posted_at: Instant,
}

impl Notification {
    /// `None` when the deadline does not fit in an `Instant`; such a
    /// notification never expires on its own.
    pub fn expires_at(&self, ttl: Duration) -> Option<Instant> {
        self.posted_at.checked_add(ttl)
    }

    fn expired_at(&self, ttl: Duration, now: Instant) -> bool {
        self.expires_at(ttl).is_some_and(|end| now >= end)
    }
}

/// One-slot mailbox for ephemeral user messages.
///
/// A new post replaces whatever is showing and restarts the dismissal timer.
/// Nothing is ever queued.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    slot: Option<Notification>,
    ttl: Duration,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notify_at(message, severity, Instant::now());
    }

    pub fn notify_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let message = message.into();
        log::debug!("Notification [{}]: {}", severity.as_str(), message);
        self.slot = Some(Notification {
            message,
            severity,
            posted_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// The visible notification at `now`, if it has not expired.
    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.slot
            .as_ref()
            .filter(|n| !n.expired_at(self.ttl, now))
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    /// Clears the slot once its timer has run out. Returns true if it did.
    pub fn expire_at(&mut self, now: Instant) -> bool {
        let expired = self
            .slot
            .as_ref()
            .is_some_and(|n| n.expired_at(self.ttl, now));
        if expired {
            self.slot = None;
        }
        expired
    }

    pub fn expire(&mut self) -> bool {
        self.expire_at(Instant::now())
    }

    pub fn dismiss(&mut self) {
        self.slot = None;
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}
