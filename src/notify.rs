//! Transient success/error messages ("toasts") raised by every mutation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{error, info};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);
/// Toasts beyond this count are dropped oldest-first.
pub const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub level: Level,
    pub message: String,
    pub created_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifier {
    toasts: VecDeque<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    pub fn push_at(&mut self, level: Level, message: impl Into<String>, now: Instant) {
        let message = message.into();
        match level {
            Level::Error => error!(%message, "notification"),
            Level::Success | Level::Info => info!(%message, "notification"),
        }
        self.toasts.push_back(Toast {
            level,
            message,
            created_at: now,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    /// Drop toasts older than [`TOAST_LIFETIME`].
    pub fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created_at) < TOAST_LIFETIME);
    }

    /// Newest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_lifetime() {
        let t0 = Instant::now();
        let mut n = Notifier::new();
        n.push_at(Level::Success, "User created successfully", t0);
        n.push_at(Level::Error, "Email is invalid", t0 + Duration::from_secs(2));

        n.prune(t0 + Duration::from_millis(2500));
        assert_eq!(n.len(), 2);
        n.prune(t0 + Duration::from_millis(3500));
        let left: Vec<_> = n.visible().map(|t| t.message.as_str()).collect();
        assert_eq!(left, ["Email is invalid"]);
    }

    #[test]
    fn info_toasts_are_kept_with_their_level() {
        let mut n = Notifier::new();
        n.info("Reloading users...");
        n.success("User created successfully");
        let levels: Vec<_> = n.visible().map(|t| t.level).collect();
        assert_eq!(levels, [Level::Success, Level::Info]);
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let mut n = Notifier::new();
        for i in 0..=MAX_TOASTS {
            n.error(format!("e{i}"));
        }
        assert_eq!(n.len(), MAX_TOASTS);
        assert_eq!(n.visible().last().map(|t| t.message.as_str()), Some("e1"));
    }
}
