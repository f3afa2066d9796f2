//! Notification channel
//!
//! Fire-and-forget leveled messages for the user. The channel is passed
//! around as an injected `Arc<dyn Notifier>` so the CLI can print, the
//! console can show a status bar, and tests can capture what was said.

use colored::Colorize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Message level for categorizing notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// Sink for user-facing notifications
///
/// # Examples
///
/// ```
/// use ontoctl::notify::{Notifier, StdoutNotifier};
///
/// let notifier = StdoutNotifier::new();
/// notifier.success("Version created");
/// notifier.error("Version not found");
/// ```
pub trait Notifier: Send + Sync {
    /// Deliver a message at the given level
    fn notify(&self, level: MessageLevel, message: &str);

    /// Write a success message
    fn success(&self, message: &str) {
        self.notify(MessageLevel::Success, message);
    }

    /// Write an error message
    fn error(&self, message: &str) {
        self.notify(MessageLevel::Error, message);
    }

    /// Write a warning message
    fn warning(&self, message: &str) {
        self.notify(MessageLevel::Warning, message);
    }

    /// Write an info message
    fn info(&self, message: &str) {
        self.notify(MessageLevel::Info, message);
    }
}

/// Shared notifier handle
pub type SharedNotifier = Arc<dyn Notifier>;

/// CLI implementation - writes to stdout/stderr
pub struct StdoutNotifier {
    quiet: bool,
}

impl StdoutNotifier {
    /// Create a new stdout notifier
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Create a notifier that only prints errors
    #[must_use]
    pub const fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Default for StdoutNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for StdoutNotifier {
    fn notify(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Error => eprintln!("{} {}", "❌".red(), message),
            _ if self.quiet => {}
            MessageLevel::Success => println!("{} {}", "✓".green(), message),
            MessageLevel::Warning => println!("{} {}", "⚠️".yellow(), message),
            MessageLevel::Info => println!("{}", message.dimmed()),
        }
    }
}

/// Buffered notifier for the console status bar
///
/// Messages expire after a TTL, the way toasts disappear on their own.
pub struct StatusBarNotifier {
    messages: Mutex<Vec<(MessageLevel, String, Instant)>>,
    ttl: Duration,
}

impl StatusBarNotifier {
    /// Create a new status bar notifier with default TTL (5 seconds)
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(5))
    }

    /// Create a new status bar notifier with custom TTL
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Get the most recent unexpired message, if any
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        let now = Instant::now();
        let messages = self.lock();

        messages
            .iter()
            .rev()
            .find(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .map(|(level, msg, _)| (*level, msg.clone()))
    }

    /// Get count of active messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|(_, _, time)| now.duration_since(*time) < self.ttl)
            .count()
    }

    /// Drop all messages
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(MessageLevel, String, Instant)>> {
        // A poisoned buffer still holds valid messages
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for StatusBarNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for StatusBarNotifier {
    fn notify(&self, level: MessageLevel, message: &str) {
        let mut messages = self.lock();
        messages.push((level, message.to_string(), Instant::now()));

        // Keep only last 100 messages
        if messages.len() > 100 {
            messages.drain(0..50);
        }
    }
}

/// Notifier that records every message, for tests and scripting
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in order
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.lock().clone()
    }

    /// Recorded messages of one level
    #[must_use]
    pub fn of_level(&self, level: MessageLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Number of error messages recorded
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.of_level(MessageLevel::Error).len()
    }

    /// Number of success messages recorded
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.of_level(MessageLevel::Success).len()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(MessageLevel, String)>> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: MessageLevel, message: &str) {
        self.lock().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_notifier_creation() {
        let _notifier = StdoutNotifier::new();
        let _notifier2 = StdoutNotifier::default();
        let _quiet = StdoutNotifier::quiet();
    }

    #[test]
    fn test_status_bar_latest() {
        let notifier = StatusBarNotifier::new();

        notifier.info("First");
        notifier.success("Latest");

        let latest = notifier.latest_message().unwrap();
        assert_eq!(latest.0, MessageLevel::Success);
        assert_eq!(latest.1, "Latest");
        assert_eq!(notifier.message_count(), 2);
    }

    #[test]
    fn test_status_bar_ttl() {
        let notifier = StatusBarNotifier::with_ttl(Duration::from_millis(50));

        notifier.warning("Message");
        assert_eq!(notifier.message_count(), 1);

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(notifier.message_count(), 0);
        assert!(notifier.latest_message().is_none());
    }

    #[test]
    fn test_status_bar_clear() {
        let notifier = StatusBarNotifier::new();
        notifier.error("a");
        notifier.error("b");
        notifier.clear();
        assert_eq!(notifier.message_count(), 0);
    }

    #[test]
    fn test_recording_notifier_counts() {
        let recorder = RecordingNotifier::new();
        recorder.success("saved");
        recorder.error("boom");
        recorder.error("again");
        recorder.info("fyi");

        assert_eq!(recorder.success_count(), 1);
        assert_eq!(recorder.error_count(), 2);
        assert_eq!(recorder.messages().len(), 4);
        assert_eq!(recorder.of_level(MessageLevel::Info), vec!["fyi".to_string()]);

        recorder.clear();
        assert!(recorder.messages().is_empty());
    }
}
