// SPDX-License-Identifier: MPL-2.0
//! Toast notification state.
//!
//! Notifications carry an i18n message key plus optional interpolation
//! arguments; the text is resolved at render time so a locale switch
//! re-translates anything still on screen. The [`Manager`] keeps a bounded
//! set of visible toasts, queues the overflow, and auto-dismisses
//! everything except errors.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use iced::Color;

use crate::ui::design_tokens::palette;

/// Maximum number of toasts visible at once; further pushes wait in line.
const MAX_VISIBLE: usize = 3;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity determines the accent color and the dismissal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Auto-dismiss delay; errors stay until dismissed by hand.
    #[must_use]
    pub fn auto_dismiss_after(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }

    /// Text glyph shown in front of the message.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "i",
            Severity::Warning => "!",
            Severity::Error => "✕",
        }
    }
}

/// One message destined for the toast overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an interpolation argument (file name, count, reason).
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    fn expired(&self) -> bool {
        match self.severity.auto_dismiss_after() {
            Some(delay) => self.created_at.elapsed() >= delay,
            None => false,
        }
    }
}

/// Messages emitted by the toast overlay.
#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
}

/// Owns the visible toasts and the overflow queue.
#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    waiting: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a notification immediately if there is room, otherwise queues
    /// it until a visible slot frees up.
    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.waiting.push_back(notification);
        }
    }

    /// Removes a notification wherever it currently lives.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_waiting();
            return true;
        }
        if let Some(pos) = self.waiting.iter().position(|n| n.id() == id) {
            self.waiting.remove(pos);
            return true;
        }
        false
    }

    /// Expires timed-out toasts. Driven by the application tick
    /// subscription, which only runs while notifications exist.
    pub fn tick(&mut self) {
        let expired: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.expired())
            .map(Notification::id)
            .collect();
        for id in expired {
            self.dismiss(id);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.waiting.is_empty()
    }

    fn promote_waiting(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.waiting.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let a = Notification::success("key");
        let b = Notification::success("key");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn errors_never_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_after().is_none());
    }

    #[test]
    fn warnings_outlast_successes() {
        let success = Severity::Success.auto_dismiss_after().unwrap();
        let warning = Severity::Warning.auto_dismiss_after().unwrap();
        assert!(warning > success);
    }

    #[test]
    fn with_arg_accumulates_arguments() {
        let notification = Notification::error("notification-convert-error")
            .with_arg("name", "photo.jpg")
            .with_arg("reason", "HTTP 500");
        assert_eq!(notification.message_args().len(), 2);
        assert_eq!(notification.message_key(), "notification-convert-error");
    }

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert_eq!(manager.visible_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn overflow_goes_to_waiting_queue() {
        let mut manager = Manager::new();
        for i in 0..MAX_VISIBLE + 2 {
            manager.push(Notification::success(format!("key-{}", i)));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.waiting_count(), 2);
    }

    #[test]
    fn dismiss_promotes_from_waiting() {
        let mut manager = Manager::new();
        let mut first_id = None;
        for i in 0..MAX_VISIBLE {
            let n = Notification::success(format!("visible-{}", i));
            if i == 0 {
                first_id = Some(n.id());
            }
            manager.push(n);
        }
        manager.push(Notification::success("waiting"));

        assert!(manager.dismiss(first_id.unwrap()));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.waiting_count(), 0);
    }

    #[test]
    fn dismiss_unknown_id_returns_false() {
        let mut manager = Manager::new();
        assert!(!manager.dismiss(NotificationId::new()));
    }

    #[test]
    fn tick_keeps_errors_visible() {
        let mut manager = Manager::new();
        manager.push(Notification::error("kept"));
        manager.tick();
        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn handle_message_dismisses() {
        let mut manager = Manager::new();
        let notification = Notification::success("key");
        let id = notification.id();
        manager.push(notification);

        manager.handle_message(&Message::Dismiss(id));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn severity_glyphs_are_distinct() {
        let glyphs = [
            Severity::Success.glyph(),
            Severity::Info.glyph(),
            Severity::Warning.glyph(),
            Severity::Error.glyph(),
        ];
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
