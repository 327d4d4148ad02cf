//! Host-facing seams for user notices.
//!
//! # Responsibility
//! - Abstract the host's non-blocking notice toast.
//!
//! # Invariants
//! - Notices are fire-and-forget; implementations must not block or fail.

use log::warn;
use std::cell::RefCell;

/// Posts a short non-blocking message to the user.
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        warn!("event=user_notice module=host status=warn message={message}");
    }
}

/// Notifier that keeps every message, for hosts that render notices later.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: RefCell<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Removes and returns every queued message.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl Notifier for CollectingNotifier {
    fn notice(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notice(&self, message: &str) {
        (**self).notice(message);
    }
}
