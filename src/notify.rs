//! Transient user-facing notifications
//!
//! Short-lived, non-blocking status messages. Pipeline errors are surfaced
//! through this channel at the application boundary; none are fatal to the
//! running process.

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A transient, non-blocking notification channel
pub trait Notifier {
    /// Emit a short-lived status message
    fn notify(&self, severity: Severity, message: &str);
}

/// Default notifier that routes messages through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingNotifier {
        messages: RefCell<Vec<(Severity, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, severity: Severity, message: &str) {
            self.messages
                .borrow_mut()
                .push((severity, message.to_string()));
        }
    }

    #[test]
    fn test_notifier_records_severity_and_message() {
        let notifier = RecordingNotifier {
            messages: RefCell::new(Vec::new()),
        };
        notifier.notify(Severity::Error, "Location not found");

        let messages = notifier.messages.borrow();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, Severity::Error);
        assert!(messages[0].1.contains("Location not found"));
    }
}
