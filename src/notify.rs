use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

/// User-facing notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

struct Shown {
    toast: Toast,
    at: Instant,
}

/// Holds at most one toast. A new notification replaces the visible one,
/// and a toast disappears once `delay` has elapsed since it was shown.
pub struct ToastNotifier {
    delay: Duration,
    current: Mutex<Option<Shown>>,
}

impl ToastNotifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Option<Toast> {
        self.visible_at(Instant::now())
    }

    pub fn visible_at(&self, now: Instant) -> Option<Toast> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        match current.as_ref() {
            Some(shown) if now.saturating_duration_since(shown.at) < self.delay => {
                Some(shown.toast.clone())
            }
            Some(_) => {
                *current = None;
                None
            }
            None => None,
        }
    }

    /// Removes and returns the visible toast, so it is printed only once.
    pub fn take(&self) -> Option<Toast> {
        let toast = self.current();
        if toast.is_some() {
            *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
        }
        toast
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = Some(Shown {
            toast: Toast {
                message: message.to_string(),
                severity,
            },
            at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_notification_wins() {
        let toasts = ToastNotifier::new(Duration::from_secs(60));
        toasts.notify("first", Severity::Info);
        toasts.notify("second", Severity::Error);

        let toast = toasts.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.severity, Severity::Error);
    }

    #[test]
    fn toast_dismisses_after_delay() {
        let toasts = ToastNotifier::new(Duration::from_millis(2500));
        toasts.notify("saved", Severity::Success);

        let later = Instant::now() + Duration::from_millis(2600);
        assert!(toasts.visible_at(later).is_none());
        assert!(toasts.current().is_none());
    }

    #[test]
    fn take_clears_toast() {
        let toasts = ToastNotifier::new(Duration::from_secs(60));
        toasts.notify("hello", Severity::Info);
        assert!(toasts.take().is_some());
        assert!(toasts.take().is_none());
    }
}
