use std::time::Duration;

use colored::Colorize;

/// Default on-screen lifetime of a toast
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// Transient user-facing notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Where toasts go. The sink owns timed display and removal; callers only
/// emit.
pub trait NotificationSink {
    fn notify(&mut self, toast: Toast);
}

/// Prints toasts as colored lines, for the non-TUI commands
#[derive(Debug, Default)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&mut self, toast: Toast) {
        let line = match toast.severity {
            Severity::Info => format!("i {}", toast.message).cyan(),
            Severity::Success => format!("✓ {}", toast.message).green(),
            Severity::Warning => format!("! {}", toast.message).yellow(),
        };
        println!("{}", line);
    }
}

/// Collects toasts for assertions in tests
#[derive(Debug, Default)]
pub struct MemorySink {
    pub toasts: Vec<Toast>,
}

impl NotificationSink for MemorySink {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_defaults() {
        let toast = Toast::info("hello");
        assert_eq!(toast.severity, Severity::Info);
        assert_eq!(toast.duration, DEFAULT_TOAST_DURATION);

        let long = Toast::success("bye").with_duration(Duration::from_secs(5));
        assert_eq!(long.duration, Duration::from_secs(5));
    }

    #[test]
    fn test_memory_sink_records() {
        let mut sink = MemorySink::default();
        sink.notify(Toast::warning("careful"));
        assert_eq!(sink.toasts.len(), 1);
        assert_eq!(sink.toasts[0].severity, Severity::Warning);
    }
}
