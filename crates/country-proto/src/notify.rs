//! Notifier capability — how status and failure messages reach the user.

use std::fmt;

/// Kind of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Failure,
    Warning,
    Info,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Default notifier: writes `KIND: message` to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        let label = kind.as_str().to_uppercase();
        match kind {
            NoticeKind::Failure | NoticeKind::Warning => tracing::warn!("{}: {}", label, message),
            NoticeKind::Success | NoticeKind::Info => tracing::info!("{}: {}", label, message),
        }
    }
}

impl<F> Notifier for F
where
    F: Fn(NoticeKind, &str) + Send + Sync,
{
    fn notify(&self, kind: NoticeKind, message: &str) {
        self(kind, message)
    }
}
