use chrono::{DateTime, Local};

/// How long a message stays in the footer before a tick clears it.
pub const STATUS_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub severity: StatusSeverity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, StatusSeverity::Info)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, StatusSeverity::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusSeverity::Error)
    }

    pub fn new(text: impl Into<String>, severity: StatusSeverity) -> Self {
        Self {
            text: text.into(),
            timestamp: Local::now(),
            severity,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Local>) -> bool {
        now.signed_duration_since(self.timestamp).num_seconds() >= STATUS_TTL_SECS
    }
}
