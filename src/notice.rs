use chrono::{DateTime, Duration, Utc};

pub const TOAST_MILLIS: i64 = 2800;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Utc::now(),
        }
    }

    pub fn visible_at(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at < Duration::milliseconds(TOAST_MILLIS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}
