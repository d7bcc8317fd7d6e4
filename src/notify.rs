//! Presentation notification surface.
//!
//! The core pushes status notices over an unbounded channel; a presentation
//! layer (the CLI here, a UI elsewhere) drains and renders them. Exactly one
//! terminal notice is emitted per failed operation; a successful submission
//! emits one in-progress notice followed by one completion notice.

use tokio::sync::mpsc;

/// Severity of a user-facing status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A user-facing status notification.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Sending half handed to the core components.
pub type NoticeSender = mpsc::UnboundedSender<Notice>;

/// Receiving half drained by the presentation layer.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Create the notification channel.
pub fn channel() -> (NoticeSender, NoticeReceiver) {
    mpsc::unbounded_channel()
}
