//! User-facing notices for create/update outcomes.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message shown to the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success".to_string(),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            text: text.into(),
        }
    }
}

/// Presents notices to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show `notice` and return once the user has acknowledged it.
    async fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the log and acknowledges immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(title = %notice.title, "{}", notice.text),
            NoticeLevel::Error => error!(title = %notice.title, "{}", notice.text),
        }
    }
}
