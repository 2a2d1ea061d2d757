use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::store::knowledge::KnowledgeBase;

pub const STATUS_TITLE: &str = "Form Tracker Status";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEvent {
    pub timestamp_ms: u128,
    pub message: String,
    pub learned_fields: usize,
    pub forms_tracked: u64,
}

impl StatusEvent {
    pub fn now(message: impl ToString, kb: &KnowledgeBase) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            message: message.to_string(),
            learned_fields: kb.learned_fields(),
            forms_tracked: kb.form_count,
        }
    }

    /// Banner text as shown in the status panel.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}\n\nLearned Fields: {}\nForms Tracked: {}\n",
            STATUS_TITLE,
            format_time_of_day(self.timestamp_ms),
            self.message,
            self.learned_fields,
            self.forms_tracked
        )
    }
}

/// `HH:MM:SS` (UTC) for a unix timestamp in milliseconds.
pub fn format_time_of_day(timestamp_ms: u128) -> String {
    let secs_of_day = (timestamp_ms / 1000) % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60
    )
}

/// Sink for human-readable status lines.
pub trait StatusObserver {
    fn notify(&self, event: &StatusEvent);
}
