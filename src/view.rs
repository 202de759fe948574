use askama::Template;
use chrono::{DateTime, Utc};

use crate::session::Session;

#[derive(Template)]
#[template(path = "panel.txt")]
pub struct PanelView<'a> {
    pub source: String,
    pub source_name: &'a str,
    pub target: String,
    pub target_name: &'a str,
    pub input: &'a str,
    pub input_count: usize,
    pub output: &'a str,
    pub output_count: usize,
    pub detected: &'a str,
    pub trigger_label: &'a str,
    pub trigger_enabled: bool,
    pub status: &'a str,
    pub status_kind: &'a str,
    pub toast: &'a str,
}

impl<'a> PanelView<'a> {
    /// Snapshot of the session as it looks at `now`. Expired toasts are left out.
    pub fn new(session: &'a Session, now: DateTime<Utc>) -> Self {
        let toast = session
            .toast
            .as_ref()
            .filter(|toast| toast.visible_at(now))
            .map(|toast| toast.message.as_str())
            .unwrap_or_default();
        let (status, status_kind) = match &session.status {
            Some(status) => (status.message.as_str(), status.kind.label()),
            None => ("", ""),
        };

        Self {
            source: session.source.to_string(),
            source_name: session.source.name(),
            target: session.target.to_string(),
            target_name: session.target.name(),
            input: &session.input,
            input_count: session.input_count,
            output: &session.output,
            output_count: session.output_count,
            detected: session.detected.as_deref().unwrap_or_default(),
            trigger_label: session.trigger.label(),
            trigger_enabled: session.trigger.is_enabled(),
            status,
            status_kind,
            toast,
        }
    }
}
