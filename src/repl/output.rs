//! Routing of debug-adapter output events onto the log.

use super::ReplModel;
use crate::model::severity::is_displayed_category;
use crate::model::{SessionId, Severity, SourceLocation};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

/// Group marker carried by an output event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupMarker {
    /// Open a group shown expanded.
    Start,
    /// Open a group shown collapsed.
    StartCollapsed,
    /// Close the innermost open group.
    End,
}

/// One output event as reported by a debug session.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    /// Output category (`stdout`, `stderr`, `console`, `telemetry`, ...).
    pub category: String,
    /// Output text, or the group label for group start markers.
    pub output: String,
    /// Group marker, if the event opens or closes a group.
    pub group: Option<GroupMarker>,
    /// Where the output came from.
    pub source: Option<SourceLocation>,
    /// Structured payload to show as an expandable value instead of text.
    pub data: Option<Value>,
}

impl OutputEvent {
    /// A plain text event of the given category.
    pub fn text(category: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            output: output.into(),
            group: None,
            source: None,
            data: None,
        }
    }
}

impl ReplModel {
    /// Apply a session output event to the log.
    ///
    /// Telemetry is dropped. Group markers open or close groups; a group's
    /// label is the event text without its line terminator. An end marker
    /// with text also appends that text. Events carrying `data` become
    /// structured entries named by the text; everything else goes through
    /// [`append_output`](Self::append_output) with the category's severity.
    pub fn log_output(&mut self, session: &SessionId, event: OutputEvent) {
        if !is_displayed_category(&event.category) {
            trace!(category = %event.category, "Dropping non-displayed output");
            return;
        }

        match event.group {
            Some(marker @ (GroupMarker::Start | GroupMarker::StartCollapsed)) => {
                let name = event.output.trim_end_matches(['\r', '\n']);
                self.start_group(name, marker == GroupMarker::Start, event.source);
                return;
            }
            Some(GroupMarker::End) => {
                self.end_group();
                if event.output.is_empty() && event.data.is_none() {
                    return;
                }
            }
            None => {}
        }

        match event.data {
            Some(value) => self.append_structured(event.output, value, event.source, None),
            None => {
                let severity = Severity::from_category(&event.category);
                self.append_output(session, &event.output, severity, event.source);
            }
        }
    }
}
