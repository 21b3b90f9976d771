//! Analysis Event Logger
//!
//! One structured event per analysis request, written through `tracing` so it
//! lands in both the console and the NDJSON file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Longest extracted-text excerpt written to logs, in characters.
pub const MAX_EXCERPT_CHARS: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Completed {
        nutrients_found: usize,
        alerts: usize,
        demographic: String,
        defaulted: bool,
        excerpt: String,
    },
    /// The caller sent an unusable upload.
    Rejected { reason: String },
    /// A collaborator failed.
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AnalysisEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Log one analysis event and return the entry that was written.
    pub fn log_event(request_id: &str, event: AnalysisEvent) -> EventLogEntry {
        let entry = EventLogEntry {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();

        match &entry.event {
            AnalysisEvent::Completed { .. } => {
                info!(target: "analysis_events", request_id, event = %json, "Analysis completed")
            }
            AnalysisEvent::Rejected { .. } | AnalysisEvent::Failed { .. } => {
                warn!(target: "analysis_events", request_id, event = %json, "Analysis failed")
            }
        }
        entry
    }
}

/// Truncate text for logging, on a character boundary.
pub fn excerpt(text: &str) -> String {
    if text.chars().count() <= MAX_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_EXCERPT_CHARS).collect();
    out.push('…');
    out
}
