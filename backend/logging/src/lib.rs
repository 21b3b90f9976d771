//! Structured logging for NutriScan.
//!
//! Console and rolling NDJSON file output, plus structured per-request analysis events.

pub mod event_logger;
pub mod logger;

pub use event_logger::{excerpt, AnalysisEvent, EventLogEntry, EventLogger};
pub use logger::{init_logger, LogGuard};
