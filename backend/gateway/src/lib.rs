//! NutriScan Gateway HTTP API Server
//!
//! Accepts nutrition label photos, delegates text recognition to the OCR
//! collaborator, and returns the extracted nutrients with their reference-value
//! analysis.

pub mod analyze;
pub mod health_api;
pub mod response;
pub mod server;

pub use analyze::analyze_upload;
pub use response::{AnalyzeFailure, AnalyzeResponse, AnalyzeSuccess};
pub use server::{build_router, start_server, GatewayState};
