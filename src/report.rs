// src/report.rs
//! Machine-readable reports for batch runs
//!
//! Outcomes only — key material never appears here.

use chrono::Utc;
use serde_json::json;

use crate::core::batch::BatchResult;

/// Render a batch result as a pretty-printed JSON report.
pub fn batch_report_json(result: &BatchResult) -> serde_json::Result<String> {
    let report = json!({
        "report_format": "secure-file-vault-v1",
        "generated_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "tool_version": env!("CARGO_PKG_VERSION"),
        "succeeded": result.succeeded,
        "failed": result.failed,
        "outcomes": result.outcomes,
    });
    serde_json::to_string_pretty(&report)
}
