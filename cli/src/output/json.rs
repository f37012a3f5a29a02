//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed object: the
//! trigger outcome on completion, or an error object on failure.

use anyhow::{Context, Result};

use crate::application::HookOutcome;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the outcome of a trigger with its event log.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_outcome(
    outcome: &HookOutcome,
    messages: &[String],
    failure: Option<&str>,
) -> Result<String> {
    let obj = serde_json::json!({
        "trigger": outcome.trigger.name(),
        "status": outcome.status,
        "event": {
            "messages": messages,
            "failed": outcome.event_failed,
            "failure": failure,
        },
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
