//! HTTP status classification
//!
//! Maps every non-2xx response to exactly one [`MealSnapError`], extracting
//! structured hints (retry-after, field messages) from the body when
//! present. Body parsing is best-effort: an unparsable body degrades to a
//! generic message, never a panic.

use std::time::Duration;

use serde_json::Value;

use crate::error::{ErrorCode, MealSnapError};

const DEFAULT_RATE_LIMIT_RETRY_AFTER: Duration = Duration::from_secs(60);
const DEFAULT_MAINTENANCE_RETRY_AFTER: Duration = Duration::from_secs(300);

/// Classify a response status plus optional body.
///
/// Returns `None` for 2xx, otherwise exactly one error. Total over all
/// status codes and body shapes.
pub fn classify(status: u16, body: Option<&[u8]>) -> Option<MealSnapError> {
    if (200..300).contains(&status) {
        return None;
    }

    let hints = body.map(BodyHints::parse).unwrap_or_default();

    let error = match status {
        400 => MealSnapError::validation(
            hints
                .message
                .unwrap_or_else(|| "Invalid request".to_string()),
        ),
        401 => MealSnapError::authentication(
            hints
                .message
                .unwrap_or_else(|| "Invalid or missing API key".to_string()),
        ),
        403 => MealSnapError::authorization(
            hints
                .message
                .unwrap_or_else(|| "Access denied".to_string()),
        ),
        404 => MealSnapError::api(404, "Requested endpoint not found"),
        409 => MealSnapError::api(
            409,
            hints
                .message
                .unwrap_or_else(|| "Request conflict".to_string()),
        ),
        413 => MealSnapError::Validation {
            code: ErrorCode::ImageTooLarge,
            message: "Image too large".to_string(),
            field: Some("image".to_string()),
        },
        422 => MealSnapError::validation(
            hints
                .field_errors
                .or(hints.message)
                .unwrap_or_else(|| "Request could not be processed".to_string()),
        ),
        429 => MealSnapError::rate_limited(
            hints
                .message
                .unwrap_or_else(|| "Too many requests".to_string()),
            hints.retry_after.unwrap_or(DEFAULT_RATE_LIMIT_RETRY_AFTER),
        ),
        500 => MealSnapError::api(
            500,
            hints
                .message
                .unwrap_or_else(|| "Internal server error".to_string()),
        ),
        501 => MealSnapError::api(501, "Not implemented"),
        502 => MealSnapError::api(502, "Bad gateway"),
        503 => MealSnapError::api_with_retry_after(
            503,
            hints
                .message
                .unwrap_or_else(|| "Service under maintenance".to_string()),
            hints.retry_after.unwrap_or(DEFAULT_MAINTENANCE_RETRY_AFTER),
        ),
        504 => MealSnapError::timeout("Gateway timeout"),
        other => {
            let message = match hints.message {
                Some(message) => format!("Unexpected response ({}): {}", other, message),
                None => format!("Unexpected response ({})", other),
            };
            MealSnapError::api(other, message)
        }
    };

    Some(error)
}

/// Hints extracted from a response body, all best-effort
#[derive(Debug, Default)]
struct BodyHints {
    message: Option<String>,
    field_errors: Option<String>,
    retry_after: Option<Duration>,
}

impl BodyHints {
    fn parse(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => {
                // Not JSON; treat the whole body as a plain-text message.
                let text = String::from_utf8_lossy(body).trim().to_string();
                return Self {
                    message: (!text.is_empty()).then_some(text),
                    ..Self::default()
                };
            }
        };

        let message = ["message", "error", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string);

        let field_errors = value
            .get("detail")
            .and_then(Value::as_array)
            .map(|entries| flatten_detail_entries(entries));

        let retry_after = ["retry_after", "retryAfter", "retry-after"]
            .iter()
            .find_map(|key| value.get(key).and_then(parse_seconds));

        Self {
            message,
            field_errors,
            retry_after,
        }
    }
}

/// Flatten FastAPI-style `detail: [{loc, msg}]` entries into
/// `"loc: msg"` strings, semicolon-separated.
fn flatten_detail_entries(entries: &[Value]) -> String {
    entries
        .iter()
        .map(|entry| {
            let loc = entry
                .get("loc")
                .and_then(Value::as_array)
                .map(|parts| {
                    parts
                        .iter()
                        .map(|part| match part {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(".")
                })
                .unwrap_or_else(|| "body".to_string());
            let msg = entry
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("invalid");
            format!("{}: {}", loc, msg)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_seconds(value: &Value) -> Option<Duration> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .map(Duration::from_secs),
        Value::String(s) => s.trim().parse::<u64>().ok().map(Duration::from_secs),
        _ => None,
    }
}
