//! One-message summarization of validation error payloads.

use serde_json::Value;

/// Shown when a payload carries no recognizable message.
pub const FALLBACK_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";

/// Picks a single human-readable message out of a loosely shaped error
/// payload. Priority: a top-level `error` string, then the first field
/// error, then the first form-level error, then the same search inside a
/// nested `details` object. Field order is the serializer's map order, so
/// the pick is deterministic for a given payload.
pub fn extract_error_message(payload: &Value) -> String {
    search(payload)
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}

fn search(payload: &Value) -> Option<&str> {
    if let Some(message) = payload.get("error").and_then(Value::as_str) {
        return Some(message);
    }
    if let Some(fields) = payload.get("fieldErrors").and_then(Value::as_object) {
        for messages in fields.values() {
            if let Some(first) = first_string(messages) {
                return Some(first);
            }
        }
    }
    if let Some(first) = payload.get("formErrors").and_then(first_string) {
        return Some(first);
    }
    payload.get("details").and_then(search)
}

fn first_string(value: &Value) -> Option<&str> {
    value.as_array()?.iter().find_map(Value::as_str)
}
