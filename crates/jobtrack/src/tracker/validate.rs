//! Shared field checkers for the resource payloads.
//!
//! Payload structs validate and convert in one pass ("parse, don't validate"):
//! their `validate` methods consume the wire shape and either return a typed
//! input for the service layer or a `ValidationErrors` keyed by the camelCase
//! JSON field names.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

use crate::ident;

pub const PLAIN_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_FORMAT_MESSAGE: &str = "날짜는 YYYY-MM-DD 형식이어야 합니다.";
pub const TIMESTAMP_MESSAGE: &str = "올바른 일시 형식이 아닙니다.";
pub const RECORD_ID_MESSAGE: &str = "올바른 ID 형식이 아닙니다.";
pub const URL_MESSAGE: &str = "올바른 URL 형식이 아닙니다.";

/// Trim an optional form input; empty strings count as absent because the web
/// client submits `""` for untouched fields.
pub fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

pub fn parse_plain_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // chrono tolerates unpadded numbers; the wire format is exactly ten chars
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, PLAIN_DATE_FORMAT).ok()
}

/// Accept RFC 3339 or the datetime-local flavors the schedule form produces.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

pub fn is_absolute_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn check_required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: usize,
    message: &'static str,
) {
    let len = value.trim().chars().count();
    if len == 0 || len > max {
        errors.add(field, invalid("length", message));
    }
}

pub fn check_max_len(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: usize,
    message: &'static str,
) {
    if value.chars().count() > max {
        errors.add(field, invalid("length", message));
    }
}

/// URL fields: empty string is treated as absent, anything else must be an
/// absolute http(s) URL.
pub fn check_url(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() && !is_absolute_url(trimmed) {
        errors.add(field, invalid("url", URL_MESSAGE));
    }
}

pub fn check_record_id(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if !ident::is_well_formed(value.trim()) {
        errors.add(field, invalid("id_format", RECORD_ID_MESSAGE));
    }
}

pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn normalized_drops_blank_inputs() {
        assert_eq!(normalized(None), None);
        assert_eq!(normalized(Some("   ".to_string())), None);
        assert_eq!(
            normalized(Some("  판교 오피스  ".to_string())),
            Some("판교 오피스".to_string())
        );
    }

    #[test]
    fn plain_date_requires_exact_format() {
        assert!(parse_plain_date("2025-01-15").is_some());
        assert!(parse_plain_date("2025-1-15").is_none());
        assert!(parse_plain_date("2025/01/15").is_none());
        assert!(parse_plain_date("01-15-2025").is_none());
    }

    #[test]
    fn timestamp_accepts_rfc3339_and_datetime_local() {
        let rfc = parse_timestamp("2025-03-04T10:30:00+09:00").expect("rfc3339");
        assert_eq!(rfc.hour(), 1); // normalized to UTC
        assert!(parse_timestamp("2025-03-04T10:30").is_some());
        assert!(parse_timestamp("2025-03-04T10:30:00").is_some());
        assert!(parse_timestamp("내일 오후").is_none());
    }

    #[test]
    fn absolute_url_requires_scheme_and_host() {
        assert!(is_absolute_url("https://careers.example.com/postings/1"));
        assert!(is_absolute_url("http://example.com"));
        assert!(!is_absolute_url("example.com/postings"));
        assert!(!is_absolute_url("ftp://example.com"));
        assert!(!is_absolute_url("https://"));
    }

    #[test]
    fn finish_reports_accumulated_errors() {
        let mut errors = ValidationErrors::new();
        check_required_text(&mut errors, "title", "   ", 120, "제목을 입력해 주세요.");
        check_record_id(&mut errors, "jobPostingId", "abc");
        let errors = finish(errors).expect_err("two failures");
        assert_eq!(errors.field_errors().len(), 2);
    }
}
