use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::patch::Patch;
use crate::tracker::validate::{
    check_max_len, check_record_id, finish, invalid, normalized, parse_plain_date,
    DATE_FORMAT_MESSAGE, PLAIN_DATE_FORMAT,
};

/// Application pipeline status. A closed enum with no enforced transition
/// order: any status may be set to any other by direct update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "준비")]
    Preparing,
    #[serde(rename = "지원 완료")]
    Applied,
    #[serde(rename = "서류 합격")]
    ResumePassed,
    #[serde(rename = "면접 진행")]
    Interviewing,
    #[serde(rename = "합격")]
    Offer,
    #[serde(rename = "불합격")]
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        Self::Preparing,
        Self::Applied,
        Self::ResumePassed,
        Self::Interviewing,
        Self::Offer,
        Self::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Preparing => "준비",
            Self::Applied => "지원 완료",
            Self::ResumePassed => "서류 합격",
            Self::Interviewing => "면접 진행",
            Self::Offer => "합격",
            Self::Rejected => "불합격",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == raw.trim())
    }
}

const STATUS_MESSAGE: &str = "올바른 지원 상태가 아닙니다.";

/// Stored application document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub user_id: String,
    pub job_posting_id: String,
    pub status: ApplicationStatus,
    pub applied_at: Option<NaiveDate>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn to_row(&self) -> ApplicationRow {
        ApplicationRow {
            id: self.id.clone(),
            job_posting_id: self.job_posting_id.clone(),
            status: self.status,
            applied_at: self
                .applied_at
                .map(|date| date.format(PLAIN_DATE_FORMAT).to_string()),
            memo: self.memo.clone(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// External row projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    pub id: String,
    pub job_posting_id: String,
    pub status: ApplicationStatus,
    pub applied_at: Option<String>,
    pub memo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Create payload. `status` stays a plain string until validation so an
/// out-of-enum value surfaces as a field error, not a body-level parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub job_posting_id: String,
    pub status: String,
    pub applied_at: Option<String>,
    pub memo: Option<String>,
}

impl ApplicationDraft {
    pub fn validate(self) -> Result<NewApplication, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_record_id(&mut errors, "jobPostingId", &self.job_posting_id);

        let status = match ApplicationStatus::parse(&self.status) {
            Some(status) => Some(status),
            None => {
                errors.add("status", invalid("status", STATUS_MESSAGE));
                None
            }
        };

        let applied_at = match normalized(self.applied_at) {
            Some(raw) => match parse_plain_date(&raw) {
                Some(date) => Some(date),
                None => {
                    errors.add("appliedAt", invalid("date_format", DATE_FORMAT_MESSAGE));
                    None
                }
            },
            None => None,
        };

        if let Some(memo) = &self.memo {
            check_max_len(&mut errors, "memo", memo, 5000, "메모는 5000자 이내여야 합니다.");
        }

        finish(errors)?;

        Ok(NewApplication {
            job_posting_id: self.job_posting_id.trim().to_string(),
            // parse checked above; the fallback is unreachable once finish passed
            status: status.unwrap_or(ApplicationStatus::Preparing),
            applied_at,
            memo: normalized(self.memo),
        })
    }
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_posting_id: String,
    pub status: ApplicationStatus,
    pub applied_at: Option<NaiveDate>,
    pub memo: Option<String>,
}

/// PATCH payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationPatch {
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub applied_at: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub memo: Patch<String>,
}

impl ApplicationPatch {
    pub fn validate(self) -> Result<ApplicationChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let status = match &self.status {
            Some(raw) => match ApplicationStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.add("status", invalid("status", STATUS_MESSAGE));
                    None
                }
            },
            None => None,
        };

        let applied_at = match self.applied_at {
            Patch::Set(raw) => {
                let trimmed = raw.trim().to_string();
                if trimmed.is_empty() {
                    Patch::Clear
                } else {
                    match parse_plain_date(&trimmed) {
                        Some(date) => Patch::Set(date),
                        None => {
                            errors.add("appliedAt", invalid("date_format", DATE_FORMAT_MESSAGE));
                            Patch::Keep
                        }
                    }
                }
            }
            Patch::Clear => Patch::Clear,
            Patch::Keep => Patch::Keep,
        };

        let memo = match self.memo {
            Patch::Set(value) => {
                check_max_len(&mut errors, "memo", &value, 5000, "메모는 5000자 이내여야 합니다.");
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    Patch::Clear
                } else {
                    Patch::Set(trimmed)
                }
            }
            Patch::Clear => Patch::Clear,
            Patch::Keep => Patch::Keep,
        };

        finish(errors)?;

        Ok(ApplicationChanges {
            status,
            applied_at,
            memo,
        })
    }
}

/// Validated patch.
#[derive(Debug, Clone, Default)]
pub struct ApplicationChanges {
    pub status: Option<ApplicationStatus>,
    pub applied_at: Patch<NaiveDate>,
    pub memo: Patch<String>,
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.label()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("탈락"), None);
    }

    #[test]
    fn status_serializes_as_korean_label() {
        let serialized = serde_json::to_string(&ApplicationStatus::Applied).expect("serializable");
        assert_eq!(serialized, "\"지원 완료\"");
    }

    #[test]
    fn out_of_enum_status_is_a_validation_error() {
        let payload = ApplicationDraft {
            job_posting_id: "665f1b2a9c3d4e5f6a7b8c9d".to_string(),
            status: "서류 통과".to_string(),
            ..ApplicationDraft::default()
        };
        let errors = payload.validate().expect_err("unknown status");
        assert!(errors.field_errors().contains_key("status"));
    }

    #[test]
    fn applied_at_round_trips_as_plain_date() {
        let payload = ApplicationDraft {
            job_posting_id: "665f1b2a9c3d4e5f6a7b8c9d".to_string(),
            status: "지원 완료".to_string(),
            applied_at: Some("2025-01-15".to_string()),
            memo: None,
        };
        let input = payload.validate().expect("valid draft");
        let now = Utc::now();
        let record = ApplicationRecord {
            id: "665f1b2a9c3d4e5f6a7b8c01".to_string(),
            user_id: "665f1b2a9c3d4e5f6a7b8c00".to_string(),
            job_posting_id: input.job_posting_id,
            status: input.status,
            applied_at: input.applied_at,
            memo: input.memo,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(record.to_row().applied_at.as_deref(), Some("2025-01-15"));
    }

    #[test]
    fn malformed_job_posting_id_is_rejected() {
        let payload = ApplicationDraft {
            job_posting_id: "12345".to_string(),
            status: "준비".to_string(),
            ..ApplicationDraft::default()
        };
        let errors = payload.validate().expect_err("bad id");
        assert!(errors.field_errors().contains_key("jobPostingId"));
    }

    #[test]
    fn patch_with_only_status_keeps_other_fields() {
        let payload: ApplicationPatch =
            serde_json::from_str(r#"{"status": "합격"}"#).expect("valid json");
        let changes = payload.validate().expect("valid patch");
        assert_eq!(changes.status, Some(ApplicationStatus::Offer));
        assert_eq!(changes.applied_at, Patch::Keep);
        assert_eq!(changes.memo, Patch::Keep);
    }
}
