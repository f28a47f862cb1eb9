use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::patch::Patch;
use crate::tracker::validate::{
    check_max_len, check_record_id, check_required_text, finish, invalid, normalized,
    parse_timestamp, TIMESTAMP_MESSAGE,
};

/// Interview outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
    #[serde(rename = "예정")]
    Scheduled,
    #[serde(rename = "합격")]
    Passed,
    #[serde(rename = "불합격")]
    Failed,
}

impl InterviewStatus {
    pub const ALL: [InterviewStatus; 3] = [Self::Scheduled, Self::Passed, Self::Failed];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "예정",
            Self::Passed => "합격",
            Self::Failed => "불합격",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == raw.trim())
    }
}

const STATUS_MESSAGE: &str = "올바른 면접 상태가 아닙니다.";

/// Stored interview document. `scheduled_at` stays nullable: an interview can
/// be registered before a slot is agreed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: String,
    pub user_id: String,
    pub job_posting_id: String,
    pub application_id: String,
    pub kind: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub status: InterviewStatus,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewRecord {
    pub fn to_row(&self) -> InterviewRow {
        InterviewRow {
            id: self.id.clone(),
            job_posting_id: self.job_posting_id.clone(),
            application_id: self.application_id.clone(),
            kind: self.kind.clone(),
            scheduled_at: self
                .scheduled_at
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            location: self.location.clone(),
            status: self.status,
            memo: self.memo.clone(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// External row projection. The stage label serializes as `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRow {
    pub id: String,
    pub job_posting_id: String,
    pub application_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub scheduled_at: Option<String>,
    pub location: Option<String>,
    pub status: InterviewStatus,
    pub memo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Create payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewDraft {
    pub job_posting_id: String,
    pub application_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub scheduled_at: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub memo: Option<String>,
}

impl InterviewDraft {
    pub fn validate(self) -> Result<NewInterview, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_record_id(&mut errors, "jobPostingId", &self.job_posting_id);
        check_record_id(&mut errors, "applicationId", &self.application_id);
        check_required_text(
            &mut errors,
            "type",
            &self.kind,
            60,
            "면접 단계를 1자 이상 60자 이하로 입력해 주세요.",
        );

        let scheduled_at = match normalized(self.scheduled_at) {
            Some(raw) => match parse_timestamp(&raw) {
                Some(at) => Some(at),
                None => {
                    errors.add("scheduledAt", invalid("timestamp", TIMESTAMP_MESSAGE));
                    None
                }
            },
            None => None,
        };

        if let Some(location) = &self.location {
            check_max_len(&mut errors, "location", location, 200, "장소는 200자 이내여야 합니다.");
        }

        let status = match InterviewStatus::parse(&self.status) {
            Some(status) => Some(status),
            None => {
                errors.add("status", invalid("status", STATUS_MESSAGE));
                None
            }
        };

        if let Some(memo) = &self.memo {
            check_max_len(&mut errors, "memo", memo, 2000, "메모는 2000자 이내여야 합니다.");
        }

        finish(errors)?;

        Ok(NewInterview {
            job_posting_id: self.job_posting_id.trim().to_string(),
            application_id: self.application_id.trim().to_string(),
            kind: self.kind.trim().to_string(),
            scheduled_at,
            location: normalized(self.location),
            status: status.unwrap_or(InterviewStatus::Scheduled),
            memo: normalized(self.memo),
        })
    }
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInterview {
    pub job_posting_id: String,
    pub application_id: String,
    pub kind: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub status: InterviewStatus,
    pub memo: Option<String>,
}

/// PATCH payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewPatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub scheduled_at: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub location: Patch<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub memo: Patch<String>,
}

impl InterviewPatch {
    pub fn validate(self) -> Result<InterviewChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(kind) = &self.kind {
            check_required_text(
                &mut errors,
                "type",
                kind,
                60,
                "면접 단계를 1자 이상 60자 이하로 입력해 주세요.",
            );
        }

        let scheduled_at = match self.scheduled_at {
            Patch::Set(raw) => {
                let trimmed = raw.trim().to_string();
                if trimmed.is_empty() {
                    Patch::Clear
                } else {
                    match parse_timestamp(&trimmed) {
                        Some(at) => Patch::Set(at),
                        None => {
                            errors.add("scheduledAt", invalid("timestamp", TIMESTAMP_MESSAGE));
                            Patch::Keep
                        }
                    }
                }
            }
            Patch::Clear => Patch::Clear,
            Patch::Keep => Patch::Keep,
        };

        let location = match self.location {
            Patch::Set(value) => {
                check_max_len(&mut errors, "location", &value, 200, "장소는 200자 이내여야 합니다.");
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

        let status = match &self.status {
            Some(raw) => match InterviewStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.add("status", invalid("status", STATUS_MESSAGE));
                    None
                }
            },
            None => None,
        };

        let memo = match self.memo {
            Patch::Set(value) => {
                check_max_len(&mut errors, "memo", &value, 2000, "메모는 2000자 이내여야 합니다.");
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

        Ok(InterviewChanges {
            kind: self.kind.map(|value| value.trim().to_string()),
            scheduled_at,
            location,
            status,
            memo,
        })
    }
}

/// Validated patch.
#[derive(Debug, Clone, Default)]
pub struct InterviewChanges {
    pub kind: Option<String>,
    pub scheduled_at: Patch<DateTime<Utc>>,
    pub location: Patch<String>,
    pub status: Option<InterviewStatus>,
    pub memo: Patch<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> InterviewDraft {
        InterviewDraft {
            job_posting_id: "665f1b2a9c3d4e5f6a7b8c9d".to_string(),
            application_id: "665f1b2a9c3d4e5f6a7b8c01".to_string(),
            kind: "1차 면접".to_string(),
            scheduled_at: Some("2025-03-04T10:30:00+09:00".to_string()),
            location: Some("판교 오피스 3층".to_string()),
            status: "예정".to_string(),
            memo: None,
        }
    }

    #[test]
    fn valid_draft_converts_with_utc_schedule() {
        let input = draft().validate().expect("valid draft");
        assert_eq!(input.kind, "1차 면접");
        assert_eq!(input.status, InterviewStatus::Scheduled);
        let at = input.scheduled_at.expect("schedule parsed");
        assert_eq!(at.to_rfc3339_opts(SecondsFormat::Secs, true), "2025-03-04T01:30:00Z");
    }

    #[test]
    fn null_schedule_is_accepted() {
        let payload: InterviewDraft = serde_json::from_str(
            r#"{
                "jobPostingId": "665f1b2a9c3d4e5f6a7b8c9d",
                "applicationId": "665f1b2a9c3d4e5f6a7b8c01",
                "type": "과제 전형",
                "scheduledAt": null,
                "status": "예정"
            }"#,
        )
        .expect("valid json");
        let input = payload.validate().expect("valid draft");
        assert_eq!(input.scheduled_at, None);
    }

    #[test]
    fn type_label_length_is_bounded() {
        let mut payload = draft();
        payload.kind = "면".repeat(61);
        let errors = payload.validate().expect_err("too long");
        assert!(errors.field_errors().contains_key("type"));
    }

    #[test]
    fn unknown_status_is_a_field_error() {
        let mut payload = draft();
        payload.status = "보류".to_string();
        let errors = payload.validate().expect_err("unknown status");
        assert!(errors.field_errors().contains_key("status"));
    }

    #[test]
    fn garbled_schedule_is_a_field_error() {
        let mut payload = draft();
        payload.scheduled_at = Some("다음 주 화요일".to_string());
        let errors = payload.validate().expect_err("bad timestamp");
        assert!(errors.field_errors().contains_key("scheduledAt"));
    }

    #[test]
    fn row_serializes_stage_label_as_type() {
        let input = draft().validate().expect("valid draft");
        let now = Utc::now();
        let record = InterviewRecord {
            id: "665f1b2a9c3d4e5f6a7b8c02".to_string(),
            user_id: "665f1b2a9c3d4e5f6a7b8c00".to_string(),
            job_posting_id: input.job_posting_id,
            application_id: input.application_id,
            kind: input.kind,
            scheduled_at: input.scheduled_at,
            location: input.location,
            status: input.status,
            memo: input.memo,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(record.to_row()).expect("serializable");
        assert_eq!(value["type"], "1차 면접");
        assert_eq!(value["status"], "예정");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn patch_can_clear_the_schedule() {
        let payload: InterviewPatch =
            serde_json::from_str(r#"{"scheduledAt": null, "status": "합격"}"#).expect("valid json");
        let changes = payload.validate().expect("valid patch");
        assert_eq!(changes.scheduled_at, Patch::Clear);
        assert_eq!(changes.status, Some(InterviewStatus::Passed));
        assert_eq!(changes.memo, Patch::Keep);
    }
}
