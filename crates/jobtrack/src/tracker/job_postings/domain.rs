use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::patch::Patch;
use crate::tracker::validate::{
    check_max_len, check_required_text, check_url, finish, invalid, normalized, parse_plain_date,
    DATE_FORMAT_MESSAGE, PLAIN_DATE_FORMAT,
};

/// Stored job posting document (internal shape, native dates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostingRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub company_name: String,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub preferred: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPostingRecord {
    pub fn to_row(&self) -> JobPostingRow {
        JobPostingRow {
            id: self.id.clone(),
            title: self.title.clone(),
            company_name: self.company_name.clone(),
            position: self.position.clone(),
            employment_type: self.employment_type.clone(),
            location: self.location.clone(),
            responsibilities: self.responsibilities.clone(),
            requirements: self.requirements.clone(),
            preferred: self.preferred.clone(),
            benefits: self.benefits.clone(),
            salary: self.salary.clone(),
            source: self.source.clone(),
            url: self.url.clone(),
            due_date: self
                .due_date
                .map(|date| date.format(PLAIN_DATE_FORMAT).to_string()),
            memo: self.memo.clone(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// External row projection: camelCase, string dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingRow {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub preferred: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub due_date: Option<String>,
    pub memo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Create payload as it arrives over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPostingDraft {
    pub title: String,
    pub company_name: String,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub preferred: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub due_date: Option<String>,
    pub memo: Option<String>,
}

impl JobPostingDraft {
    /// Validate the payload and convert it into a typed create input.
    pub fn validate(self) -> Result<NewJobPosting, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_required_text(
            &mut errors,
            "title",
            &self.title,
            120,
            "공고 제목을 입력해 주세요.",
        );
        check_required_text(
            &mut errors,
            "companyName",
            &self.company_name,
            120,
            "회사명을 입력해 주세요.",
        );
        if let Some(position) = &self.position {
            check_max_len(&mut errors, "position", position, 60, "직무는 60자 이내여야 합니다.");
        }
        if let Some(employment_type) = &self.employment_type {
            check_max_len(
                &mut errors,
                "employmentType",
                employment_type,
                60,
                "고용 형태는 60자 이내여야 합니다.",
            );
        }
        if let Some(location) = &self.location {
            check_max_len(&mut errors, "location", location, 200, "근무지는 200자 이내여야 합니다.");
        }
        for (field, value, message) in [
            ("responsibilities", &self.responsibilities, "주요 업무는 2000자 이내여야 합니다."),
            ("requirements", &self.requirements, "자격 요건은 2000자 이내여야 합니다."),
            ("preferred", &self.preferred, "우대 사항은 2000자 이내여야 합니다."),
            ("benefits", &self.benefits, "복리후생은 2000자 이내여야 합니다."),
        ] {
            if let Some(value) = value {
                check_max_len(&mut errors, field, value, 2000, message);
            }
        }
        if let Some(salary) = &self.salary {
            check_max_len(&mut errors, "salary", salary, 100, "급여는 100자 이내여야 합니다.");
        }
        if let Some(source) = &self.source {
            check_max_len(&mut errors, "source", source, 120, "출처는 120자 이내여야 합니다.");
        }
        if let Some(url) = &self.url {
            check_url(&mut errors, "url", url);
        }
        if let Some(memo) = &self.memo {
            check_max_len(&mut errors, "memo", memo, 5000, "메모는 5000자 이내여야 합니다.");
        }

        let due_date = match normalized(self.due_date) {
            Some(raw) => match parse_plain_date(&raw) {
                Some(date) => Some(date),
                None => {
                    errors.add("dueDate", invalid("date_format", DATE_FORMAT_MESSAGE));
                    None
                }
            },
            None => None,
        };

        finish(errors)?;

        Ok(NewJobPosting {
            title: self.title.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            position: normalized(self.position),
            employment_type: normalized(self.employment_type),
            location: normalized(self.location),
            responsibilities: normalized(self.responsibilities),
            requirements: normalized(self.requirements),
            preferred: normalized(self.preferred),
            benefits: normalized(self.benefits),
            salary: normalized(self.salary),
            source: normalized(self.source),
            url: normalized(self.url),
            due_date,
            memo: normalized(self.memo),
        })
    }
}

/// Validated create input for the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    pub title: String,
    pub company_name: String,
    pub position: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub responsibilities: Option<String>,
    pub requirements: Option<String>,
    pub preferred: Option<String>,
    pub benefits: Option<String>,
    pub salary: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub memo: Option<String>,
}

/// PATCH payload: absent fields keep stored values, explicit null clears.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPostingPatch {
    pub title: Option<String>,
    pub company_name: Option<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub position: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub employment_type: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub location: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub responsibilities: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub requirements: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub preferred: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub benefits: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub salary: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub source: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub url: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub due_date: Patch<String>,
    #[serde(deserialize_with = "crate::patch::deserialize")]
    pub memo: Patch<String>,
}

impl JobPostingPatch {
    pub fn validate(self) -> Result<JobPostingChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(title) = &self.title {
            check_required_text(&mut errors, "title", title, 120, "공고 제목을 입력해 주세요.");
        }
        if let Some(company_name) = &self.company_name {
            check_required_text(
                &mut errors,
                "companyName",
                company_name,
                120,
                "회사명을 입력해 주세요.",
            );
        }
        if let Some(position) = self.position.as_set() {
            check_max_len(&mut errors, "position", position, 60, "직무는 60자 이내여야 합니다.");
        }
        if let Some(employment_type) = self.employment_type.as_set() {
            check_max_len(
                &mut errors,
                "employmentType",
                employment_type,
                60,
                "고용 형태는 60자 이내여야 합니다.",
            );
        }
        if let Some(location) = self.location.as_set() {
            check_max_len(&mut errors, "location", location, 200, "근무지는 200자 이내여야 합니다.");
        }
        for (field, patch, message) in [
            ("responsibilities", &self.responsibilities, "주요 업무는 2000자 이내여야 합니다."),
            ("requirements", &self.requirements, "자격 요건은 2000자 이내여야 합니다."),
            ("preferred", &self.preferred, "우대 사항은 2000자 이내여야 합니다."),
            ("benefits", &self.benefits, "복리후생은 2000자 이내여야 합니다."),
        ] {
            if let Some(value) = patch.as_set() {
                check_max_len(&mut errors, field, value, 2000, message);
            }
        }
        if let Some(salary) = self.salary.as_set() {
            check_max_len(&mut errors, "salary", salary, 100, "급여는 100자 이내여야 합니다.");
        }
        if let Some(source) = self.source.as_set() {
            check_max_len(&mut errors, "source", source, 120, "출처는 120자 이내여야 합니다.");
        }
        if let Some(url) = self.url.as_set() {
            check_url(&mut errors, "url", url);
        }
        if let Some(memo) = self.memo.as_set() {
            check_max_len(&mut errors, "memo", memo, 5000, "메모는 5000자 이내여야 합니다.");
        }

        let due_date = match text_patch(self.due_date) {
            Patch::Set(raw) => match parse_plain_date(&raw) {
                Some(date) => Patch::Set(date),
                None => {
                    errors.add("dueDate", invalid("date_format", DATE_FORMAT_MESSAGE));
                    Patch::Keep
                }
            },
            Patch::Clear => Patch::Clear,
            Patch::Keep => Patch::Keep,
        };

        finish(errors)?;

        Ok(JobPostingChanges {
            title: self.title.map(|value| value.trim().to_string()),
            company_name: self.company_name.map(|value| value.trim().to_string()),
            position: text_patch(self.position),
            employment_type: text_patch(self.employment_type),
            location: text_patch(self.location),
            responsibilities: text_patch(self.responsibilities),
            requirements: text_patch(self.requirements),
            preferred: text_patch(self.preferred),
            benefits: text_patch(self.benefits),
            salary: text_patch(self.salary),
            source: text_patch(self.source),
            url: text_patch(self.url),
            due_date,
            memo: text_patch(self.memo),
        })
    }
}

/// Validated patch for the service layer.
#[derive(Debug, Clone, Default)]
pub struct JobPostingChanges {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub position: Patch<String>,
    pub employment_type: Patch<String>,
    pub location: Patch<String>,
    pub responsibilities: Patch<String>,
    pub requirements: Patch<String>,
    pub preferred: Patch<String>,
    pub benefits: Patch<String>,
    pub salary: Patch<String>,
    pub source: Patch<String>,
    pub url: Patch<String>,
    pub due_date: Patch<NaiveDate>,
    pub memo: Patch<String>,
}

// A set-but-blank text field behaves like an explicit clear.
fn text_patch(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Set(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                Patch::Clear
            } else {
                Patch::Set(trimmed)
            }
        }
        other => other,
    }
}
