use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;

use super::domain::{InterviewChanges, InterviewRecord, InterviewRow, NewInterview};
use super::repository::InterviewRepository;
use crate::ident;
use crate::store::RepositoryError;

/// Owner-scoped persistence operations for interviews.
///
/// The referenced posting and application ids are format-checked during
/// validation but not existence-checked here.
pub struct InterviewService<R> {
    repository: Arc<R>,
}

impl<R> InterviewService<R>
where
    R: InterviewRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create(
        &self,
        user_id: &str,
        input: NewInterview,
    ) -> Result<InterviewRow, RepositoryError> {
        let now = Utc::now();
        let record = InterviewRecord {
            id: ident::generate(),
            user_id: user_id.to_string(),
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
        let stored = self.repository.insert(record)?;
        Ok(stored.to_row())
    }

    /// Rows owned by `user_id`: soonest schedule first, unscheduled rows
    /// after all scheduled ones, newest first within a tie.
    pub fn list(&self, user_id: &str) -> Result<Vec<InterviewRow>, RepositoryError> {
        let mut records = self.repository.list_for_user(user_id)?;
        records.sort_by(|a, b| match (a.scheduled_at, b.scheduled_at) {
            (Some(left), Some(right)) => left
                .cmp(&right)
                .then_with(|| b.created_at.cmp(&a.created_at)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        });
        Ok(records.iter().map(InterviewRecord::to_row).collect())
    }

    pub fn get(&self, user_id: &str, id: &str) -> Result<InterviewRow, RepositoryError> {
        Ok(self.owned(user_id, id)?.to_row())
    }

    pub fn update(
        &self,
        user_id: &str,
        id: &str,
        changes: InterviewChanges,
    ) -> Result<InterviewRow, RepositoryError> {
        let mut record = self.owned(user_id, id)?;

        if let Some(kind) = changes.kind {
            record.kind = kind;
        }
        changes.scheduled_at.apply_to(&mut record.scheduled_at);
        changes.location.apply_to(&mut record.location);
        if let Some(status) = changes.status {
            record.status = status;
        }
        changes.memo.apply_to(&mut record.memo);
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        Ok(record.to_row())
    }

    pub fn delete(&self, user_id: &str, id: &str) -> Result<(), RepositoryError> {
        let record = self.owned(user_id, id)?;
        if !self.repository.remove(&record.id)? {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn owned(&self, user_id: &str, id: &str) -> Result<InterviewRecord, RepositoryError> {
        if !ident::is_well_formed(id) {
            return Err(RepositoryError::NotFound);
        }
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        if record.user_id != user_id {
            return Err(RepositoryError::NotFound);
        }
        Ok(record)
    }
}
