use std::sync::Arc;

use chrono::Utc;

use super::domain::{ApplicationChanges, ApplicationRecord, ApplicationRow, NewApplication};
use super::repository::ApplicationRepository;
use crate::ident;
use crate::store::RepositoryError;

/// Owner-scoped persistence operations for applications.
///
/// `job_posting_id` is stored as an opaque reference without an existence
/// check; deleting a posting leaves its applications in place, so readers must
/// tolerate a dangling id.
pub struct ApplicationService<R> {
    repository: Arc<R>,
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create(
        &self,
        user_id: &str,
        input: NewApplication,
    ) -> Result<ApplicationRow, RepositoryError> {
        let now = Utc::now();
        let record = ApplicationRecord {
            id: ident::generate(),
            user_id: user_id.to_string(),
            job_posting_id: input.job_posting_id,
            status: input.status,
            applied_at: input.applied_at,
            memo: input.memo,
            created_at: now,
            updated_at: now,
        };
        let stored = self.repository.insert(record)?;
        Ok(stored.to_row())
    }

    /// Rows owned by `user_id`, newest first.
    pub fn list(&self, user_id: &str) -> Result<Vec<ApplicationRow>, RepositoryError> {
        let mut records = self.repository.list_for_user(user_id)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records.iter().map(ApplicationRecord::to_row).collect())
    }

    pub fn get(&self, user_id: &str, id: &str) -> Result<ApplicationRow, RepositoryError> {
        Ok(self.owned(user_id, id)?.to_row())
    }

    pub fn update(
        &self,
        user_id: &str,
        id: &str,
        changes: ApplicationChanges,
    ) -> Result<ApplicationRow, RepositoryError> {
        let mut record = self.owned(user_id, id)?;

        if let Some(status) = changes.status {
            record.status = status;
        }
        changes.applied_at.apply_to(&mut record.applied_at);
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

    fn owned(&self, user_id: &str, id: &str) -> Result<ApplicationRecord, RepositoryError> {
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
