use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;

use super::domain::{JobPostingChanges, JobPostingRecord, JobPostingRow, NewJobPosting};
use super::repository::JobPostingRepository;
use crate::ident;
use crate::store::RepositoryError;

/// Owner-scoped persistence operations for job postings.
pub struct JobPostingService<R> {
    repository: Arc<R>,
}

impl<R> JobPostingService<R>
where
    R: JobPostingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create(
        &self,
        user_id: &str,
        input: NewJobPosting,
    ) -> Result<JobPostingRow, RepositoryError> {
        let now = Utc::now();
        let record = JobPostingRecord {
            id: ident::generate(),
            user_id: user_id.to_string(),
            title: input.title,
            company_name: input.company_name,
            position: input.position,
            employment_type: input.employment_type,
            location: input.location,
            responsibilities: input.responsibilities,
            requirements: input.requirements,
            preferred: input.preferred,
            benefits: input.benefits,
            salary: input.salary,
            source: input.source,
            url: input.url,
            due_date: input.due_date,
            memo: input.memo,
            created_at: now,
            updated_at: now,
        };
        let stored = self.repository.insert(record)?;
        Ok(stored.to_row())
    }

    /// Rows owned by `user_id`, soonest due date first, undated postings last,
    /// newest first within a tie.
    pub fn list(&self, user_id: &str) -> Result<Vec<JobPostingRow>, RepositoryError> {
        let mut records = self.repository.list_for_user(user_id)?;
        records.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(left), Some(right)) => left
                .cmp(&right)
                .then_with(|| b.created_at.cmp(&a.created_at)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        });
        Ok(records.iter().map(JobPostingRecord::to_row).collect())
    }

    /// Unauthenticated detail lookup backing the shareable posting page.
    pub fn get_public(&self, id: &str) -> Result<JobPostingRow, RepositoryError> {
        if !ident::is_well_formed(id) {
            return Err(RepositoryError::NotFound);
        }
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record.to_row())
    }

    pub fn update(
        &self,
        user_id: &str,
        id: &str,
        changes: JobPostingChanges,
    ) -> Result<JobPostingRow, RepositoryError> {
        let mut record = self.owned(user_id, id)?;

        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(company_name) = changes.company_name {
            record.company_name = company_name;
        }
        changes.position.apply_to(&mut record.position);
        changes.employment_type.apply_to(&mut record.employment_type);
        changes.location.apply_to(&mut record.location);
        changes
            .responsibilities
            .apply_to(&mut record.responsibilities);
        changes.requirements.apply_to(&mut record.requirements);
        changes.preferred.apply_to(&mut record.preferred);
        changes.benefits.apply_to(&mut record.benefits);
        changes.salary.apply_to(&mut record.salary);
        changes.source.apply_to(&mut record.source);
        changes.url.apply_to(&mut record.url);
        changes.due_date.apply_to(&mut record.due_date);
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

    // Malformed ids, missing rows, and rows owned by someone else are all the
    // same NotFound so foreign data cannot be probed.
    fn owned(&self, user_id: &str, id: &str) -> Result<JobPostingRecord, RepositoryError> {
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
