use super::domain::JobPostingRecord;
use crate::store::RepositoryError;

/// Storage abstraction for job postings. Ownership is enforced by the service,
/// not here; `fetch` is by id alone so the public detail route can share it.
pub trait JobPostingRepository: Send + Sync {
    fn insert(&self, record: JobPostingRecord) -> Result<JobPostingRecord, RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<JobPostingRecord>, RepositoryError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<JobPostingRecord>, RepositoryError>;
    fn update(&self, record: JobPostingRecord) -> Result<(), RepositoryError>;
    fn remove(&self, id: &str) -> Result<bool, RepositoryError>;
}
