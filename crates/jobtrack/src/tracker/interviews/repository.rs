use super::domain::InterviewRecord;
use crate::store::RepositoryError;

/// Storage abstraction for interviews.
pub trait InterviewRepository: Send + Sync {
    fn insert(&self, record: InterviewRecord) -> Result<InterviewRecord, RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<InterviewRecord>, RepositoryError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<InterviewRecord>, RepositoryError>;
    fn update(&self, record: InterviewRecord) -> Result<(), RepositoryError>;
    fn remove(&self, id: &str) -> Result<bool, RepositoryError>;
}
