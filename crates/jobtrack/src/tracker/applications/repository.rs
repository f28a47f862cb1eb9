use super::domain::ApplicationRecord;
use crate::store::RepositoryError;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn list_for_user(&self, user_id: &str) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn remove(&self, id: &str) -> Result<bool, RepositoryError>;
}
