use super::domain::UserRecord;
use crate::store::RepositoryError;

/// Storage abstraction for user accounts. Email uniqueness is enforced here so
/// backends can lean on their native unique index.
pub trait UserRepository: Send + Sync {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;
}
