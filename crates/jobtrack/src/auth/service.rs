use std::sync::Arc;

use super::domain::{LoginRequest, SignupRequest, UserProfile, UserRecord};
use super::repository::UserRepository;
use super::session::SessionManager;
use crate::error::AppError;
use crate::ident;
use crate::store::RepositoryError;
use chrono::Utc;

/// Signup and login on top of a user repository and the session store.
pub struct AuthService<U> {
    users: Arc<U>,
    sessions: Arc<SessionManager>,
}

impl<U> AuthService<U>
where
    U: UserRepository + 'static,
{
    pub fn new(users: Arc<U>, sessions: Arc<SessionManager>) -> Self {
        Self { users, sessions }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Register a new account. The email must be unused; the password is
    /// stored as a bcrypt hash.
    pub fn signup(&self, request: SignupRequest) -> Result<UserProfile, AuthServiceError> {
        if self.users.fetch_by_email(&request.email)?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
        let record = UserRecord {
            id: ident::generate(),
            name: request.name,
            email: request.email,
            password_hash,
            created_at: Utc::now(),
        };

        let stored = self.users.insert(record)?;
        Ok(stored.profile())
    }

    /// Verify credentials and open a session; an unknown email and a wrong
    /// password are indistinguishable to the caller.
    pub fn login(&self, request: LoginRequest) -> Result<(UserProfile, String), AuthServiceError> {
        let user = self
            .users
            .fetch_by_email(&request.email)?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !bcrypt::verify(&request.password, &user.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.sessions.issue(user.session_user());
        Ok((user.profile(), token))
    }

    pub fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token)
    }
}

/// Error raised by the auth service.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl From<AuthServiceError> for AppError {
    fn from(value: AuthServiceError) -> Self {
        match value {
            AuthServiceError::EmailTaken => AppError::DuplicateEmail,
            AuthServiceError::InvalidCredentials => AppError::InvalidCredentials,
            AuthServiceError::Repository(err) => AppError::from(err),
            AuthServiceError::Hash(err) => AppError::Hash(err),
        }
    }
}
