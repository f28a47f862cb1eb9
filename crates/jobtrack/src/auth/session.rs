use crate::error::AppError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex};

const TOKEN_BYTES: usize = 24;

/// Identity resolved from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Server-side session store. Tokens are random 48-hex strings; the cookie
/// never carries user data.
pub struct SessionManager {
    cookie_name: String,
    sessions: Mutex<HashMap<String, SessionUser>>,
}

impl SessionManager {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a session for `user` and return the opaque token.
    pub fn issue(&self, user: SessionUser) -> String {
        let token = random_token();
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.insert(token.clone(), user);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<SessionUser> {
        let sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.get(token).cloned()
    }

    /// Drop the session; returns whether the token was live.
    pub fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.remove(token).is_some()
    }

    pub fn set_cookie(&self, token: &str) -> String {
        format!(
            "{}={token}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name
        )
    }

    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }

    /// Pull our token out of the `Cookie` header(s), if present.
    pub fn token_from(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| raw.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, token)| token.to_string())
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<SessionUser, AppError> {
        let token = self.token_from(headers).ok_or(AppError::Unauthenticated)?;
        self.resolve(&token).ok_or(AppError::Unauthenticated)
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

/// Extractor handing the authenticated user to a handler; rejects with 401
/// when the cookie is missing or the token is unknown.
pub struct Session(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let manager = parts
            .extensions
            .get::<Arc<SessionManager>>()
            .ok_or_else(|| AppError::Server(axum::Error::new("session manager extension missing")))?;
        let user = manager.authenticate(&parts.headers)?;
        Ok(Session(user))
    }
}
