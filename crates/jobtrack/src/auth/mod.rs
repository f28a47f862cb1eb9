//! Signup/login and the cookie-backed session layer.
//!
//! Sessions are server-side: the cookie carries only an opaque random token
//! which the [`session::SessionManager`] resolves to the signed-in user, so a
//! forged cookie value buys nothing. Handlers receive the identity through the
//! explicit [`session::Session`] extractor rather than any ambient global.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

pub use domain::{LoginRequest, SignupRequest, UserProfile, UserRecord};
pub use repository::UserRepository;
pub use router::auth_router;
pub use service::{AuthService, AuthServiceError};
pub use session::{Session, SessionManager, SessionUser};
