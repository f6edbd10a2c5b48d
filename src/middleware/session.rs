//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying tower-sessions `Session` but
//! exposes only the keys relevant to its concern, keeping session key
//! strings in one place.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;

// Session key constants
const SESSION_AUTH_SESSION_ID: &str = "auth:session_id";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
///
/// Stores the user's rotating session UUID, not the row id. Resolving the
/// UUID back to a user happens in `AuthGuard`.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Establishes a logged-in session for the user.
    pub async fn log_in(&self, session_id: Uuid) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_SESSION_ID, session_id.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the session UUID of the logged-in user, if any.
    pub async fn get_session_id(&self) -> Result<Option<Uuid>, AppError> {
        let Some(raw) = self
            .session
            .get::<String>(SESSION_AUTH_SESSION_ID)
            .await?
        else {
            return Ok(None);
        };

        // A malformed value means the cookie store was tampered with; treat
        // it as logged out rather than erroring.
        Ok(Uuid::parse_str(&raw).ok())
    }

    /// Clears all data from the session. Used during logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management for the OAuth flow.
///
/// Tokens are stored during login initiation and validated (once) during
/// the OAuth callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token from the session.
    ///
    /// The token is removed so each one can only be validated once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
