use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id in the session. Results in 401 Unauthorized.
    #[error("No authenticated user in session")]
    NotLoggedIn,

    /// The session references a user that no longer exists.
    ///
    /// Happens when a user row is deleted or the session id was rotated by a
    /// password reset. Results in 401 Unauthorized.
    #[error("Session user {0} not found in database")]
    UserGone(i32),

    /// Username/password pair did not match. Results in 401 Unauthorized with
    /// a message that does not reveal which half was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The user lacks a required role for the endpoint. Results in 403 Forbidden.
    #[error("User {user_id} denied: {reason}")]
    AccessDenied { user_id: i32, reason: String },

    /// Endpoint requires a linked Minecraft account. Results in 403 Forbidden.
    #[error("User {0} has no linked Minecraft account")]
    MinecraftNotLinked(i32),

    /// Endpoint requires a linked Discord account. Results in 403 Forbidden.
    #[error("User {0} has no linked Discord account")]
    DiscordNotLinked(i32),

    /// Endpoint requires a whitelisted account. Results in 403 Forbidden.
    #[error("User {0} is not whitelisted")]
    NotWhitelisted(i32),

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// OAuth authorization code could not be exchanged for a token.
    #[error("OAuth token exchange failed: {0}")]
    TokenExchangeFailed(String),

    /// Password reset token was malformed, expired, or referenced no user.
    #[error("Invalid or expired password reset token")]
    InvalidResetToken,

    /// Integration request carried no Authorization header. Results in 401.
    #[error("Authorization header is missing")]
    MissingApiKey,

    /// Integration request carried the wrong key, or no key is configured.
    #[error("Invalid authorization key")]
    InvalidApiKey,
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages stay generic; the full error is logged at debug
/// level for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match &self {
            Self::NotLoggedIn | Self::UserGone(_) => (
                StatusCode::UNAUTHORIZED,
                "You need to be logged in to access this.".to_string(),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Either username or password incorrect".to_string(),
            ),
            Self::AccessDenied { .. } => (
                StatusCode::FORBIDDEN,
                "You do not have permission to access this.".to_string(),
            ),
            Self::MinecraftNotLinked(_) => (
                StatusCode::FORBIDDEN,
                "You'll need to link your Minecraft account first.".to_string(),
            ),
            Self::DiscordNotLinked(_) => (
                StatusCode::FORBIDDEN,
                "You'll need to link your Discord account first.".to_string(),
            ),
            Self::NotWhitelisted(_) => (
                StatusCode::FORBIDDEN,
                "You must be whitelisted to access this.".to_string(),
            ),
            Self::CsrfValidationFailed | Self::TokenExchangeFailed(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.".to_string(),
            ),
            Self::InvalidResetToken => (
                StatusCode::BAD_REQUEST,
                "Invalid or expired token".to_string(),
            ),
            Self::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "Authorization header is missing.".to_string(),
            ),
            Self::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "Invalid authorization key.".to_string(),
            ),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
