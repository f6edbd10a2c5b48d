//! Authentication and account-linking endpoints.

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use std::net::SocketAddr;
use tower_sessions::Session;

use crate::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::{AuthSession, CsrfSession},
    },
    model::{api::MessageDto, settings::WebhookKind},
    service::{
        account::{AccountService, RegisterParam},
        oauth::DiscordAuthService,
        settings::SettingsService,
        token, webhook,
    },
    state::AppState,
};

#[derive(Deserialize)]
pub struct RegisterDto {
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordDto {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordDto {
    pub password: String,
    pub password2: String,
}

#[derive(Deserialize)]
pub struct MinecraftLinkDto {
    pub auth_code: String,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Discord SSO for token exchange.
    pub code: String,
}

/// POST /api/auth/register - Create a new account
///
/// Gated on the registration toggle in settings. Sends the confirmation
/// email and announces the registration (with a hashed IP) on the general
/// webhook.
pub async fn register(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(dto): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    if !settings.can_register {
        return Err(AppError::BadRequest(
            "Registration is currently disabled".to_string(),
        ));
    }

    let account_service = AccountService::new(&state.db);
    let (user, confirmation_token) = account_service
        .register(RegisterParam {
            username: dto.username,
            password: dto.password,
            password_confirm: dto.confirm,
            email: dto.email,
        })
        .await?;

    let confirmation_url = format!(
        "{}/api/auth/confirm_email/{}",
        state.app_url, confirmation_token
    );
    let sent = state
        .mailer
        .send_confirmation_email(&user.email, &confirmation_url)
        .await?;
    if !sent {
        return Err(AppError::BadRequest(
            "Failed to send confirmation email.".to_string(),
        ));
    }

    let ip_hash = token::hash_ip(&addr.ip().to_string());
    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::General).map(String::from),
        webhook::new_user(&user.username, &user.email, &ip_hash),
    );

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Successfully registered.")),
    ))
}

/// POST /api/auth/login - Start a session
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let account_service = AccountService::new(&state.db);
    let user = account_service.login(&dto.username, &dto.password).await?;

    AuthSession::new(&session).log_in(user.session_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// POST /api/auth/logout - End the session
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out"))))
}

/// GET /api/auth/user - Current session user
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// GET /api/auth/confirm_email/{token} - Confirm an email address
pub async fn confirm_email(
    State(state): State<AppState>,
    Path(confirmation_token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AccountService::new(&state.db)
        .confirm_email(&confirmation_token)
        .await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::General).map(String::from),
        webhook::email_confirmed(&user),
    );

    Ok((StatusCode::OK, Json(MessageDto::new("Email confirmed"))))
}

/// POST /api/auth/forgot_password - Start a password reset
///
/// Responds identically whether or not the email exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(dto): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let account_service = AccountService::new(&state.db);

    if let Some((user, reset_token)) = account_service
        .forgot_password(&dto.email, &state.secret_key)
        .await?
    {
        let reset_url = format!("{}/api/auth/reset_password/{}", state.app_url, reset_token);
        state
            .mailer
            .send_password_reset_email(&user.email, &reset_url)
            .await?;
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(
            "If an account exists with that email we'll send an email.",
        )),
    ))
}

/// POST /api/auth/reset_password/{token} - Complete a password reset
pub async fn reset_password(
    State(state): State<AppState>,
    Path(reset_token): Path<String>,
    Json(dto): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AccountService::new(&state.db)
        .reset_password(&reset_token, &state.secret_key, &dto.password, &dto.password2)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password updated"))))
}

/// POST /api/auth/minecraft - Link a Minecraft account from an auth code
pub async fn link_minecraft(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<MinecraftLinkDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let user = AccountService::new(&state.db)
        .link_minecraft(user.id, &dto.auth_code)
        .await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::General).map(String::from),
        webhook::minecraft_linked(&user),
    );

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// GET /api/auth/discord/login - Redirect into the Discord OAuth flow
///
/// Minecraft has to be linked first; the linking order is part of the
/// onboarding funnel.
pub async fn discord_login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::MinecraftLinked])
        .await?;

    let auth_service = DiscordAuthService::new(state.http_client, state.oauth_client);
    let (url, csrf_token) = auth_service.login_url();

    // Store CSRF token in session for verification during callback
    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_ref()))
}

/// GET /api/auth/discord/callback - Finish the Discord OAuth flow
///
/// Validates the CSRF state, exchanges the code, optionally joins the user
/// to the community guild, and stores the Discord id on the account.
pub async fn discord_callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    validate_csrf(&session, &params.0.state).await?;

    let auth_service =
        DiscordAuthService::new(state.http_client.clone(), state.oauth_client.clone());
    let (discord_user, access_token) = auth_service.callback(params.0.code).await?;

    let settings = SettingsService::new(&state.db, &state.settings_cache)
        .get()
        .await?;
    if settings.join_discord_on_register {
        DiscordAuthService::join_guild(
            state.discord_http.clone(),
            state.discord_guild_id,
            discord_user.id,
            access_token,
        )
        .await
        .map_err(|e| {
            tracing::warn!("Failed to join user to guild: {}", e);
            AppError::BadRequest("Error joining Discord guild".to_string())
        })?;
    }

    let user = AccountService::new(&state.db)
        .link_discord(user.id, &discord_user.id.to_string())
        .await?;

    state.webhooks.dispatch(
        settings.webhook_url(WebhookKind::General).map(String::from),
        webhook::discord_linked(&user),
    );

    Ok((StatusCode::OK, Json(user.into_dto())))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    if let Some(stored) = stored_state {
        if stored == csrf_state {
            return Ok(());
        }
    }

    Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
}
