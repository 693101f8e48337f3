use axum::{
    extract::{FromRef, Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, AuthorizeRequest, PublicUser, SessionResponse},
        oauth,
        services::{verify_password, JwtKeys, SessionUser},
    },
    error::ApiError,
    state::AppState,
    users::repo_types::User,
};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(authorize))
        .route("/auth/session", get(session))
}

pub fn oauth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/google", get(google_redirect))
        .route("/auth/google/callback", get(google_callback))
}

fn invalid_credentials() -> ApiError {
    // Same message for unknown email and wrong password.
    ApiError::Unauthorized("Invalid email or password".into())
}

/// Credentials authorize step: validates the stored hash and mints the
/// session token carrying `{id, email, name}`.
#[instrument(skip(state, payload))]
pub async fn authorize(
    State(state): State<AppState>,
    Json(payload): Json<AuthorizeRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = payload.validate()?;

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "authorize unknown email");
            return Err(invalid_credentials());
        }
    };

    let hash = match user.password_hash.as_deref() {
        Some(h) => h,
        None => {
            warn!(user_id = %user.id, "authorize account has no password set");
            return Err(invalid_credentials());
        }
    };

    if !verify_password(&password, hash)? {
        warn!(user_id = %user.id, "authorize invalid password");
        return Err(invalid_credentials());
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(user.id, &user.email, &user.username)?;

    info!(user_id = %user.id, email = %user.email, "session issued");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            name: user.username,
        },
    }))
}

/// Session view: mirrors the verified token claims back to the holder.
#[instrument(skip_all)]
pub async fn session(session: SessionUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: PublicUser {
            id: session.id,
            email: session.email,
            name: session.name,
        },
        expires: session.expires_at,
    })
}

/// Entry point of the OAuth path: redirect to the provider's consent page.
#[instrument(skip(state))]
pub async fn google_redirect(State(state): State<AppState>) -> Redirect {
    let url = oauth::authorize_url(&state.config.google, &oauth::random_state());
    Redirect::temporary(&url)
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// OAuth callback: code -> tokens -> profile, then bind the profile to a
/// local record and mint the same session token as the credentials path.
#[instrument(skip(state, query))]
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<AuthResponse>, ApiError> {
    if let Some(err) = query.error {
        warn!(error = %err, "google sign-in denied by provider");
        return Err(ApiError::Unauthorized(
            "Google sign-in was cancelled or denied".into(),
        ));
    }
    let code = query
        .code
        .ok_or_else(|| ApiError::Validation("Missing authorization code".into()))?;

    let tokens = oauth::exchange_code(&state.http, &state.config.google, &code)
        .await
        .map_err(|e| {
            error!(error = %e, "google code exchange failed");
            ApiError::Unauthorized("Failed to authorize user".into())
        })?;

    let profile = oauth::fetch_profile(&state.http, &tokens.access_token)
        .await
        .map_err(|e| {
            error!(error = %e, "google profile fetch failed");
            ApiError::Unauthorized("Failed to authorize user".into())
        })?;

    let user = oauth::bind_profile(&state.db, &profile.email, &profile.name).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(user.id, &user.email, &user.username)?;

    info!(user_id = %user.id, email = %user.email, "session issued via google");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            name: user.username,
        },
    }))
}
