use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::services::{hash_password, verify_password},
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            AccountResponse, CompleteAccountRequest, GoogleSignInRequest, LoginRequest,
            SignUpRequest, UserSummary,
        },
        repo_types::User,
    },
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signIn", post(sign_up))
        .route("/user/login", post(login))
        .route("/user/createNewAccount", post(complete_account))
        .route("/user/googleSignIn", post(google_sign_in))
}

/// Credential sign-up: one new record, hash never echoed back.
#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let new_user = payload.validate()?;

    let hash = hash_password(&new_user.password)?;
    let created = User::create_if_absent(
        &state.db,
        &new_user.name,
        &new_user.email,
        &hash,
        new_user.age,
    )
    .await?;

    let user = match created {
        Some(u) => u,
        None => {
            warn!(email = %new_user.email, "sign-up email already in use");
            return Err(ApiError::Conflict("This email is already in use.".into()));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            success: true,
            message: Some("Sign up successful.".into()),
            user: Some(UserSummary {
                email: user.email,
                name: user.username,
            }),
        }),
    ))
}

/// Credential check only; session issuance is the authorize step.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let (email, password) = payload.validate()?;

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::Unauthorized("Invalid email or password".into()));
        }
    };

    let valid = match user.password_hash.as_deref() {
        Some(hash) => verify_password(&password, hash)?,
        None => {
            warn!(user_id = %user.id, "login against account with no password set");
            false
        }
    };
    if !valid {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AccountResponse {
        success: true,
        message: Some("Login successful".into()),
        user: None,
    }))
}

/// Account completion after a first OAuth sign-in: sets password and age
/// on the record matching the submitted name. A zero-row update is an
/// error, never a success.
#[instrument(skip(state, payload))]
pub async fn complete_account(
    State(state): State<AppState>,
    Json(payload): Json<CompleteAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let (name, password, age) = payload.validate()?;

    let hash = hash_password(&password)?;
    let updated = User::set_password_and_age(&state.db, &name, &hash, age).await?;

    let user = match updated {
        Some(u) => u,
        None => {
            warn!(name = %name, "account completion for unknown username");
            return Err(ApiError::NotFound("No user found with that name".into()));
        }
    };

    info!(user_id = %user.id, "account completed");
    Ok(Json(AccountResponse {
        success: true,
        message: Some("Success Create User Password And Age".into()),
        user: Some(UserSummary {
            email: user.email,
            name: user.username,
        }),
    }))
}

/// OAuth profile bridge: create-if-absent, success regardless of
/// created-vs-existing.
#[instrument(skip(state, payload))]
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<GoogleSignInRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let (email, name) = payload.validate()?;

    if let Some(user) = User::create_from_oauth(&state.db, &name, &email).await? {
        info!(user_id = %user.id, email = %user.email, "user created from oauth profile");
        return Ok(Json(AccountResponse {
            success: true,
            message: Some("Success Create New User By OAuth".into()),
            user: None,
        }));
    }

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!("oauth account missing after insert conflict"))
        })?;

    Ok(Json(AccountResponse {
        success: true,
        message: None,
        user: Some(UserSummary {
            email: user.email,
            name: user.username,
        }),
    }))
}
