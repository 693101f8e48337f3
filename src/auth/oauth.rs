use anyhow::Context;
use rand::{distributions::Alphanumeric, Rng};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;

use crate::config::GoogleConfig;
use crate::users::dto::normalize_email;
use crate::users::repo_types::User;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const SCOPES: &str = "openid email profile";

/// Token response from the Google token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Verified profile delivered by the identity provider.
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Build the Google authorization URL the client is redirected to.
pub fn authorize_url(config: &GoogleConfig, state: &str) -> String {
    format!(
        "{AUTH_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&prompt=consent&access_type=offline",
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(SCOPES),
        urlencoding::encode(state),
    )
}

pub fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Exchange an authorization code for tokens.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &GoogleConfig,
    code: &str,
) -> anyhow::Result<TokenResponse> {
    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("code", code),
            ("client_id", &config.client_id),
            ("client_secret", &config.client_secret),
            ("redirect_uri", &config.redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .context("google token request")?;

    if !response.status().is_success() {
        anyhow::bail!("google token endpoint returned {}", response.status());
    }
    response
        .json::<TokenResponse>()
        .await
        .context("decode google token response")
}

/// Fetch the userinfo profile for an access token.
pub async fn fetch_profile(
    http: &reqwest::Client,
    access_token: &str,
) -> anyhow::Result<GoogleProfile> {
    let response = http
        .get(USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .context("google userinfo request")?;

    if !response.status().is_success() {
        anyhow::bail!("google userinfo endpoint returned {}", response.status());
    }
    response
        .json::<GoogleProfile>()
        .await
        .context("decode google userinfo response")
}

/// Bind a verified external profile to a local user record, creating a
/// minimal one on first sign-in. Succeeds for created and existing alike.
pub async fn bind_profile(db: &PgPool, email: &str, name: &str) -> anyhow::Result<User> {
    let email = normalize_email(email);
    let username = name.trim().to_lowercase();

    if let Some(user) = User::create_from_oauth(db, &username, &email).await? {
        info!(user_id = %user.id, email = %user.email, "user created from oauth profile");
        return Ok(user);
    }
    User::find_by_email(db, &email)
        .await?
        .context("oauth account missing after insert conflict")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GoogleConfig {
        GoogleConfig {
            client_id: "client-123".into(),
            client_secret: "shh".into(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".into(),
        }
    }

    #[test]
    fn authorize_url_encodes_parameters() {
        let url = authorize_url(&config(), "abc123");
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Fgoogle%2Fcallback"
        ));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("state=abc123"));
        assert!(url.contains("response_type=code"));
        assert!(!url.contains("shh"));
    }

    #[test]
    fn random_state_is_url_safe() {
        let state = random_state();
        assert_eq!(state.len(), 32);
        assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(state, random_state());
    }

    #[test]
    fn token_response_deserializes_without_optional_fields() {
        let json = r#"{
            "access_token": "ya29.abc",
            "token_type": "Bearer",
            "expires_in": 3599
        }"#;
        let tokens: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "ya29.abc");
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3599);
        assert!(tokens.refresh_token.is_none());
        assert!(tokens.scope.is_none());
        assert!(tokens.id_token.is_none());
    }

    #[test]
    fn profile_deserializes_userinfo_shape() {
        let json = r#"{
            "id": "1234567890",
            "email": "ann@x.com",
            "verified_email": true,
            "name": "Ann Example",
            "picture": "https://lh3.googleusercontent.com/a/photo"
        }"#;
        let profile: GoogleProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, "ann@x.com");
        assert_eq!(profile.name, "Ann Example");
        assert!(profile.picture.is_some());
    }
}
