use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::dto::normalize_email;

/// Request body for the credentials authorize step.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorizeRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AuthorizeRequest {
    pub fn validate(self) -> Result<(String, String), ApiError> {
        let email = normalize_email(self.email.as_deref().unwrap_or(""));
        let password = self.password.unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ));
        }
        Ok((email, password))
    }
}

/// Public identity bound to a session.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Response returned after a successful authorize or OAuth callback.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
}

/// Session view mirrored from a verified token.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: PublicUser,
    #[serde(with = "time::serde::rfc3339")]
    pub expires: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_requires_both_fields() {
        let err = AuthorizeRequest {
            email: Some("ann@x.com".into()),
            password: None,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn session_response_serializes_rfc3339_expiry() {
        let response = SessionResponse {
            user: PublicUser {
                id: Uuid::new_v4(),
                email: "ann@x.com".into(),
                name: "Ann".into(),
            },
            expires: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("1970-01-01T00:00:00Z"));
    }
}
