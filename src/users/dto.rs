use serde::{Deserialize, Serialize};

use crate::auth::services::is_valid_email;
use crate::error::ApiError;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Request body for credential sign-up. Fields are optional at the wire so
/// a missing field surfaces as our validation error, not a decode rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub password: Option<String>,
}

/// Sign-up payload after validation, email already normalized.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        let email = normalize_email(self.email.as_deref().unwrap_or(""));
        let password = self.password.unwrap_or_default();
        let age = match self.age {
            Some(age) => age,
            None => return Err(ApiError::Validation("All fields are required.".into())),
        };
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("All fields are required.".into()));
        }

        if name.chars().count() < MIN_USERNAME_LEN {
            return Err(ApiError::Validation(
                "User name must be at least 3 characters long".into(),
            ));
        }
        if !is_valid_email(&email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
        if age < 0 {
            return Err(ApiError::Validation("Age cannot be negative".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(
                "Password must be at least 6 characters long".into(),
            ));
        }

        Ok(NewUser {
            name,
            email,
            age,
            password,
        })
    }
}

/// Request body for credential login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
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

/// Request body for account completion after a first OAuth sign-in:
/// sets the password and age on the record matching `name`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompleteAccountRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
}

impl CompleteAccountRequest {
    pub fn validate(self) -> Result<(String, String, i32), ApiError> {
        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        let password = self.password.unwrap_or_default();
        let age = match self.age {
            Some(age) => age,
            None => return Err(ApiError::Validation("All fields are required.".into())),
        };
        if name.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("All fields are required.".into()));
        }
        if age < 0 {
            return Err(ApiError::Validation("Age cannot be negative".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(
                "Password must be at least 6 characters long".into(),
            ));
        }
        Ok((name, password, age))
    }
}

/// Request body for the OAuth profile bridge. `image` is accepted for
/// wire compatibility but never persisted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GoogleSignInRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl GoogleSignInRequest {
    pub fn validate(self) -> Result<(String, String), ApiError> {
        let email = normalize_email(self.email.as_deref().unwrap_or(""));
        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        if email.is_empty() || name.is_empty() {
            return Err(ApiError::Validation("Email and name are required".into()));
        }
        Ok((email, name))
    }
}

/// Public part of the user echoed back by account endpoints.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub email: String,
    pub name: String,
}

/// Envelope shared by all account endpoints.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_sign_up() -> SignUpRequest {
        SignUpRequest {
            name: Some("Ann".into()),
            email: Some("ANN@X.com".into()),
            age: Some(30),
            password: Some("secret1".into()),
        }
    }

    #[test]
    fn sign_up_normalizes_email() {
        let new_user = full_sign_up().validate().expect("valid payload");
        assert_eq!(new_user.email, "ann@x.com");
        assert_eq!(new_user.name, "Ann");
    }

    #[test]
    fn sign_up_rejects_missing_fields() {
        for request in [
            SignUpRequest { name: None, ..full_sign_up() },
            SignUpRequest { email: None, ..full_sign_up() },
            SignUpRequest { age: None, ..full_sign_up() },
            SignUpRequest { password: None, ..full_sign_up() },
            SignUpRequest { email: Some("   ".into()), ..full_sign_up() },
        ] {
            let err = request.validate().unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "got {err:?}");
        }
    }

    #[test]
    fn sign_up_rejects_short_name_and_password() {
        let err = SignUpRequest { name: Some("ab".into()), ..full_sign_up() }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("at least 3"));

        let err = SignUpRequest { password: Some("12345".into()), ..full_sign_up() }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("at least 6"));
    }

    #[test]
    fn sign_up_rejects_negative_age_and_bad_email() {
        let err = SignUpRequest { age: Some(-1), ..full_sign_up() }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("negative"));

        let err = SignUpRequest { email: Some("not-an-email".into()), ..full_sign_up() }
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn login_requires_both_fields() {
        let err = LoginRequest { email: Some("ann@x.com".into()), password: None }
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Email and password are required");

        let (email, password) = LoginRequest {
            email: Some(" ANN@X.com ".into()),
            password: Some("secret1".into()),
        }
        .validate()
        .expect("valid payload");
        assert_eq!(email, "ann@x.com");
        assert_eq!(password, "secret1");
    }

    #[test]
    fn account_response_drops_empty_fields() {
        let response = AccountResponse {
            success: true,
            message: Some("Login successful".into()),
            user: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Login successful"));
        assert!(!json.contains("user"));
    }
}
