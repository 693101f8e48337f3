use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload asserting an authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub email: String, // bound identity email
    pub name: String,  // bound display name
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp), absolute, no renewal
    pub iss: String,   // issuer
    pub aud: String,   // audience
}
