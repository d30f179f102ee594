//! Token claims and the identity they assert once verified.

use serde::{Deserialize, Serialize};

/// Claims carried in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user's email
    #[serde(rename = "sub")]
    pub email: String,
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Issued-at (seconds since epoch)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry (seconds since epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// Identity attached to a request by the `Authz` middleware.
///
/// Only constructible from verified [`Claims`]; handlers read it through
/// the `FromRequest` extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    email: String,
}

impl VerifiedIdentity {
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl From<Claims> for VerifiedIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}
