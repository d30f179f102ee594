use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Default issuer name stamped into every token.
pub const DEFAULT_ISSUER: &str = "AuthService";

/// Default lifetime of an issued token.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest lifetime a context accepts.
pub const MAX_EXPIRATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningContextError {
    #[error("signing secret must not be empty")]
    EmptySecret,
    #[error("issuer must not be empty")]
    EmptyIssuer,
    #[error("expiration window must be at least one second")]
    ZeroExpiration,
    #[error("expiration window must not exceed {} seconds", MAX_EXPIRATION.as_secs())]
    ExpirationTooLarge,
    #[error("algorithm {0:?} is not a supported HMAC algorithm")]
    UnsupportedAlgorithm(Algorithm),
}

/// Shared secret, issuer and expiration policy used to issue and verify tokens.
///
/// Built once at startup and handed to [`crate::auth::jwt::TokenService`].
/// The same context must be used on both sides or verification fails.
#[derive(Clone)]
pub struct SigningContext {
    secret: Vec<u8>,
    issuer: String,
    expiration: Duration,
    algorithm: Algorithm,
}

impl SigningContext {
    /// Create a context pinned to HS256.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        expiration: Duration,
    ) -> Result<Self, SigningContextError> {
        let secret = secret.into();
        let issuer = issuer.into();

        if secret.is_empty() {
            return Err(SigningContextError::EmptySecret);
        }
        if issuer.trim().is_empty() {
            return Err(SigningContextError::EmptyIssuer);
        }
        // Whole seconds only: exp and iat are encoded as epoch seconds.
        if expiration.as_secs() == 0 {
            return Err(SigningContextError::ZeroExpiration);
        }
        if expiration > MAX_EXPIRATION {
            return Err(SigningContextError::ExpirationTooLarge);
        }

        Ok(Self {
            secret,
            issuer,
            expiration,
            algorithm: Algorithm::HS256,
        })
    }

    /// Pin a different HMAC algorithm. Asymmetric algorithms are rejected.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Result<Self, SigningContextError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                self.algorithm = algorithm;
                Ok(self)
            }
            other => Err(SigningContextError::UnsupportedAlgorithm(other)),
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningContext")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("expiration", &self.expiration)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
