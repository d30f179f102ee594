use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::state::signing_context::SigningContext;

/// Failures produced while issuing or verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    MalformedToken,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,
    #[error("token issuer mismatch")]
    IssuerMismatch,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies HMAC-signed JWTs for a single issuer.
///
/// Keys and validation rules are derived once from the [`SigningContext`];
/// the service holds no mutable state and is shared freely across workers.
#[derive(Clone)]
pub struct TokenService {
    context: SigningContext,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(context: SigningContext) -> Self {
        let mut validation = Validation::new(context.algorithm());
        validation.leeway = 0;
        validation.set_issuer(&[context.issuer()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(context.secret()),
            decoding_key: DecodingKey::from_secret(context.secret()),
            validation,
            context,
        }
    }

    pub fn context(&self) -> &SigningContext {
        &self.context
    }

    /// Mint a token for `email` issued now.
    pub fn generate(&self, email: &str) -> Result<String, TokenError> {
        self.generate_at(email, SystemTime::now())
    }

    /// Mint a token for `email` as if issued at `now`.
    pub fn generate_at(&self, email: &str, now: SystemTime) -> Result<String, TokenError> {
        let issued_at = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Signing("issue time predates the unix epoch".to_string()))?
            .as_secs();
        let issued_at = i64::try_from(issued_at)
            .map_err(|_| TokenError::Signing("issue time out of range".to_string()))?;
        let expires_at = i64::try_from(self.context.expiration().as_secs())
            .ok()
            .and_then(|window| issued_at.checked_add(window))
            .ok_or_else(|| TokenError::Signing("expiry time out of range".to_string()))?;

        let claims = Claims {
            email: email.to_string(),
            issuer: self.context.issuer().to_string(),
            issued_at,
            expires_at,
        };

        encode(
            &Header::new(self.context.algorithm()),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a compact token and return its claims.
    ///
    /// The header must declare exactly the pinned algorithm. Signature
    /// comparison is delegated to the HMAC `verify` of the crypto backend,
    /// which is constant-time. A token is expired once `now >= exp`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.check_header(token)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))?;

        if unix_now() >= claims.expires_at {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn check_header(&self, token: &str) -> Result<(), TokenError> {
        let mut segments = token.split('.');
        let (header, payload, signature) = match (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) {
            (Some(header), Some(payload), Some(signature), None) => (header, payload, signature),
            _ => return Err(TokenError::MalformedToken),
        };

        let decode_segment = |segment: &str| {
            URL_SAFE_NO_PAD
                .decode(segment)
                .map_err(|_| TokenError::MalformedToken)
        };
        let raw = decode_segment(header)?;
        decode_segment(payload)?;
        decode_segment(signature)?;

        let header: Value = serde_json::from_slice(&raw).map_err(|_| TokenError::MalformedToken)?;
        let header = header.as_object().ok_or(TokenError::MalformedToken)?;

        let declared = header
            .get("alg")
            .and_then(Value::as_str)
            .and_then(|alg| alg.parse::<Algorithm>().ok());

        match declared {
            Some(alg) if alg == self.context.algorithm() => Ok(()),
            _ => Err(TokenError::UnsupportedAlgorithm),
        }
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
        ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm,
        _ => TokenError::MalformedToken,
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
