//! Error codes for the auth backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization header
    /// No Authorization header on a protected request
    MissingAuthorization,
    /// Authorization header is not `<scheme> <token>`
    InvalidAuthorizationHeader,

    // Token verification
    /// Token could not be parsed
    InvalidToken,
    /// Token signature does not match
    InvalidTokenSignature,
    /// Token declares an algorithm other than the pinned one
    UnsupportedTokenAlgorithm,
    /// Token was issued by someone else
    InvalidTokenIssuer,
    /// Token is past its expiry
    TokenExpired,
    /// Token could not be signed
    TokenSigningFailed,

    // Login
    /// Email/password pair does not match
    InvalidCredentials,

    // Request Validation
    ValidationError,
    BadRequest,
    /// Request body exceeds the accepted size
    PayloadTooLarge,

    // Resource Not Found
    UserNotFound,
    NotFound,

    // Conflicts
    UniqueEmail,
    Conflict,

    // System Errors
    StoreUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingAuthorization => "MISSING_AUTHORIZATION",
            Self::InvalidAuthorizationHeader => "INVALID_AUTHORIZATION_HEADER",

            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidTokenSignature => "INVALID_TOKEN_SIGNATURE",
            Self::UnsupportedTokenAlgorithm => "UNSUPPORTED_TOKEN_ALGORITHM",
            Self::InvalidTokenIssuer => "INVALID_TOKEN_ISSUER",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenSigningFailed => "TOKEN_SIGNING_FAILED",

            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
