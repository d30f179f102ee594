//! Token issuance/verification and the credential collaborators used by login.

pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{Claims, VerifiedIdentity};
pub use jwt::{TokenError, TokenService};
pub use password::{Argon2Hasher, PasswordHasher};
