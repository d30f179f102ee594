#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::claims::{Claims, VerifiedIdentity};
pub use auth::jwt::{TokenError, TokenService};
pub use auth::password::{Argon2Hasher, PasswordHasher};
pub use config::AppConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::ValidatedJson;
pub use middleware::authz::{authorize, Authz, AuthzError, SchemePolicy};
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use repos::users::{InMemoryUserStore, UserStore};
pub use state::app_state::AppState;
pub use state::signing_context::SigningContext;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
