use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::auth::password::{Argon2Hasher, PasswordHasher};
use crate::repos::users::{InMemoryUserStore, UserStore};

use super::signing_context::SigningContext;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Token issuance and verification, read-only after startup
    pub tokens: Arc<TokenService>,
    /// User lookup/write collaborator
    pub users: Arc<dyn UserStore>,
    /// Password hashing collaborator
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    /// Create a new AppState from explicit collaborators
    pub fn new(
        tokens: TokenService,
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            tokens: Arc::new(tokens),
            users,
            hasher,
        }
    }

    /// Create an AppState backed by the in-memory user store and Argon2 hashing
    pub fn in_memory(signing: SigningContext) -> Self {
        Self::new(
            TokenService::new(signing),
            Arc::new(InMemoryUserStore::default()),
            Arc::new(Argon2Hasher),
        )
    }
}
