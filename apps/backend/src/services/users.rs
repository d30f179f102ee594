use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::claims::VerifiedIdentity;
use crate::auth::jwt::TokenService;
use crate::auth::password::PasswordHasher;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{NewUser, User, UserStore};

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register a new user with a hashed password.
pub async fn signup(
    users: &dyn UserStore,
    hasher: Arc<dyn PasswordHasher>,
    input: SignupInput,
) -> Result<User, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Name cannot be empty").into());
    }
    let email = input.email.trim();
    if email.is_empty() {
        return Err(DomainError::validation("Email cannot be empty").into());
    }
    if !email.contains('@') {
        return Err(DomainError::validation("Email must contain '@'").into());
    }
    if input.password.is_empty() {
        return Err(DomainError::validation("Password cannot be empty").into());
    }

    let password = input.password;
    let password_hash = run_blocking(move || hasher.hash(&password)).await??;

    let user = users
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "User signed up");
    Ok(user)
}

/// Check an email/password pair and issue a token for the user.
pub async fn login(
    users: &dyn UserStore,
    hasher: Arc<dyn PasswordHasher>,
    tokens: &TokenService,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match users.find_by_email(email).await? {
        Some(user) => user,
        None => {
            security::login_failed("unknown_email", email);
            return Err(DomainError::not_found(NotFoundKind::User, "User not found").into());
        }
    };

    let candidate = password.to_string();
    let hash = user.password_hash.clone();
    let matches = run_blocking(move || hasher.verify(&candidate, &hash)).await?;
    if !matches {
        security::login_failed("password_mismatch", email);
        return Err(DomainError::InvalidCredentials.into());
    }

    let token = tokens.generate(&user.email)?;
    debug!(user_id = user.id, "Issued access token");
    Ok(token)
}

/// Load the user behind a verified identity.
pub async fn profile(users: &dyn UserStore, identity: &VerifiedIdentity) -> Result<User, AppError> {
    users
        .find_by_email(identity.email())
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found").into())
}

/// Argon2 work is CPU-bound; keep it off the async workers.
async fn run_blocking<F, R>(f: F) -> Result<R, DomainError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::infra(InfraErrorKind::Other("blocking".into()), e.to_string()))
}
