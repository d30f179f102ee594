//! User storage collaborator.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::errors::domain::{ConflictKind, DomainError};

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: SystemTime,
}

/// Input for [`UserStore::create_user`]; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Create-by-email and find-by-email over some persistent user table.
///
/// Emails are compared after [`normalize_email`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict(UniqueEmail)` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}

/// Trim and lowercase an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Process-local store keyed by normalized email.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    by_email: DashMap<String, User>,
    last_id: AtomicI64,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        let email = normalize_email(&user.email);

        match self.by_email.entry(email.clone()) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "A user with this email already exists",
            )),
            Entry::Vacant(slot) => {
                let created = User {
                    id: self.last_id.fetch_add(1, Ordering::Relaxed) + 1,
                    name: user.name,
                    email,
                    password_hash: user.password_hash,
                    created_at: SystemTime::now(),
                };
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .by_email
            .get(&normalize_email(email))
            .map(|entry| entry.value().clone()))
    }
}
