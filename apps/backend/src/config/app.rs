//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::signing_context::{SigningContext, DEFAULT_ISSUER};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8089;
pub const DEFAULT_EXPIRATION_HOURS: u64 = 24;

/// Server and signing configuration for the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub signing: SigningContext,
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!(
                    "BACKEND_PORT must be a valid port number, got '{raw}'"
                ))
            })?,
            None => DEFAULT_PORT,
        };

        let secret = lookup("BACKEND_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;

        let issuer = lookup("BACKEND_JWT_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        let hours = match lookup("BACKEND_JWT_EXPIRATION_HOURS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(h) if h > 0 => h,
                _ => {
                    return Err(AppError::config(format!(
                        "BACKEND_JWT_EXPIRATION_HOURS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_EXPIRATION_HOURS,
        };

        let window = hours.checked_mul(3600).map(Duration::from_secs).ok_or_else(|| {
            AppError::config(format!("BACKEND_JWT_EXPIRATION_HOURS is too large, got '{hours}'"))
        })?;

        let signing = SigningContext::new(secret, issuer, window)?;

        Ok(Self {
            host,
            port,
            signing,
        })
    }
}
