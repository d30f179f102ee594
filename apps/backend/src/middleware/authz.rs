//! Authorization middleware for protected scopes.
//!
//! Reads the `Authorization` header, verifies the bearer token with the
//! [`TokenService`] and either stores a [`VerifiedIdentity`] in request
//! extensions and forwards, or answers with a Problem Details rejection:
//!
//! | condition                          | status |
//! |------------------------------------|--------|
//! | header absent or blank             | 403    |
//! | header is not `<scheme> <token>`   | 400    |
//! | token fails verification           | 401    |
//!
//! A rejected request never reaches the wrapped service.

use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use thiserror::Error;
use tracing::debug;

use crate::auth::claims::VerifiedIdentity;
use crate::auth::jwt::{TokenError, TokenService};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::logging::security;

/// Anything an `Authorization` header can be read from.
pub trait CredentialSource {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;
}

impl CredentialSource for HeaderMap {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.get(name)
    }
}

impl CredentialSource for ServiceRequest {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }
}

impl CredentialSource for HttpRequest {
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }
}

/// How strictly the scheme half of the header is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemePolicy {
    /// Scheme must be `Bearer` (ASCII case-insensitive).
    #[default]
    Bearer,
    /// Any scheme word is accepted; only the two-part shape is enforced.
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("no authorization header provided")]
    MissingCredential,
    #[error("invalid authorization header format")]
    MalformedCredential,
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Decide whether a request carries a valid credential.
pub fn authorize<R>(
    source: &R,
    tokens: &TokenService,
    policy: SchemePolicy,
) -> Result<VerifiedIdentity, AuthzError>
where
    R: CredentialSource + ?Sized,
{
    let value = source
        .header(&header::AUTHORIZATION)
        .ok_or(AuthzError::MissingCredential)?;

    if value.as_bytes().iter().all(u8::is_ascii_whitespace) {
        return Err(AuthzError::MissingCredential);
    }

    let raw = value
        .to_str()
        .map_err(|_| AuthzError::MalformedCredential)?;
    let credential = split_credential(raw, policy)?;

    let claims = tokens.verify(credential)?;
    Ok(VerifiedIdentity::from(claims))
}

fn split_credential(raw: &str, policy: SchemePolicy) -> Result<&str, AuthzError> {
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => match policy {
            SchemePolicy::Bearer if !scheme.eq_ignore_ascii_case("Bearer") => {
                Err(AuthzError::MalformedCredential)
            }
            _ => Ok(token),
        },
        _ => Err(AuthzError::MalformedCredential),
    }
}

/// Middleware factory; wrap a protected `web::scope` with it.
#[derive(Clone)]
pub struct Authz {
    tokens: Arc<TokenService>,
    policy: SchemePolicy,
}

impl Authz {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self {
            tokens,
            policy: SchemePolicy::default(),
        }
    }

    pub fn with_scheme_policy(mut self, policy: SchemePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authz
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthzMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthzMiddleware {
            service,
            tokens: Arc::clone(&self.tokens),
            policy: self.policy,
        }))
    }
}

pub struct AuthzMiddleware<S> {
    service: S,
    tokens: Arc<TokenService>,
    policy: SchemePolicy,
}

impl<S, B> Service<ServiceRequest> for AuthzMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req, &self.tokens, self.policy) {
            Ok(identity) => {
                let email = identity.email().to_string();
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    debug!(email = %Redacted(&email), "Request authorized");
                    fut.await.map(ServiceResponse::map_into_left_body)
                })
            }
            Err(err) => Box::pin(async move {
                security::auth_rejected(&err, req.path());
                // Rendered inside the request future so the trace id is in scope
                let response = AppError::from(err).error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
