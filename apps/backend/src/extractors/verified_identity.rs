use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::VerifiedIdentity;
use crate::error::AppError;
use crate::middleware::authz::AuthzError;

/// Reads the identity stored by the `Authz` middleware.
///
/// Handlers outside an `Authz`-wrapped scope never see an identity and are
/// rejected the same way as a request without credentials.
impl FromRequest for VerifiedIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<VerifiedIdentity>()
                .cloned()
                .ok_or_else(|| AuthzError::MissingCredential.into()),
        )
    }
}
