use std::sync::Arc;

use actix_web::web;

use crate::auth::jwt::TokenService;
use crate::middleware::authz::Authz;

pub mod health;
pub mod protected;
pub mod public;

/// Register every route of the service.
///
/// The protected scope is wrapped with [`Authz`] built from the same
/// `TokenService` that issues tokens at login.
pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    // Liveness: /ping
    cfg.configure(health::configure_routes);

    // Signup and login: /api/public/**
    cfg.service(web::scope("/api/public").configure(public::configure_routes));

    // Token-guarded: /api/protected/**
    cfg.service(
        web::scope("/api/protected")
            .wrap(Authz::new(tokens))
            .configure(protected::configure_routes),
    );
}
