use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::users::User;
use crate::services::users::{self, SignupInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

async fn signup(
    body: ValidatedJson<SignupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let SignupRequest {
        name,
        email,
        password,
    } = body.into_inner();

    let user = users::signup(
        app_state.users.as_ref(),
        app_state.hasher.clone(),
        SignupInput {
            name,
            email,
            password,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if body.email.trim().is_empty() {
        return Err(AppError::invalid("Email cannot be empty"));
    }
    if body.password.is_empty() {
        return Err(AppError::invalid("Password cannot be empty"));
    }

    let token = users::login(
        app_state.users.as_ref(),
        app_state.hasher.clone(),
        &app_state.tokens,
        &body.email,
        &body.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/signup").route(web::post().to(signup)))
        .service(web::resource("/login").route(web::post().to(login)));
}
