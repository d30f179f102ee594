use actix_web::{web, HttpResponse};

use crate::auth::claims::VerifiedIdentity;
use crate::error::AppError;
use crate::routes::public::UserProfile;
use crate::services::users;
use crate::state::app_state::AppState;

/// Profile of the caller identified by the bearer token.
async fn profile(
    identity: VerifiedIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::profile(app_state.users.as_ref(), &identity).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(profile));
}
