use actix_web::{web, HttpResponse};

use crate::error::AppError;

async fn ping() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("pong"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping));
}
