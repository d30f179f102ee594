use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use auth_backend::middleware::{RequestTrace, StructuredLogger};
use auth_backend::routes;
use auth_backend::state::AppState;

/// Build a test service wired exactly like `main.rs`.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let tokens = state.tokens.clone();
    let data = web::Data::new(state);

    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data)
            .configure(move |cfg| routes::configure(cfg, tokens)),
    )
    .await
}
