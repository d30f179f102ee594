use actix_web::{web, App, HttpServer};
use auth_backend::config::AppConfig;
use auth_backend::middleware::{RequestTrace, StructuredLogger};
use auth_backend::routes;
use auth_backend::state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("❌ logging setup failed: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting auth backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = AppState::in_memory(config.signing.clone());
    let tokens = app_state.tokens.clone();
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        let tokens = tokens.clone();
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(|cfg| routes::configure(cfg, tokens))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
