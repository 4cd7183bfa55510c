use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod browser;
mod db;
mod model;
mod probe;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config)
        .await
        .expect("Failed to initialize application state");

    let db_pool = web::Data::new(state.db_pool.as_ref().clone());
    let analysis = web::Data::new(state.analysis);
    let competitors = web::Data::new(state.competitors);
    let templates = web::Data::new(state.templates);

    tracing::info!("Starting SEO Audit Agent server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(db_pool.clone())
            .app_data(analysis.clone())
            .app_data(competitors.clone())
            .app_data(templates.clone())
            .configure(api::analysis::configure)
            .configure(api::competitor::configure)
            .configure(api::template::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
