mod ads;
mod call_board;
mod config;

mod db;
mod error;
mod models;
mod queue_store;
mod routes;

use crate::{ads::AdDisplay, call_board::CallBoard, config::Config, models::AppState};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env()?;
    let pool = db::connect_sqlite(&cfg.database_url).await?;

    let state = AppState::new(
        pool,
        CallBoard::new(cfg.call_mode),
        AdDisplay::new(&cfg.web_root, cfg.ads_interval),
    );

    // The panel and controller pages may be opened from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state, &cfg.web_root)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!(call_mode = %cfg.call_mode, "Listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
