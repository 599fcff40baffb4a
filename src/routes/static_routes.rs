// src/routes/static_routes.rs

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::{ads::ADS_IMAGE_DIR, models::AppState};

/// Panel and controller pages plus their asset directories.
pub fn router(web_root: &Path) -> Router<AppState> {
    tracing::info!(path = %web_root.display(), "serving web ui");

    Router::new()
        .route_service("/", ServeFile::new(web_root.join("panel/index.html")))
        .route_service(
            "/controller",
            ServeFile::new(web_root.join("controller/index.html")),
        )
        .nest_service("/js", ServeDir::new(web_root.join("js")))
        .nest_service("/css", ServeDir::new(web_root.join("css")))
        .nest_service("/ads/img", ServeDir::new(web_root.join(ADS_IMAGE_DIR)))
}
