use std::path::Path;

use crate::models::AppState;
use axum::Router;

pub mod ads_routes;
pub mod call_routes;
pub mod patient_routes;
pub mod static_routes;

pub fn router(state: AppState, web_root: &Path) -> Router {
    Router::new()
        .merge(patient_routes::router())
        .merge(call_routes::router())
        .merge(ads_routes::router())
        .merge(static_routes::router(web_root))
        .with_state(state)
}
