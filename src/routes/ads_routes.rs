// src/routes/ads_routes.rs

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};

use crate::{
    error::ApiError,
    models::{AppState, IntervalRequest},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ads_img", get(list_images))
        .route("/ads_img/interval", get(get_interval).put(set_interval))
}

pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let images = state.ads.list_images().await.map_err(|e| {
        tracing::error!(error = %e, dir = %state.ads.images_dir().display(), "cannot read ads directory");
        ApiError::Internal(format!("ads directory error: {e}"))
    })?;
    Ok(Json(images))
}

pub async fn get_interval(State(state): State<AppState>) -> Json<i64> {
    Json(state.ads.interval())
}

pub async fn set_interval(
    State(state): State<AppState>,
    payload: Result<Json<IntervalRequest>, JsonRejection>,
) -> Result<Json<i64>, ApiError> {
    let Json(req) = payload?;
    if req.interval <= 0 {
        return Err(ApiError::validation("interval must be > 0"));
    }

    state.ads.set_interval(req.interval);
    tracing::info!(interval = req.interval, "ad interval updated");
    Ok(Json(req.interval))
}
