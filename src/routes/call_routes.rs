// src/routes/call_routes.rs

use std::sync::MutexGuard;

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    call_board::CallBoard,
    error::ApiError,
    models::{AppState, WaitingPatient},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/call_patient", get(take_called_patient))
        .route("/call_list", get(take_call_list))
}

pub(crate) fn lock_call_board(state: &AppState) -> Result<MutexGuard<'_, CallBoard>, ApiError> {
    state
        .calls
        .lock()
        .map_err(|_| ApiError::Internal("call board lock poisoned".into()))
}

/// Most recent call, or `null` when nothing is pending. Drains the board.
pub async fn take_called_patient(
    State(state): State<AppState>,
) -> Result<Json<Option<WaitingPatient>>, ApiError> {
    let called = lock_call_board(&state)?.take_latest();
    Ok(Json(called))
}

/// Every pending call in call order. Drains the board.
pub async fn take_call_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<WaitingPatient>>, ApiError> {
    let called = lock_call_board(&state)?.take_all();
    Ok(Json(called))
}
