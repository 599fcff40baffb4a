// src/routes/patient_routes.rs

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, put},
};

use crate::{
    error::ApiError,
    models::{AppState, DeletedResponse, MovedResponse, NewPatient, WaitingPatient},
    queue_store::{self, Direction, MoveOutcome},
    routes::call_routes::lock_call_board,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/patient_list",
            get(list_patients).post(create_patient).delete(clear_patients),
        )
        .route(
            "/patient_list/{id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/patient_list/{id}/actions/call", put(call_patient))
        .route("/patient_list/{id}/actions/move_up", put(move_up_patient))
        .route("/patient_list/{id}/actions/move_down", put(move_down_patient))
}

fn validate_new_patient(req: NewPatient) -> Result<NewPatient, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("name is required"));
    }
    Ok(NewPatient {
        name: name.to_string(),
        uid: req.uid.trim().to_string(),
        clinic_num: req.clinic_num.trim().to_string(),
    })
}

pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<WaitingPatient>>, ApiError> {
    let _queue = state.queue_lock.lock().await;
    let rows = queue_store::list_patients(&state.db).await?;
    Ok(Json(rows))
}

pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<Json<WaitingPatient>, ApiError> {
    let Json(req) = payload?;
    let req = validate_new_patient(req)?;

    let _queue = state.queue_lock.lock().await;
    let row = queue_store::insert_patient(&state.db, &req).await?;
    tracing::info!(patient_id = row.id, name = %row.name, "patient queued");
    Ok(Json(row))
}

pub async fn clear_patients(
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let _queue = state.queue_lock.lock().await;
    let deleted = queue_store::clear_patients(&state.db).await?;
    tracing::info!(deleted, "patient queue cleared");
    Ok(Json(DeletedResponse { deleted }))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WaitingPatient>, ApiError> {
    let _queue = state.queue_lock.lock().await;
    let row = queue_store::get_patient(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::patient_not_found(id))?;
    Ok(Json(row))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<Json<WaitingPatient>, ApiError> {
    let Json(req) = payload?;
    let req = validate_new_patient(req)?;

    let _queue = state.queue_lock.lock().await;
    let row = queue_store::update_patient(&state.db, id, &req)
        .await?
        .ok_or_else(|| ApiError::patient_not_found(id))?;
    Ok(Json(row))
}

/// Responds with the number of rows removed; an unknown id is not an error.
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<u64>, ApiError> {
    let _queue = state.queue_lock.lock().await;
    let n = queue_store::delete_patient(&state.db, id).await?;
    if n == 0 {
        tracing::debug!(patient_id = id, "delete matched no rows");
    }
    Ok(Json(n))
}

pub async fn call_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WaitingPatient>, ApiError> {
    let _queue = state.queue_lock.lock().await;
    let patient = queue_store::get_patient(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::patient_not_found(id))?;

    let mut board = lock_call_board(&state)?;
    board.call(patient.clone());
    tracing::info!(
        patient_id = id,
        mode = %board.mode(),
        pending = board.pending(),
        "patient called"
    );
    Ok(Json(patient))
}

pub async fn move_up_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovedResponse>, ApiError> {
    move_patient(&state, id, Direction::Up).await
}

pub async fn move_down_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovedResponse>, ApiError> {
    move_patient(&state, id, Direction::Down).await
}

async fn move_patient(
    state: &AppState,
    id: i64,
    direction: Direction,
) -> Result<Json<MovedResponse>, ApiError> {
    let _queue = state.queue_lock.lock().await;
    match queue_store::move_patient(&state.db, id, direction).await? {
        MoveOutcome::NotFound => Err(ApiError::patient_not_found(id)),
        MoveOutcome::NoNeighbor => {
            tracing::debug!(patient_id = id, ?direction, "already at the edge of the queue");
            Ok(Json(MovedResponse { moved: false }))
        }
        MoveOutcome::Swapped { from, to } => {
            tracing::info!(from, to, ?direction, "patient moved");
            Ok(Json(MovedResponse { moved: true }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            uid: " 42 ".to_string(),
            clinic_num: "".to_string(),
        }
    }

    #[test]
    fn validate_trims_fields() {
        let ok = validate_new_patient(req("  Alice ")).unwrap();
        assert_eq!(ok.name, "Alice");
        assert_eq!(ok.uid, "42");
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert!(validate_new_patient(req("")).is_err());
        assert!(validate_new_patient(req("   ")).is_err());
    }
}
