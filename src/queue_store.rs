// src/queue_store.rs
//
// All access to the `waiting_patient` table. Callers hold `AppState::queue_lock`.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{NewPatient, WaitingPatient};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front of the queue (smaller id).
    Up,
    /// Towards the back of the queue (larger id).
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    NotFound,
    /// Already first (up) or last (down); nothing changed.
    NoNeighbor,
    Swapped { from: i64, to: i64 },
}

const SELECT_COLUMNS: &str = "id, name, uid, clinic_num, create_time, update_time";

pub async fn list_patients(db: &SqlitePool) -> Result<Vec<WaitingPatient>, StoreError> {
    let rows = sqlx::query_as::<_, WaitingPatient>(&format!(
        "SELECT {SELECT_COLUMNS} FROM waiting_patient ORDER BY id ASC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert_patient(
    db: &SqlitePool,
    patient: &NewPatient,
) -> Result<WaitingPatient, StoreError> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, WaitingPatient>(&format!(
        r#"
        INSERT INTO waiting_patient (name, uid, clinic_num, create_time, update_time)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {SELECT_COLUMNS}
        "#
    ))
    .bind(&patient.name)
    .bind(&patient.uid)
    .bind(&patient.clinic_num)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Returns the number of rows removed (0 when `id` does not exist).
pub async fn delete_patient(db: &SqlitePool, id: i64) -> Result<u64, StoreError> {
    let res = sqlx::query("DELETE FROM waiting_patient WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

pub async fn clear_patients(db: &SqlitePool) -> Result<u64, StoreError> {
    let res = sqlx::query("DELETE FROM waiting_patient")
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

pub async fn get_patient(db: &SqlitePool, id: i64) -> Result<Option<WaitingPatient>, StoreError> {
    let mut conn = db.acquire().await?;
    fetch_by_id(&mut *conn, id).await
}

pub async fn update_patient(
    db: &SqlitePool,
    id: i64,
    patient: &NewPatient,
) -> Result<Option<WaitingPatient>, StoreError> {
    let row = sqlx::query_as::<_, WaitingPatient>(&format!(
        r#"
        UPDATE waiting_patient
        SET name = ?, uid = ?, clinic_num = ?, update_time = ?
        WHERE id = ?
        RETURNING {SELECT_COLUMNS}
        "#
    ))
    .bind(&patient.name)
    .bind(&patient.uid)
    .bind(&patient.clinic_num)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Swap the content of `id` with its neighbor in `direction`.
///
/// Ids stay where they are; name, uid and clinic number trade places, so the
/// patient appears one position further up or down the list. Both updates
/// commit together or not at all.
pub async fn move_patient(
    db: &SqlitePool,
    id: i64,
    direction: Direction,
) -> Result<MoveOutcome, StoreError> {
    let mut tx = db.begin().await?;

    let Some(target) = fetch_by_id(&mut *tx, id).await? else {
        return Ok(MoveOutcome::NotFound);
    };
    let Some(neighbor) = fetch_neighbor(&mut *tx, id, direction).await? else {
        return Ok(MoveOutcome::NoNeighbor);
    };

    let now = Utc::now();
    write_content(&mut *tx, neighbor.id, &target, now).await?;
    write_content(&mut *tx, target.id, &neighbor, now).await?;

    // dropping `tx` without commit rolls back
    tx.commit().await?;

    Ok(MoveOutcome::Swapped {
        from: target.id,
        to: neighbor.id,
    })
}

async fn fetch_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<WaitingPatient>, StoreError> {
    let row = sqlx::query_as::<_, WaitingPatient>(&format!(
        "SELECT {SELECT_COLUMNS} FROM waiting_patient WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// The row directly before (`Up`) or after (`Down`) `id` in queue order.
/// `id` itself does not need to exist.
async fn fetch_neighbor(
    conn: &mut SqliteConnection,
    id: i64,
    direction: Direction,
) -> Result<Option<WaitingPatient>, StoreError> {
    let sql = match direction {
        Direction::Up => format!(
            "SELECT {SELECT_COLUMNS} FROM waiting_patient WHERE id < ? ORDER BY id DESC LIMIT 1"
        ),
        Direction::Down => format!(
            "SELECT {SELECT_COLUMNS} FROM waiting_patient WHERE id > ? ORDER BY id ASC LIMIT 1"
        ),
    };
    let row = sqlx::query_as::<_, WaitingPatient>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

async fn write_content(
    conn: &mut SqliteConnection,
    slot_id: i64,
    content: &WaitingPatient,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        UPDATE waiting_patient
        SET name = ?, uid = ?, clinic_num = ?, update_time = ?
        WHERE id = ?
        "#,
    )
    .bind(&content.name)
    .bind(&content.uid)
    .bind(&content.clinic_num)
    .bind(now)
    .bind(slot_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
