use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::ads::AdDisplay;
use crate::call_board::CallBoard;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    /// Serializes every read and write against `waiting_patient`.
    pub queue_lock: Arc<tokio::sync::Mutex<()>>,
    pub calls: Arc<Mutex<CallBoard>>,
    pub ads: Arc<AdDisplay>,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, calls: CallBoard, ads: AdDisplay) -> Self {
        Self {
            db,
            queue_lock: Arc::new(tokio::sync::Mutex::new(())),
            calls: Arc::new(Mutex::new(calls)),
            ads: Arc::new(ads),
        }
    }
}

/* -------------------------
   API DTOs
--------------------------*/

#[derive(Debug, Clone, Deserialize)]
pub struct NewPatient {
    pub name: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub clinic_num: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct MovedResponse {
    pub moved: bool,
}

#[derive(Debug, Deserialize)]
pub struct IntervalRequest {
    pub interval: i64,
}

/* -------------------------
   DB Row Models
--------------------------*/

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WaitingPatient {
    pub id: i64,
    pub name: String,
    pub uid: String,
    pub clinic_num: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}
