// src/call_board.rs

use std::fmt;
use std::str::FromStr;

use crate::models::WaitingPatient;

/// How a new call interacts with calls the display has not picked up yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// One pending call at a time; a new call replaces the old one.
    Slot,
    /// Every call is kept until the display drains the board.
    List,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown call mode '{0}' (expected 'slot' or 'list')")]
pub struct UnknownCallMode(String);

impl FromStr for CallMode {
    type Err = UnknownCallMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slot" => Ok(CallMode::Slot),
            "list" => Ok(CallMode::List),
            other => Err(UnknownCallMode(other.to_string())),
        }
    }
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallMode::Slot => f.write_str("slot"),
            CallMode::List => f.write_str("list"),
        }
    }
}

/// Called patients waiting to be shown on the waiting-room display.
///
/// Reads drain the board, so each call reaches exactly one poller.
#[derive(Debug)]
pub struct CallBoard {
    mode: CallMode,
    pending: Vec<WaitingPatient>,
}

impl CallBoard {
    pub fn new(mode: CallMode) -> Self {
        Self {
            mode,
            pending: Vec::new(),
        }
    }

    pub fn mode(&self) -> CallMode {
        self.mode
    }

    pub fn call(&mut self, patient: WaitingPatient) {
        if self.mode == CallMode::Slot {
            self.pending.clear();
        }
        self.pending.push(patient);
    }

    /// Drains the board and returns the most recent call, if any.
    pub fn take_latest(&mut self) -> Option<WaitingPatient> {
        let latest = self.pending.pop();
        self.pending.clear();
        latest
    }

    /// Drains the board and returns every pending call in call order.
    pub fn take_all(&mut self) -> Vec<WaitingPatient> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn patient(id: i64, name: &str) -> WaitingPatient {
        let now = Utc::now();
        WaitingPatient {
            id,
            name: name.to_string(),
            uid: format!("U{id}"),
            clinic_num: "1".to_string(),
            create_time: now,
            update_time: now,
        }
    }

    #[test]
    fn parses_call_mode() {
        assert_eq!("slot".parse::<CallMode>().unwrap(), CallMode::Slot);
        assert_eq!(" LIST ".parse::<CallMode>().unwrap(), CallMode::List);
        assert!("queue".parse::<CallMode>().is_err());
    }

    #[test]
    fn slot_mode_keeps_only_latest_call() {
        let mut board = CallBoard::new(CallMode::Slot);
        board.call(patient(1, "alice"));
        board.call(patient(2, "bob"));
        assert_eq!(board.pending(), 1);

        let called = board.take_latest().unwrap();
        assert_eq!(called.id, 2);
        assert!(board.take_latest().is_none());
    }

    #[test]
    fn list_mode_accumulates_in_call_order() {
        let mut board = CallBoard::new(CallMode::List);
        board.call(patient(3, "carol"));
        board.call(patient(1, "alice"));

        let ids: Vec<i64> = board.take_all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(board.take_all().is_empty());
    }

    #[test]
    fn take_latest_drains_everything() {
        let mut board = CallBoard::new(CallMode::List);
        board.call(patient(1, "alice"));
        board.call(patient(2, "bob"));

        assert_eq!(board.take_latest().map(|p| p.id), Some(2));
        assert_eq!(board.pending(), 0);
    }
}
