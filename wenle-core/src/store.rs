//! Pet state persistence.
//!
//! Owns the single JSON document holding the pet record. Reads that fail for
//! any reason degrade to a fresh default pet; writes always surface their
//! errors, since a silently lost write would corrupt the long-term record.

use crate::judge::Rating;
use crate::state::PetState;
use chrono::{Local, NaiveDate, NaiveTime};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default backing file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "user_data.json";

/// Store for the persisted pet record.
///
/// One record, one file, full-document overwrite on every save. There is no
/// locking: a single local user is assumed, and concurrent writers would
/// race with last-writer-wins.
pub struct PetStore {
    path: PathBuf,
}

impl PetStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the pet record, applying day-rollover decay for today.
    pub async fn load(&self) -> Result<PetState, StoreError> {
        self.load_at(Local::now().date_naive()).await
    }

    /// Load the pet record as of the given date.
    ///
    /// A missing, unreadable, or invalid document yields a fresh default pet
    /// without error. If the calendar date advanced since the last session,
    /// decay is applied and the decayed state is persisted immediately before
    /// returning; only that write can fail. Loading twice on the same date
    /// decays at most once.
    pub async fn load_at(&self, today: NaiveDate) -> Result<PetState, StoreError> {
        let mut state = match fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<PetState>(&content) {
                Ok(state) if state.is_valid() => state,
                _ => return Ok(PetState::new(today)),
            },
            Err(_) => return Ok(PetState::new(today)),
        };

        if state.roll_over(today) {
            self.save(&state).await?;
        }

        Ok(state)
    }

    /// Apply a completed question-rating cycle, timestamped now.
    pub async fn apply_rating(
        &self,
        state: &PetState,
        question: &str,
        rating: &Rating,
    ) -> Result<PetState, StoreError> {
        self.apply_rating_at(state, question, rating, Local::now().time())
            .await
    }

    /// Apply a completed question-rating cycle with an explicit record time.
    ///
    /// Returns the updated state, already persisted.
    pub async fn apply_rating_at(
        &self,
        state: &PetState,
        question: &str,
        rating: &Rating,
        time: NaiveTime,
    ) -> Result<PetState, StoreError> {
        let mut next = state.clone();
        next.record_question(question, rating, time);
        self.save(&next).await?;
        Ok(next)
    }

    /// Persist the full record, replacing any prior content.
    pub async fn save(&self, state: &PetState) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

impl Default for PetStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}
