//! PetSession - the primary caller-facing API.
//!
//! Wires the judge and the store into a single interface: open a session to
//! load (and decay) the pet, then feed it questions. The UI layer only ever
//! talks to this type.

use crate::judge::{CuriosityJudge, JudgeConfig, Rating};
use crate::state::{PetState, QuestionRecord};
use crate::store::{PetStore, StoreError, DEFAULT_DATA_PATH};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("No API key configured - set GEMINI_API_KEY environment variable")]
    NoApiKey,
}

/// Configuration for opening a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backing file for the pet record.
    pub data_path: PathBuf,

    /// Model for the judge.
    pub model: Option<String>,

    /// Temperature for the judge.
    pub temperature: Option<f32>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model: None,
            temperature: None,
        }
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of feeding the pet one question.
#[derive(Debug, Clone)]
pub struct AskResponse {
    /// The judge's verdict (possibly degraded).
    pub rating: Rating,

    /// Health after healing.
    pub health: u8,

    /// Level after the transition.
    pub level: u32,

    /// Questions counted today, including this one.
    pub questions_today: u32,

    /// Whether this question pushed the pet over a level.
    pub leveled_up: bool,
}

/// A curiosity pet session.
pub struct PetSession {
    judge: CuriosityJudge,
    store: PetStore,
    state: PetState,
}

impl PetSession {
    /// Open a session: build the judge from the environment and load the pet
    /// (applying any day-rollover decay).
    ///
    /// Requires `GEMINI_API_KEY` to be set.
    pub async fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let judge_config = JudgeConfig {
            model: config.model,
            temperature: config.temperature.or(JudgeConfig::default().temperature),
            ..JudgeConfig::default()
        };

        let judge = CuriosityJudge::from_env()
            .map_err(|_| SessionError::NoApiKey)?
            .with_config(judge_config);

        let store = PetStore::new(config.data_path);
        let state = store.load().await?;

        Ok(Self {
            judge,
            store,
            state,
        })
    }

    /// Feed the pet a question: rate it, apply the rating, persist.
    ///
    /// A failed generation still produces a (degraded) rating, so the pet
    /// always reacts; only a persistence failure is an error.
    pub async fn ask(&mut self, question: &str) -> Result<AskResponse, SessionError> {
        let rating = self.judge.rate(question).await;
        let level_before = self.state.level;

        self.state = self
            .store
            .apply_rating(&self.state, question, &rating)
            .await?;

        Ok(AskResponse {
            rating,
            health: self.state.health,
            level: self.state.level,
            questions_today: self.state.questions_today,
            leveled_up: self.state.level > level_before,
        })
    }

    /// The current pet state.
    pub fn state(&self) -> &PetState {
        &self.state
    }

    /// Current health.
    pub fn health(&self) -> u8 {
        self.state.health
    }

    /// Current level.
    pub fn level(&self) -> u32 {
        self.state.level
    }

    /// The pet's display token.
    pub fn emoji(&self) -> &str {
        &self.state.emoji
    }

    /// Questions counted today.
    pub fn questions_today(&self) -> u32 {
        self.state.questions_today
    }

    /// Question history, newest first.
    pub fn history(&self) -> &[QuestionRecord] {
        &self.state.history
    }
}
