//! Pet state types and transition rules.
//!
//! Contains the persisted pet record, its question history, and the
//! deterministic rules that evolve it: day-rollover decay, score-based
//! healing, and level-ups when health saturates.

use crate::judge::Rating;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Health ceiling. Healing saturates here and triggers a level-up.
pub const MAX_HEALTH: u8 = 100;

/// Health lost per missed calendar day.
pub const DECAY_PER_DAY: u8 = 20;

/// Health of a freshly created pet.
pub const DEFAULT_HEALTH: u8 = 80;

/// Display token of a freshly created pet.
pub const DEFAULT_EMOJI: &str = "🐱";

/// The persisted pet record.
///
/// Serialized field names match the on-disk document; the file holds exactly
/// one of these, overwritten in full on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    /// Engagement metric in `[0, 100]`.
    #[serde(rename = "pet_health")]
    pub health: u8,

    /// Prestige counter, `>= 1`. Never decreases.
    #[serde(rename = "pet_level")]
    pub level: u32,

    /// Opaque display token; never mutated by the engine.
    #[serde(rename = "pet_emoji")]
    pub emoji: String,

    /// Calendar date of the last processed session.
    pub last_active_date: NaiveDate,

    /// Ratings applied since `last_active_date` last advanced.
    pub questions_today: u32,

    /// Question records, newest first.
    pub history: Vec<QuestionRecord>,
}

/// A single rated question, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Wall-clock time of submission, formatted `HH:MM`.
    pub time: String,

    /// The submitted text, unmodified.
    pub question: String,

    /// Score in `[1, 100]`, copied from the rating.
    pub score: u8,

    /// Short remark copied from the rating.
    pub comment: String,
}

impl PetState {
    /// Create a fresh default pet active on the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            health: DEFAULT_HEALTH,
            level: 1,
            emoji: DEFAULT_EMOJI.to_string(),
            last_active_date: today,
            questions_today: 0,
            history: Vec::new(),
        }
    }

    /// Check the record's invariants hold.
    ///
    /// A persisted document that parses but violates these is treated as
    /// corrupt by the store.
    pub fn is_valid(&self) -> bool {
        self.health <= MAX_HEALTH && self.level >= 1
    }

    /// Apply the day-rollover transition if the calendar date has changed.
    ///
    /// Health decays by [`DECAY_PER_DAY`] per missed day (floored at 0), the
    /// daily question counter resets, and the active date advances. A clock
    /// that moved backwards counts as zero missed days.
    ///
    /// Returns `true` if a rollover happened. Calling again with the same
    /// date is a no-op.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_active_date == today {
            return false;
        }

        let days_missed = today
            .signed_duration_since(self.last_active_date)
            .num_days()
            .max(0);
        let decay = (days_missed as u64).saturating_mul(DECAY_PER_DAY as u64);

        self.health = if decay >= self.health as u64 {
            0
        } else {
            self.health - decay as u8
        };
        self.questions_today = 0;
        self.last_active_date = today;
        true
    }

    /// Health gained from a single rating.
    pub fn heal_amount(score: u8) -> u8 {
        score / 10
    }

    /// Apply a completed question-rating cycle.
    ///
    /// Heals by the rating's score, bumps the daily counter, levels up when
    /// health lands exactly on [`MAX_HEALTH`] (health stays capped, it is not
    /// reset), and prepends a history record. The rating's `answer` is
    /// display-only and never recorded.
    pub fn record_question(&mut self, question: &str, rating: &Rating, time: NaiveTime) {
        self.health = self
            .health
            .saturating_add(Self::heal_amount(rating.score))
            .min(MAX_HEALTH);
        self.questions_today += 1;

        if self.health == MAX_HEALTH {
            self.level += 1;
        }

        self.history.insert(
            0,
            QuestionRecord {
                time: time.format("%H:%M").to_string(),
                question: question.to_string(),
                score: rating.score,
                comment: rating.comment.clone(),
            },
        );
    }
}
