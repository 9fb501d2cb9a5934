//! Testing utilities.
//!
//! This module provides tools for integration testing:
//! - `MockJudge` for deterministic testing without API calls
//! - `TestHarness` for scripted question/rating flows with a controlled clock
//! - Assertion helpers for verifying pet state

use crate::judge::Rating;
use crate::state::PetState;
use chrono::{Duration, NaiveDate, NaiveTime};

/// A mock judge that returns scripted ratings.
///
/// Use this for deterministic tests without API calls.
pub struct MockJudge {
    /// Scripted ratings to return in order.
    ratings: Vec<Rating>,
    /// Index of next rating to return.
    rating_index: usize,
}

impl MockJudge {
    /// Create a new mock judge with scripted ratings.
    pub fn new(ratings: Vec<Rating>) -> Self {
        Self {
            ratings,
            rating_index: 0,
        }
    }

    /// Add a rating to the queue.
    pub fn queue_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Add a rating with just a score and a canned comment.
    pub fn queue_score(&mut self, score: u8) {
        self.queue_rating(Rating {
            score,
            comment: format!("scripted verdict ({score} pts)"),
            answer: Some("scripted answer".to_string()),
        });
    }

    /// Return the next scripted rating.
    pub fn rate(&mut self, _question: &str) -> Rating {
        if self.rating_index < self.ratings.len() {
            let rating = self.ratings[self.rating_index].clone();
            self.rating_index += 1;
            rating
        } else {
            Rating::degraded("the judge has no more scripted ratings")
        }
    }

    /// Reset the rating index to replay from the beginning.
    pub fn reset(&mut self) {
        self.rating_index = 0;
    }
}

/// Test harness for running question/rating scenarios in memory.
///
/// Transitions go through the real state rules; only the judge and the clock
/// are scripted. Persistence is exercised separately in the store tests.
pub struct TestHarness {
    /// The mock judge.
    pub judge: MockJudge,
    /// The pet state.
    pub state: PetState,
    today: NaiveDate,
    clock: NaiveTime,
}

impl TestHarness {
    /// Create a harness with a fresh default pet on a fixed date.
    pub fn new() -> Self {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date");
        Self {
            judge: MockJudge::new(Vec::new()),
            state: PetState::new(today),
            today,
            clock: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
        }
    }

    /// Queue a rating with the given score.
    pub fn expect_score(&mut self, score: u8) -> &mut Self {
        self.judge.queue_score(score);
        self
    }

    /// Queue a full rating.
    pub fn expect_rating(&mut self, rating: Rating) -> &mut Self {
        self.judge.queue_rating(rating);
        self
    }

    /// Submit a question and apply the next scripted rating.
    pub fn ask(&mut self, question: &str) -> Rating {
        let rating = self.judge.rate(question);
        self.state.record_question(question, &rating, self.clock);
        rating
    }

    /// Advance the calendar and apply the rollover a load would perform.
    pub fn advance_days(&mut self, days: u32) {
        self.today = self.today + Duration::days(days as i64);
        self.state.roll_over(self.today);
    }

    /// Current health.
    pub fn health(&self) -> u8 {
        self.state.health
    }

    /// Current level.
    pub fn level(&self) -> u32 {
        self.state.level
    }

    /// Questions counted today.
    pub fn questions_today(&self) -> u32 {
        self.state.questions_today
    }

    /// Number of history records.
    pub fn history_len(&self) -> usize {
        self.state.history.len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the pet's health is at the expected value.
#[track_caller]
pub fn assert_health(harness: &TestHarness, expected: u8) {
    assert_eq!(
        harness.health(),
        expected,
        "Expected health {expected}, got {}",
        harness.health()
    );
}

/// Assert the pet's level is at the expected value.
#[track_caller]
pub fn assert_level(harness: &TestHarness, expected: u32) {
    assert_eq!(
        harness.level(),
        expected,
        "Expected level {expected}, got {}",
        harness.level()
    );
}

/// Assert the history holds the expected number of records.
#[track_caller]
pub fn assert_history_len(harness: &TestHarness, expected: usize) {
    assert_eq!(
        harness.history_len(),
        expected,
        "Expected {expected} history records, got {}",
        harness.history_len()
    );
}
