//! QA tests for the pet state lifecycle.
//!
//! These tests run the full load → rate → apply cycle against a real store
//! on a temp directory, with a scripted judge so no API calls are made.
//! Run with: `cargo test -p wenle-core --test qa_state_flow`

use chrono::{NaiveDate, NaiveTime};
use tempfile::TempDir;
use wenle_core::testing::{assert_health, assert_history_len, assert_level, TestHarness};
use wenle_core::{PetState, PetStore, Rating};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

fn rating(score: u8) -> Rating {
    Rating {
        score,
        comment: "评语".to_string(),
        answer: Some("答案".to_string()),
    }
}

// =============================================================================
// TEST 1: A brand-new pet starts with the documented defaults
// =============================================================================

#[tokio::test]
async fn test_fresh_pet_defaults() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let state = store.load_at(date(2024, 3, 1)).await.expect("load");

    assert_eq!(state.health, 80);
    assert_eq!(state.level, 1);
    assert_eq!(state.questions_today, 0);
    assert!(state.history.is_empty());
    assert_eq!(state.last_active_date, date(2024, 3, 1));
}

// =============================================================================
// TEST 2: Two missed days decay health by 40
// =============================================================================

#[tokio::test]
async fn test_two_missed_days_decay() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let mut state = PetState::new(date(2024, 3, 1));
    state.questions_today = 7;
    store.save(&state).await.expect("save");

    let decayed = store.load_at(date(2024, 3, 3)).await.expect("load");

    assert_eq!(decayed.health, 40);
    assert_eq!(decayed.questions_today, 0);
    assert_eq!(decayed.last_active_date, date(2024, 3, 3));

    // Rollover is idempotent within the same date.
    let again = store.load_at(date(2024, 3, 3)).await.expect("load");
    assert_eq!(again.health, 40);
}

// =============================================================================
// TEST 3: A high-scoring question heals the decayed pet
// =============================================================================

#[tokio::test]
async fn test_high_score_heals_after_decay() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let state = PetState::new(date(2024, 3, 1));
    store.save(&state).await.expect("save");

    let decayed = store.load_at(date(2024, 3, 3)).await.expect("load");
    assert_eq!(decayed.health, 40);

    let healed = store
        .apply_rating_at(&decayed, "如果时间静止了，光还会移动吗？", &rating(95), time(10, 15))
        .await
        .expect("apply");

    assert_eq!(healed.health, 49);
    assert_eq!(healed.questions_today, 1);
    assert_eq!(healed.history.len(), 1);
    assert_eq!(healed.history[0].score, 95);
    assert_eq!(healed.history[0].question, "如果时间静止了，光还会移动吗？");
}

// =============================================================================
// TEST 4: Saturating health levels the pet up without resetting health
// =============================================================================

#[tokio::test]
async fn test_level_up_on_saturation() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let mut state = store.load_at(date(2024, 3, 1)).await.expect("load");
    assert_eq!(state.health, 80);

    // Two perfect questions: 80 -> 90 -> 100; the level bumps on the call
    // that lands exactly on 100 and health stays capped.
    state = store
        .apply_rating_at(&state, "第一问", &rating(100), time(9, 0))
        .await
        .expect("apply");
    assert_eq!(state.health, 90);
    assert_eq!(state.level, 1);

    state = store
        .apply_rating_at(&state, "第二问", &rating(100), time(9, 5))
        .await
        .expect("apply");
    assert_eq!(state.health, 100);
    assert_eq!(state.level, 2);
}

// =============================================================================
// TEST 5: The degraded rating shape survives the full cycle
// =============================================================================

#[tokio::test]
async fn test_degraded_rating_applies() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let degraded = Rating::degraded("Network error: timeout");
    assert_eq!(degraded.score, 10);
    assert!(degraded.comment.contains("timeout"));
    assert!(degraded.answer.is_none());

    let state = store.load_at(date(2024, 3, 1)).await.expect("load");
    let next = store
        .apply_rating_at(&state, "一个没评上的问题", &degraded, time(22, 40))
        .await
        .expect("apply");

    // score 10 still heals by 1; the pet always reacts.
    assert_eq!(next.health, 81);
    assert_eq!(next.history[0].score, 10);
    assert!(next.history[0].comment.contains("timeout"));
}

// =============================================================================
// TEST 6: History stays newest-first with prior records untouched
// =============================================================================

#[tokio::test]
async fn test_history_ordering_across_persistence() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let mut state = store.load_at(date(2024, 3, 1)).await.expect("load");
    for (i, question) in ["最早", "中间", "最新"].iter().enumerate() {
        state = store
            .apply_rating_at(&state, question, &rating(30 + i as u8), time(8 + i as u32, 0))
            .await
            .expect("apply");
    }

    let loaded = store.load_at(date(2024, 3, 1)).await.expect("load");
    let questions: Vec<_> = loaded.history.iter().map(|r| r.question.as_str()).collect();
    assert_eq!(questions, vec!["最新", "中间", "最早"]);
    assert_eq!(loaded.history[2].score, 30);
    assert_eq!(loaded.history[2].time, "08:00");
}

// =============================================================================
// TEST 7: Persist -> load round trip is lossless on the same date
// =============================================================================

#[tokio::test]
async fn test_round_trip_is_lossless() {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PetStore::new(temp_dir.path().join("user_data.json"));

    let mut state = store.load_at(date(2024, 3, 1)).await.expect("load");
    state = store
        .apply_rating_at(&state, "镜子里的你和真实的你是一样的吗？", &rating(72), time(14, 30))
        .await
        .expect("apply");

    let loaded = store.load_at(date(2024, 3, 1)).await.expect("load");
    assert_eq!(loaded, state);
}

// =============================================================================
// TEST 8: Scripted end-to-end flow through the harness
// =============================================================================

#[test]
fn test_harness_week_of_neglect_then_revival() {
    let mut harness = TestHarness::new();

    // Ask a few questions on day one.
    harness.expect_score(40).expect_score(85);
    harness.ask("为什么宇宙是黑色的？");
    harness.ask("意识可以被上传到电脑吗？");
    assert_health(&harness, 92);
    assert_history_len(&harness, 2);

    // Neglect the pet for four days: 92 - 80 = 12.
    harness.advance_days(4);
    assert_health(&harness, 12);
    assert_eq!(harness.questions_today(), 0);

    // Revive it with a perfect question.
    harness.expect_score(100);
    harness.ask("数学是发明的还是发现的？");
    assert_health(&harness, 22);
    assert_level(&harness, 1);
    assert_history_len(&harness, 3);
}
