//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use elo_history::types::{GameRecord, RatingEntry};

/// Opening day used by the fixture schedules
pub fn opening_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 3, 28, 19, 5, 0).unwrap()
}

/// A game `days` after opening day
pub fn game(home: &str, away: &str, days: i64, season: u32, home_won: bool) -> GameRecord {
    GameRecord::new(home, away, opening_day() + Duration::days(days), season, home_won)
        .with_game_id(format!("{}{:03}{}", home, days, season))
}

/// Two short seasons between three clubs
pub fn two_season_schedule() -> Vec<GameRecord> {
    vec![
        game("NYA", "BOS", 0, 2018, true),
        game("BOS", "TBA", 1, 2018, true),
        game("TBA", "NYA", 2, 2018, false),
        game("NYA", "BOS", 3, 2018, false),
        game("BOS", "NYA", 365, 2019, false),
        game("TBA", "BOS", 366, 2019, true),
        game("NYA", "TBA", 367, 2019, true),
    ]
}

/// Game entries of a history, skipping materialized openers
pub fn game_entries(history: &[RatingEntry]) -> Vec<&RatingEntry> {
    history.iter().filter(|entry| entry.is_game()).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} to be within 1e-6 of {}",
        actual,
        expected
    );
}
