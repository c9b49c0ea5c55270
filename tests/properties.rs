//! Property tests for the rating tracker invariants

mod fixtures;

use elo_history::config::{ArithmeticMode, RatingConfig};
use elo_history::rating::{EloCalculator, LogisticElo, WinProbability};
use elo_history::types::{GameRecord, RatingEntry};
use elo_history::EloTracker;
use proptest::prelude::*;

use fixtures::game;

const TEAMS: [&str; 4] = ["ATL", "CHN", "MIL", "SLN"];

/// Random chronologically ordered schedule over `TEAMS`
fn schedule() -> impl Strategy<Value = Vec<GameRecord>> {
    prop::collection::vec(
        (
            0usize..4,
            1usize..4,
            any::<bool>(),
            0i64..3,
            prop::bool::weighted(0.1),
        ),
        1..60,
    )
    .prop_map(|picks| {
        let mut day = 0;
        let mut season = 1;
        picks
            .into_iter()
            .map(|(home, offset, home_won, gap, new_season)| {
                day += gap;
                if new_season {
                    season += 1;
                    day += 120;
                }
                let away = (home + offset) % TEAMS.len();
                game(TEAMS[home], TEAMS[away], day, season, home_won)
            })
            .collect()
    })
}

fn config(openers: bool, arithmetic: ArithmeticMode) -> RatingConfig {
    RatingConfig {
        emit_season_openers: openers,
        arithmetic,
        ..RatingConfig::default()
    }
}

fn arithmetic() -> impl Strategy<Value = ArithmeticMode> {
    prop_oneof![Just(ArithmeticMode::Continuous), Just(ArithmeticMode::Truncated)]
}

fn game_entries(history: &[RatingEntry]) -> impl Iterator<Item = &RatingEntry> {
    history.iter().filter(|entry| entry.is_game())
}

proptest! {
    #[test]
    fn prop_probabilities_are_complementary(home in 0.0f64..4000.0, away in 0.0f64..4000.0) {
        let record = game("A", "B", 0, 1, true);
        let p_home = LogisticElo.home_win_probability(home, away, &record);
        let p_away = LogisticElo.home_win_probability(away, home, &record);

        prop_assert!((0.0..=1.0).contains(&p_home));
        prop_assert!((p_home + p_away - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_history_is_monotonic(games in schedule(), openers in any::<bool>(), mode in arithmetic()) {
        let mut tracker = EloTracker::new(TEAMS, config(openers, mode)).unwrap();
        tracker.add_history(&games).unwrap();

        for (_, history) in tracker.histories().iter() {
            for pair in history.windows(2) {
                prop_assert!(pair[0].timestamp <= pair[1].timestamp);
                prop_assert!(pair[0].season <= pair[1].season);
            }
        }
    }

    #[test]
    fn prop_tallies_count_games_since_reset(games in schedule(), openers in any::<bool>()) {
        let mut tracker = EloTracker::new(TEAMS, config(openers, ArithmeticMode::Continuous)).unwrap();
        tracker.add_history(&games).unwrap();

        for (_, history) in tracker.histories().iter() {
            let mut season = None;
            let mut played = 0u32;
            for entry in game_entries(history) {
                if season != Some(entry.season) {
                    season = Some(entry.season);
                    played = 0;
                }
                played += 1;
                prop_assert_eq!(entry.games_in_season(), played);
            }
        }
    }

    #[test]
    fn prop_first_game_starts_from_initial_rating(games in schedule(), openers in any::<bool>()) {
        let mut tracker = EloTracker::new(TEAMS, config(openers, ArithmeticMode::Continuous)).unwrap();
        tracker.add_history(&games).unwrap();

        for (_, history) in tracker.histories().iter() {
            if let Some(first) = history.first() {
                prop_assert_eq!(first.rating_before, 1500.0);
                prop_assert!(first.is_season_opener);
            }
            if let Some(first_game) = game_entries(history).next() {
                prop_assert_eq!(first_game.rating_before, 1500.0);
                prop_assert_eq!(first_game.wins + first_game.losses, 1);
            }
        }
    }

    #[test]
    fn prop_updates_are_zero_sum(games in schedule(), mode in arithmetic()) {
        let mut tracker = EloTracker::new(TEAMS, config(false, mode)).unwrap();

        for record in &games {
            tracker.add_game(record).unwrap();
            let home = tracker.latest(&record.home_team).unwrap();
            let away = tracker.latest(&record.away_team).unwrap();

            prop_assert!((home.rating_delta() + away.rating_delta()).abs() < 1e-9);
            prop_assert_eq!(home.won, record.home_won);
            prop_assert_eq!(away.won, !record.home_won);
        }
    }

    #[test]
    fn prop_updates_cancel_for_any_model(
        probability in 0.0f64..=1.0,
        k_factor in 1.0f64..100.0,
        home_won in any::<bool>(),
        mode in arithmetic(),
    ) {
        let config = RatingConfig {
            k_factor,
            arithmetic: mode,
            ..RatingConfig::default()
        };
        let calculator = EloCalculator::with_win_probability(
            &config,
            move |_: f64, _: f64, _: &GameRecord| probability,
        )
        .unwrap();

        let update = calculator
            .calculate(1500.0, 1500.0, &game("A", "B", 0, 1, home_won))
            .unwrap();
        prop_assert!((update.home_delta() + update.away_delta()).abs() < 1e-9);
    }

    #[test]
    fn prop_season_regression_law(games in schedule()) {
        let mut tracker = EloTracker::new(TEAMS, config(false, ArithmeticMode::Continuous)).unwrap();
        tracker.add_history(&games).unwrap();

        for (_, history) in tracker.histories().iter() {
            for pair in history.windows(2) {
                if pair[1].season > pair[0].season {
                    let previous = pair[0].rating_after;
                    let expected = previous + (1500.0 - previous) / 3.0;
                    prop_assert!((pair[1].rating_before - expected).abs() < 1e-9);
                    prop_assert!(pair[1].is_season_opener);
                } else {
                    prop_assert_eq!(pair[1].rating_before, pair[0].rating_after);
                    prop_assert!(!pair[1].is_season_opener);
                }
            }
        }
    }
}
