//! Performance benchmarks for rating calculation and history ingestion

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use elo_history::config::RatingConfig;
use elo_history::rating::EloCalculator;
use elo_history::types::GameRecord;
use elo_history::utils::teams_from_games;
use elo_history::EloTracker;

const TEAMS: usize = 30;

/// Round-robin style schedule spread over several seasons
fn create_schedule(seasons: u32, games_per_season: usize) -> Vec<GameRecord> {
    let start = Utc.with_ymd_and_hms(2010, 4, 1, 19, 0, 0).unwrap();
    let mut games = Vec::with_capacity(seasons as usize * games_per_season);

    for season in 0..seasons {
        let season_start = start + Duration::days(365 * season as i64);
        for i in 0..games_per_season {
            let home = i % TEAMS;
            let away = (home + 1 + (i / TEAMS) % (TEAMS - 1)) % TEAMS;
            games.push(GameRecord::new(
                format!("team{:02}", home),
                format!("team{:02}", away),
                season_start + Duration::hours(i as i64),
                2010 + season,
                (i * 7 + season as usize) % 3 != 0,
            ));
        }
    }

    games
}

fn bench_rating_calculation(c: &mut Criterion) {
    let calculator = EloCalculator::new(&RatingConfig::default()).unwrap();
    let game = GameRecord::new(
        "home",
        "away",
        Utc.with_ymd_and_hms(2019, 3, 28, 19, 5, 0).unwrap(),
        2019,
        true,
    );

    c.bench_function("elo_update_single_game", |b| {
        b.iter(|| {
            let update = calculator
                .calculate(black_box(1532.0), black_box(1488.0), &game)
                .unwrap();
            black_box(update);
        })
    });
}

fn bench_history_ingestion(c: &mut Criterion) {
    let games = create_schedule(5, 2430);
    let teams = teams_from_games(&games);

    c.bench_function("ingest_five_seasons", |b| {
        b.iter(|| {
            let mut tracker = EloTracker::new(teams.clone(), RatingConfig::default()).unwrap();
            let summary = tracker.add_history(black_box(&games)).unwrap();
            black_box(summary);
        })
    });

    c.bench_function("ingest_five_seasons_compact", |b| {
        b.iter(|| {
            let mut tracker = EloTracker::new(teams.clone(), RatingConfig::compact()).unwrap();
            let summary = tracker.add_history(black_box(&games)).unwrap();
            black_box(summary);
        })
    });
}

fn bench_reporting(c: &mut Criterion) {
    let games = create_schedule(3, 2430);
    let mut tracker = EloTracker::new(teams_from_games(&games), RatingConfig::default()).unwrap();
    tracker.add_history(&games).unwrap();

    c.bench_function("rating_distribution", |b| {
        b.iter(|| {
            let dist = tracker.rating_distribution().unwrap();
            black_box(dist.histogram(10));
        })
    });

    c.bench_function("team_timeline", |b| {
        b.iter(|| black_box(tracker.timeline(black_box("team07"))))
    });
}

criterion_group!(
    benches,
    bench_rating_calculation,
    bench_history_ingestion,
    bench_reporting
);
criterion_main!(benches);
