//! Season-aware Elo rating tracker
//!
//! `EloTracker` owns one rating history per team and folds a chronologically
//! ordered stream of games into it. For every game it derives each team's
//! starting state (bootstrap, season rollover or carry-over), applies the Elo
//! update and appends one game entry per team. Optionally, a season-opener
//! entry is appended first whenever a team starts a new season.
//!
//! Games must be fed in chronological order per team. With
//! `strict_ordering` enabled a game that moves a team backwards in time or
//! season is rejected; otherwise such input is accepted as-is.

use crate::config::RatingConfig;
use crate::error::TrackerError;
use crate::metrics::MetricsCollector;
use crate::rating::calculator::EloCalculator;
use crate::rating::history::TeamHistories;
use crate::rating::probability::{LogisticElo, WinProbability};
use crate::report::{rating_timeline, RatingDistribution, TimelinePoint};
use crate::types::{
    EntryKind, GameRecord, IngestSummary, RatingEntry, Season, StartingState, TeamId,
};
use crate::utils::previous_midnight;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rating history tracker for a fixed roster of teams
pub struct EloTracker {
    config: RatingConfig,
    calculator: EloCalculator,
    histories: TeamHistories,
    metrics: Option<Arc<MetricsCollector>>,
}

impl std::fmt::Debug for EloTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EloTracker")
            .field("config", &self.config)
            .field("calculator", &self.calculator)
            .field("teams", &self.histories.len())
            .field("entries", &self.histories.total_entries())
            .finish()
    }
}

impl EloTracker {
    /// Create a tracker using the logistic Elo win probability
    pub fn new<I, T>(teams: I, config: RatingConfig) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamId>,
    {
        Self::with_win_probability(teams, config, LogisticElo)
    }

    /// Create a tracker with a custom win probability model
    pub fn with_win_probability<I, T>(
        teams: I,
        config: RatingConfig,
        probability: impl WinProbability + 'static,
    ) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamId>,
    {
        let calculator = EloCalculator::with_win_probability(&config, probability)?;
        let histories = TeamHistories::new(teams);

        debug!(
            teams = histories.len(),
            initial_rating = config.initial_rating,
            k_factor = config.k_factor,
            arithmetic = %config.arithmetic,
            "Created rating tracker"
        );

        Ok(Self {
            config,
            calculator,
            histories,
            metrics: None,
        })
    }

    /// Report ingestion to the given collector
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        metrics.set_teams_tracked(self.histories.len());
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn histories(&self) -> &TeamHistories {
        &self.histories
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamId> {
        self.histories.teams()
    }

    /// Full ordered history of a team
    pub fn history(&self, team: &str) -> Option<&[RatingEntry]> {
        self.histories.get(team)
    }

    /// Most recent entry of a team
    pub fn latest(&self, team: &str) -> Option<&RatingEntry> {
        self.histories.latest(team)
    }

    /// Current rating of a known team; the initial rating until it has played
    pub fn current_rating(&self, team: &str) -> Option<f64> {
        let history = self.histories.get(team)?;
        Some(
            history
                .last()
                .map_or(self.config.initial_rating, |entry| entry.rating_after),
        )
    }

    /// Latest rating of every team that has at least one entry
    pub fn latest_ratings(&self) -> BTreeMap<TeamId, f64> {
        self.histories
            .iter()
            .filter_map(|(team, history)| {
                history
                    .last()
                    .map(|entry| (team.clone(), entry.rating_after))
            })
            .collect()
    }

    /// Summary of the latest ratings across teams, `None` before any game
    pub fn rating_distribution(&self) -> Option<RatingDistribution> {
        let ratings: Vec<f64> = self.latest_ratings().into_values().collect();
        RatingDistribution::from_ratings(&ratings)
    }

    /// Plot-ready rating series for a team
    pub fn timeline(&self, team: &str) -> Option<Vec<TimelinePoint>> {
        self.histories.get(team).map(rating_timeline)
    }

    /// Derive the rating and tallies a team starts a game of `season` with
    pub fn starting_state(&self, team: &str, season: Season) -> crate::error::Result<StartingState> {
        let history = self
            .histories
            .get(team)
            .ok_or_else(|| TrackerError::UnknownTeam {
                team: team.to_string(),
            })?;

        let state = match history.last() {
            None => StartingState {
                rating: self.config.initial_rating,
                wins: 0,
                losses: 0,
                is_season_opener: true,
                previous_rating: None,
            },
            Some(last) if last.season < season => StartingState {
                rating: self.calculator.regress(
                    last.rating_after,
                    self.config.initial_rating,
                    self.config.season_regression,
                ),
                wins: 0,
                losses: 0,
                is_season_opener: true,
                previous_rating: Some(last.rating_after),
            },
            Some(last) => StartingState {
                rating: last.rating_after,
                wins: last.wins,
                losses: last.losses,
                is_season_opener: false,
                previous_rating: None,
            },
        };

        Ok(state)
    }

    /// Ingest a batch of games in the order given
    ///
    /// Stops at the first rejected game. Games before it stay applied; the
    /// rejected game leaves no entries behind.
    pub fn add_history(&mut self, games: &[GameRecord]) -> crate::error::Result<IngestSummary> {
        let timer = self.metrics.as_ref().map(|metrics| metrics.start_timer());
        let mut summary = IngestSummary::default();

        for game in games {
            match self.add_game(game) {
                Ok(game_summary) => summary.absorb(&game_summary),
                Err(e) => {
                    warn!(
                        game_id = game.game_id.as_deref().unwrap_or("-"),
                        home = %game.home_team,
                        away = %game.away_team,
                        "Rejected game after {} ingested: {}",
                        summary.games,
                        e
                    );
                    if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
                        metrics.record_error(error_reason(&e));
                        metrics.record_ingest_duration(timer.stop());
                    }
                    return Err(e);
                }
            }
        }

        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_ingest_duration(timer.stop());
        }

        info!(
            games = summary.games,
            entries = summary.entries,
            season_rollovers = summary.season_rollovers,
            "Ingested game batch"
        );

        Ok(summary)
    }

    /// Ingest a single game
    pub fn add_game(&mut self, game: &GameRecord) -> crate::error::Result<IngestSummary> {
        self.validate_game(game)?;

        let home_state = self.starting_state(&game.home_team, game.season)?;
        let away_state = self.starting_state(&game.away_team, game.season)?;
        let update = self
            .calculator
            .calculate(home_state.rating, away_state.rating, game)?;

        // Nothing below can fail for a validated game, so both teams' entries land together
        let mut summary = IngestSummary {
            games: 1,
            ..IngestSummary::default()
        };

        for (team, state) in [(&game.home_team, &home_state), (&game.away_team, &away_state)] {
            if let Some(previous) = state.previous_rating {
                debug!(
                    team = %team,
                    season = game.season,
                    previous,
                    regressed = state.rating,
                    "Season rollover"
                );
                summary.season_rollovers += 1;
                if let Some(metrics) = &self.metrics {
                    metrics.record_rollover();
                }
            }

            if self.config.emit_season_openers && state.is_season_opener {
                let opener = self.opener_entry(team, state, game);
                self.append(team, opener)?;
                summary.entries += 1;
                summary.openers_materialized += 1;
            }
        }

        let home_entry = game_entry(game, &home_state, update.home_after, game.home_won);
        let away_entry = game_entry(game, &away_state, update.away_after, !game.home_won);
        self.append(&game.home_team, home_entry)?;
        self.append(&game.away_team, away_entry)?;
        summary.entries += 2;

        if let Some(metrics) = &self.metrics {
            metrics.record_game();
        }

        debug!(
            game_id = game.game_id.as_deref().unwrap_or("-"),
            home = %game.home_team,
            away = %game.away_team,
            p_home = update.home_win_probability,
            home_delta = update.home_delta(),
            "Applied game"
        );

        Ok(summary)
    }

    fn validate_game(&self, game: &GameRecord) -> crate::error::Result<()> {
        if game.home_team == game.away_team {
            return Err(TrackerError::InvalidGame {
                reason: format!("team {} cannot play itself", game.home_team),
            }
            .into());
        }

        for team in [&game.home_team, &game.away_team] {
            let history = self
                .histories
                .get(team)
                .ok_or_else(|| TrackerError::UnknownTeam { team: team.clone() })?;

            if !self.config.strict_ordering {
                continue;
            }

            if let Some(last) = history.last() {
                if game.season < last.season {
                    return Err(TrackerError::OutOfOrderInput {
                        team: team.clone(),
                        reason: format!(
                            "season {} precedes last recorded season {}",
                            game.season, last.season
                        ),
                    }
                    .into());
                }
                if game.timestamp < last.timestamp {
                    return Err(TrackerError::OutOfOrderInput {
                        team: team.clone(),
                        reason: format!(
                            "game at {} precedes last recorded entry at {}",
                            game.timestamp, last.timestamp
                        ),
                    }
                    .into());
                }
            }
        }

        Ok(())
    }

    fn opener_entry(&self, team: &str, state: &StartingState, game: &GameRecord) -> RatingEntry {
        let mut timestamp = previous_midnight(game.timestamp);
        if let Some(last) = self.histories.latest(team) {
            timestamp = timestamp.max(last.timestamp);
        }

        RatingEntry {
            game_id: None,
            kind: EntryKind::SeasonOpener,
            timestamp: timestamp.min(game.timestamp),
            rating_before: state.previous_rating.unwrap_or(state.rating),
            rating_after: state.rating,
            won: false,
            wins: 0,
            losses: 0,
            season: game.season,
            is_season_opener: true,
        }
    }

    fn append(&mut self, team: &str, entry: RatingEntry) -> crate::error::Result<()> {
        let kind = entry.kind;
        self.histories.push(team, entry)?;
        if let Some(metrics) = &self.metrics {
            metrics.record_entry(kind);
        }
        Ok(())
    }
}

fn game_entry(
    game: &GameRecord,
    state: &StartingState,
    rating_after: f64,
    won: bool,
) -> RatingEntry {
    RatingEntry {
        game_id: game.game_id.clone(),
        kind: EntryKind::Game,
        timestamp: game.timestamp,
        rating_before: state.rating,
        rating_after,
        won,
        wins: state.wins + u32::from(won),
        losses: state.losses + u32::from(!won),
        season: game.season,
        is_season_opener: state.is_season_opener,
    }
}

/// Metric label for a rejected game
fn error_reason(error: &anyhow::Error) -> &'static str {
    match error.downcast_ref::<TrackerError>() {
        Some(TrackerError::UnknownTeam { .. }) => "unknown_team",
        Some(TrackerError::InvalidGame { .. }) => "invalid_game",
        Some(TrackerError::OutOfOrderInput { .. }) => "out_of_order",
        Some(TrackerError::InvalidProbability { .. }) => "invalid_probability",
        _ => "other",
    }
}
