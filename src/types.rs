//! Common types used throughout the rating tracker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a team
pub type TeamId = String;

/// Opaque identifier for a game in the source data
pub type GameId = String;

/// Ordinal season number
pub type Season = u32;

/// A single game result as consumed by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default, alias = "gid")]
    pub game_id: Option<GameId>,
    #[serde(alias = "hometeam")]
    pub home_team: TeamId,
    #[serde(alias = "visteam")]
    pub away_team: TeamId,
    #[serde(deserialize_with = "de::timestamp")]
    pub timestamp: DateTime<Utc>,
    pub season: Season,
    /// Accepts `true`/`false` as well as `1`/`0`
    #[serde(alias = "homewon", deserialize_with = "de::home_won")]
    pub home_won: bool,
    /// Any other columns, handed untouched to the win probability function
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GameRecord {
    /// Create a game record without an id or extra fields
    pub fn new(
        home_team: impl Into<TeamId>,
        away_team: impl Into<TeamId>,
        timestamp: DateTime<Utc>,
        season: Season,
        home_won: bool,
    ) -> Self {
        Self {
            game_id: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            timestamp,
            season,
            home_won,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach a source game id
    pub fn with_game_id(mut self, game_id: impl Into<GameId>) -> Self {
        self.game_id = Some(game_id.into());
        self
    }

    /// Attach an extra context field
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// 1.0 if the home side won, else 0.0
    pub fn home_score(&self) -> f64 {
        if self.home_won {
            1.0
        } else {
            0.0
        }
    }
}

/// What produced a rating entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// The result of a played game
    Game,
    /// Materialized start of a team's season (first ever, or after rollover)
    SeasonOpener,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Game => write!(f, "game"),
            EntryKind::SeasonOpener => write!(f, "season_opener"),
        }
    }
}

/// One row of a team's rating history. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub game_id: Option<GameId>,
    pub kind: EntryKind,
    pub timestamp: DateTime<Utc>,
    pub rating_before: f64,
    pub rating_after: f64,
    pub won: bool,
    /// Wins through this entry, counted since the last season reset
    pub wins: u32,
    /// Losses through this entry, counted since the last season reset
    pub losses: u32,
    pub season: Season,
    pub is_season_opener: bool,
}

impl RatingEntry {
    pub fn is_game(&self) -> bool {
        self.kind == EntryKind::Game
    }

    /// Signed rating movement of this entry
    pub fn rating_delta(&self) -> f64 {
        self.rating_after - self.rating_before
    }

    pub fn games_in_season(&self) -> u32 {
        self.wins + self.losses
    }
}

/// A team's state right before a game is applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingState {
    pub rating: f64,
    pub wins: u32,
    pub losses: u32,
    pub is_season_opener: bool,
    /// Rating carried in from the previous season when a rollover regressed it
    pub previous_rating: Option<f64>,
}

impl StartingState {
    pub fn is_rollover(&self) -> bool {
        self.previous_rating.is_some()
    }
}

/// Totals for one ingestion call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub games: usize,
    pub entries: usize,
    pub season_rollovers: usize,
    pub openers_materialized: usize,
}

impl IngestSummary {
    pub(crate) fn absorb(&mut self, other: &IngestSummary) {
        self.games += other.games;
        self.entries += other.entries;
        self.season_rollovers += other.season_rollovers;
        self.openers_materialized += other.openers_materialized;
    }
}

/// Lenient deserializers for game data exported by other tools
pub(crate) mod de {
    use chrono::{DateTime, Utc};
    use serde::de::{Error, Unexpected, Visitor};
    use serde::{Deserialize, Deserializer};
    use std::fmt;

    pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::utils::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn home_won<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(OutcomeVisitor)
    }

    struct OutcomeVisitor;

    impl<'de> Visitor<'de> for OutcomeVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or 0/1")
        }

        fn visit_bool<E: Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Unsigned(value), &self)),
            }
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(Unexpected::Signed(value), &self)),
            }
        }

        fn visit_f64<E: Error>(self, value: f64) -> Result<bool, E> {
            if value == 0.0 {
                Ok(false)
            } else if value == 1.0 {
                Ok(true)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<bool, E> {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" => Ok(false),
                _ => Err(E::invalid_value(Unexpected::Str(value), &self)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_game_record_accepts_source_column_names() {
        let game: GameRecord = serde_json::from_value(serde_json::json!({
            "gid": "BOS201904090",
            "hometeam": "BOS",
            "visteam": "TOR",
            "timestamp": "2019-04-09 23:10:00",
            "season": 2019,
            "homewon": 0,
            "park": "BOS07"
        }))
        .unwrap();

        assert_eq!(game.game_id.as_deref(), Some("BOS201904090"));
        assert_eq!(game.home_team, "BOS");
        assert_eq!(game.away_team, "TOR");
        assert_eq!(game.timestamp, Utc.with_ymd_and_hms(2019, 4, 9, 23, 10, 0).unwrap());
        assert!(!game.home_won);
        assert_eq!(game.extra.get("park"), Some(&serde_json::json!("BOS07")));
    }

    #[test]
    fn test_home_won_outcome_forms() {
        let parse = |outcome: serde_json::Value| {
            serde_json::from_value::<GameRecord>(serde_json::json!({
                "home_team": "A",
                "away_team": "B",
                "timestamp": "2019-04-01T17:05:00Z",
                "season": 1,
                "home_won": outcome
            }))
        };

        assert!(parse(serde_json::json!(true)).unwrap().home_won);
        assert!(parse(serde_json::json!(1)).unwrap().home_won);
        assert!(!parse(serde_json::json!("0")).unwrap().home_won);
        assert!(parse(serde_json::json!(2)).is_err());
        assert!(parse(serde_json::json!("maybe")).is_err());
    }

    #[test]
    fn test_games_in_season_counts_tallies() {
        let entry = RatingEntry {
            game_id: None,
            kind: EntryKind::Game,
            timestamp: Utc.with_ymd_and_hms(2019, 4, 1, 17, 5, 0).unwrap(),
            rating_before: 1500.0,
            rating_after: 1512.5,
            won: true,
            wins: 3,
            losses: 2,
            season: 2019,
            is_season_opener: false,
        };

        assert_eq!(entry.games_in_season(), 5);
        assert_eq!(entry.rating_delta(), 12.5);
    }
}
