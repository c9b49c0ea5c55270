//! Loading game records from disk
//!
//! Games are read from a JSON array, from JSON lines (one object per line)
//! when the file extension is `jsonl` or `ndjson`, or from a CSV file with a
//! header row when the extension is `csv`. Columns other than the ones
//! `GameRecord` names are kept in `extra`. The short column names `gid`,
//! `hometeam`, `visteam` and `homewon` are accepted in every format.

use crate::error::TrackerError;
use crate::types::{de, GameId, GameRecord, Season, TeamId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Column names a CSV row maps onto `GameRecord` fields
const CSV_COLUMNS: [&str; 10] = [
    "game_id", "gid", "home_team", "hometeam", "away_team", "visteam", "timestamp", "season",
    "home_won", "homewon",
];

#[derive(Deserialize)]
struct CsvGameRow {
    #[serde(default, alias = "gid")]
    game_id: Option<GameId>,
    #[serde(alias = "hometeam")]
    home_team: TeamId,
    #[serde(alias = "visteam")]
    away_team: TeamId,
    #[serde(deserialize_with = "de::timestamp")]
    timestamp: DateTime<Utc>,
    season: Season,
    #[serde(alias = "homewon", deserialize_with = "de::home_won")]
    home_won: bool,
}

enum Format {
    Json,
    JsonLines,
    Csv,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("jsonl") | Some("ndjson") => Format::JsonLines,
            Some("csv") => Format::Csv,
            _ => Format::Json,
        }
    }
}

/// Read every game record in `path`
pub fn load_games(path: &Path) -> crate::error::Result<Vec<GameRecord>> {
    let load_failed = |message: String| TrackerError::LoadFailed {
        path: path.display().to_string(),
        message,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;

    let games = match Format::of(path) {
        Format::Json => serde_json::from_str::<Vec<GameRecord>>(&contents)
            .map_err(|e| load_failed(e.to_string()))?,
        Format::JsonLines => parse_json_lines(&contents).map_err(load_failed)?,
        Format::Csv => parse_csv(&contents).map_err(load_failed)?,
    };

    info!("Loaded {} games from {}", games.len(), path.display());
    Ok(games)
}

fn parse_json_lines(contents: &str) -> Result<Vec<GameRecord>, String> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<GameRecord>(line)
                .map_err(|e| format!("line {}: {}", index + 1, e))
        })
        .collect()
}

fn parse_csv(contents: &str) -> Result<Vec<GameRecord>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());
    let headers = reader.headers().map_err(|e| e.to_string())?.clone();

    reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let row_error = |e: csv::Error| format!("row {}: {}", index + 1, e);
            let record = record.map_err(row_error)?;
            let row: CsvGameRow = record.deserialize(Some(&headers)).map_err(row_error)?;

            let extra = headers
                .iter()
                .zip(record.iter())
                .filter(|(column, _)| !column.is_empty() && !CSV_COLUMNS.contains(column))
                .map(|(column, value)| {
                    (column.to_string(), serde_json::Value::String(value.to_string()))
                })
                .collect();

            Ok(GameRecord {
                game_id: row.game_id,
                home_team: row.home_team,
                away_team: row.away_team,
                timestamp: row.timestamp,
                season: row.season,
                home_won: row.home_won,
                extra,
            })
        })
        .collect()
}

/// Stable sort into ingestion order: by timestamp, then season
pub fn sort_chronologically(games: &mut [GameRecord]) {
    games.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then(a.season.cmp(&b.season))
    });
    debug!("Sorted {} games chronologically", games.len());
}
