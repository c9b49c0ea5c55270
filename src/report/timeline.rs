//! Plot-ready rating series for a single team

use crate::types::{EntryKind, RatingEntry};
use crate::utils::previous_midnight;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team's rating at a moment in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub timestamp: DateTime<Utc>,
    pub rating: f64,
}

/// Turn a team's history into `(timestamp, rating)` points
///
/// A history that does not start with an opener entry gets a synthetic first
/// point at midnight the day before its first game. When a game starts from a
/// different rating than the previous point (a season regression with no
/// opener entry), a step point is inserted at the game's timestamp.
pub fn rating_timeline(history: &[RatingEntry]) -> Vec<TimelinePoint> {
    let mut points: Vec<TimelinePoint> = Vec::with_capacity(history.len() + 1);

    if let Some(first) = history.first() {
        if first.kind != EntryKind::SeasonOpener {
            points.push(TimelinePoint {
                timestamp: previous_midnight(first.timestamp),
                rating: first.rating_before,
            });
        }
    }

    for entry in history {
        if entry.kind == EntryKind::Game {
            if let Some(last) = points.last() {
                if last.rating != entry.rating_before {
                    points.push(TimelinePoint {
                        timestamp: entry.timestamp,
                        rating: entry.rating_before,
                    });
                }
            }
        }

        points.push(TimelinePoint {
            timestamp: entry.timestamp,
            rating: entry.rating_after,
        });
    }

    points
}
