//! Utility functions for the rating tracker

use crate::types::{GameRecord, TeamId};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::BTreeSet;

/// Every team that appears as home or away side in `games`
pub fn teams_from_games(games: &[GameRecord]) -> BTreeSet<TeamId> {
    games
        .iter()
        .flat_map(|game| [game.home_team.clone(), game.away_team.clone()])
        .collect()
}

/// Midnight at the start of the day before `timestamp`
pub fn previous_midnight(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let day_before = timestamp.date_naive() - Duration::days(1);
    day_before.and_time(NaiveTime::MIN).and_utc()
}

/// Parse an RFC 3339 timestamp, or a naive date/time taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_teams_from_games() {
        let ts = Utc.with_ymd_and_hms(2019, 4, 1, 19, 0, 0).unwrap();
        let games = vec![
            GameRecord::new("NYA", "BOS", ts, 2019, true),
            GameRecord::new("BOS", "TBA", ts, 2019, false),
        ];

        let teams = teams_from_games(&games);
        assert_eq!(teams.len(), 3);
        assert!(teams.contains("NYA"));
        assert!(teams.contains("TBA"));
    }

    #[test]
    fn test_previous_midnight() {
        let ts = Utc.with_ymd_and_hms(2019, 4, 1, 19, 5, 30).unwrap();
        assert_eq!(
            previous_midnight(ts),
            Utc.with_ymd_and_hms(2019, 3, 31, 0, 0, 0).unwrap()
        );

        let at_midnight = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            previous_midnight(at_midnight),
            Utc.with_ymd_and_hms(2018, 12, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 3, 28, 17, 5, 0).unwrap();
        assert_eq!(parse_timestamp("2019-03-28T17:05:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2019-03-28T13:05:00-04:00"), Some(expected));
        assert_eq!(parse_timestamp("2019-03-28 17:05:00+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2019-03-28 17:05:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2019-03-28 17:05 "), Some(expected));
        assert_eq!(
            parse_timestamp("2019-03-28"),
            Some(Utc.with_ymd_and_hms(2019, 3, 28, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("opening day"), None);
    }
}
