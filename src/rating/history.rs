//! Per-team rating history storage
//!
//! `TeamHistories` owns every team's ordered list of rating entries. The
//! roster is fixed at construction: appending for a team that was never
//! registered is an error rather than an implicit insert.

use crate::error::TrackerError;
use crate::types::{RatingEntry, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owned collection of per-team rating histories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamHistories {
    entries: BTreeMap<TeamId, Vec<RatingEntry>>,
}

impl TeamHistories {
    /// Create an empty history for every given team
    pub fn new<I, T>(teams: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TeamId>,
    {
        Self {
            entries: teams
                .into_iter()
                .map(|team| (team.into(), Vec::new()))
                .collect(),
        }
    }

    pub fn contains(&self, team: &str) -> bool {
        self.entries.contains_key(team)
    }

    /// Full ordered history of a team
    pub fn get(&self, team: &str) -> Option<&[RatingEntry]> {
        self.entries.get(team).map(Vec::as_slice)
    }

    /// Most recent entry of a team, `None` if unknown or empty
    pub fn latest(&self, team: &str) -> Option<&RatingEntry> {
        self.entries.get(team).and_then(|history| history.last())
    }

    /// Append an entry to a registered team's history
    pub fn push(&mut self, team: &str, entry: RatingEntry) -> crate::error::Result<()> {
        let history = self
            .entries
            .get_mut(team)
            .ok_or_else(|| TrackerError::UnknownTeam {
                team: team.to_string(),
            })?;

        history.push(entry);
        Ok(())
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamId, &[RatingEntry])> {
        self.entries
            .iter()
            .map(|(team, history)| (team, history.as_slice()))
    }

    /// Number of registered teams
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries across all teams
    pub fn total_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}
