//! Team and result graph storage
//!
//! This module defines the interface for persisting team nodes, played edges
//! and the mutable rating attribute, with an in-memory implementation.

use crate::error::{RatingError, Result};
use crate::types::{GameId, MatchedResult, TeamName, TeamRating};
use crate::utils::current_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage entry for a team node with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: TeamName,
    pub rating: TeamRating,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TeamEntry {
    /// Create a new entry for a freshly registered team
    pub fn new(name: TeamName, initial_rating: TeamRating) -> Self {
        let now = current_timestamp();
        Self {
            name,
            rating: initial_rating,
            last_updated: now,
            created_at: now,
        }
    }

    /// Overwrite the rating attribute
    pub fn set_rating(&mut self, value: f64) {
        self.rating.rating = value;
        self.last_updated = current_timestamp();
    }
}

/// A directed played edge carrying the points the `from` team scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedEdge {
    pub game_id: GameId,
    pub from: TeamName,
    pub to: TeamName,
    pub points: u32,
}

/// Trait for graph storage operations
///
/// A game is fully recorded once both directed edges exist for its game id.
/// The first recorded edge of a game is treated as the home side when the
/// matched pair is reassembled.
pub trait GraphStore: Send + Sync {
    /// Register a team node, creating it with the baseline rating if absent.
    /// Re-registering an existing team must not touch its rating.
    fn upsert_team(&self, name: &str) -> Result<()>;

    /// Record both directed edges for a game. Idempotent per game id.
    /// Both teams must already be registered.
    fn upsert_result(
        &self,
        game_id: GameId,
        home_team: &str,
        away_team: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<()>;

    /// Reset every known team's rating to `baseline`, unconditionally
    fn initialize_ratings(&self, baseline: f64) -> Result<()>;

    /// Current rating of a team
    fn get_rating(&self, name: &str) -> Result<f64>;

    /// Unconditionally overwrite a team's rating
    fn set_rating(&self, name: &str, value: f64) -> Result<()>;

    /// All fully recorded games. Games with only one edge recorded are
    /// silently excluded. No ordering is guaranteed.
    fn all_matched_results(&self) -> Result<Vec<MatchedResult>>;

    /// All registered teams with their current ratings
    fn all_teams(&self) -> Result<Vec<TeamEntry>>;

    /// Number of registered teams
    fn team_count(&self) -> Result<usize>;
}

/// In-memory graph store implementation
#[derive(Debug)]
pub struct InMemoryGraphStore {
    baseline_rating: f64,
    teams: RwLock<HashMap<TeamName, TeamEntry>>,
    edges: RwLock<HashMap<GameId, Vec<PlayedEdge>>>,
}

impl InMemoryGraphStore {
    /// Create a new in-memory graph store with the given baseline rating
    pub fn new(baseline_rating: f64) -> Self {
        Self {
            baseline_rating,
            teams: RwLock::new(HashMap::new()),
            edges: RwLock::new(HashMap::new()),
        }
    }

    /// Record a single directed edge without its reciprocal.
    ///
    /// `upsert_result` is the normal path; this exists so callers (and tests)
    /// can represent half-recorded games, which `all_matched_results` must
    /// exclude. Merge semantics: an identical edge is not duplicated.
    pub fn insert_played_edge(&self, edge: PlayedEdge) -> Result<()> {
        {
            let teams = self
                .teams
                .read()
                .map_err(|_| RatingError::InternalError {
                    message: "Failed to acquire team read lock".to_string(),
                })?;
            for name in [&edge.from, &edge.to] {
                if !teams.contains_key(name.as_str()) {
                    return Err(RatingError::UnregisteredTeam {
                        game_id: edge.game_id,
                        name: name.clone(),
                    }
                    .into());
                }
            }
        }

        let mut edges = self
            .edges
            .write()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire edge write lock".to_string(),
            })?;

        let game_edges = edges.entry(edge.game_id).or_default();
        if !game_edges.contains(&edge) {
            game_edges.push(edge);
        }

        Ok(())
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new(1500.0)
    }
}

impl GraphStore for InMemoryGraphStore {
    fn upsert_team(&self, name: &str) -> Result<()> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire team write lock".to_string(),
            })?;

        teams.entry(name.to_string()).or_insert_with(|| {
            TeamEntry::new(
                name.to_string(),
                TeamRating {
                    rating: self.baseline_rating,
                },
            )
        });

        Ok(())
    }

    fn upsert_result(
        &self,
        game_id: GameId,
        home_team: &str,
        away_team: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<()> {
        {
            let teams = self
                .teams
                .read()
                .map_err(|_| RatingError::InternalError {
                    message: "Failed to acquire team read lock".to_string(),
                })?;
            for name in [home_team, away_team] {
                if !teams.contains_key(name) {
                    return Err(RatingError::UnregisteredTeam {
                        game_id,
                        name: name.to_string(),
                    }
                    .into());
                }
            }
        }

        let mut edges = self
            .edges
            .write()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire edge write lock".to_string(),
            })?;

        // Idempotent per game id: a re-submitted game is a no-op, not a duplicate
        if edges.contains_key(&game_id) {
            return Ok(());
        }

        edges.insert(
            game_id,
            vec![
                PlayedEdge {
                    game_id,
                    from: home_team.to_string(),
                    to: away_team.to_string(),
                    points: home_score,
                },
                PlayedEdge {
                    game_id,
                    from: away_team.to_string(),
                    to: home_team.to_string(),
                    points: away_score,
                },
            ],
        );

        Ok(())
    }

    fn initialize_ratings(&self, baseline: f64) -> Result<()> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire team write lock".to_string(),
            })?;

        for entry in teams.values_mut() {
            entry.set_rating(baseline);
        }

        Ok(())
    }

    fn get_rating(&self, name: &str) -> Result<f64> {
        let teams = self
            .teams
            .read()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire team read lock".to_string(),
            })?;

        teams
            .get(name)
            .map(|entry| entry.rating.rating)
            .ok_or_else(|| {
                RatingError::TeamNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn set_rating(&self, name: &str, value: f64) -> Result<()> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire team write lock".to_string(),
            })?;

        match teams.get_mut(name) {
            Some(entry) => {
                entry.set_rating(value);
                Ok(())
            }
            None => Err(RatingError::TeamNotFound {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn all_matched_results(&self) -> Result<Vec<MatchedResult>> {
        let edges = self
            .edges
            .read()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire edge read lock".to_string(),
            })?;

        let mut results = Vec::new();
        for (game_id, game_edges) in edges.iter() {
            let Some(home_edge) = game_edges.first() else {
                continue;
            };
            let away_edge = game_edges
                .iter()
                .find(|e| e.from == home_edge.to && e.to == home_edge.from);

            // Half-recorded games stay invisible until the reciprocal edge lands
            if let Some(away_edge) = away_edge {
                results.push(MatchedResult {
                    game_id: *game_id,
                    home_team: home_edge.from.clone(),
                    home_score: home_edge.points,
                    away_team: away_edge.from.clone(),
                    away_score: away_edge.points,
                });
            }
        }

        Ok(results)
    }

    fn all_teams(&self) -> Result<Vec<TeamEntry>> {
        let teams = self
            .teams
            .read()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire team read lock".to_string(),
            })?;

        Ok(teams.values().cloned().collect())
    }

    fn team_count(&self) -> Result<usize> {
        let teams = self
            .teams
            .read()
            .map_err(|_| RatingError::InternalError {
                message: "Failed to acquire team read lock".to_string(),
            })?;

        Ok(teams.len())
    }
}

/// Graph store wrapper that records rating writes, for testing
#[derive(Debug, Default)]
pub struct RecordingGraphStore {
    inner: InMemoryGraphStore,
    set_rating_calls: RwLock<Vec<(TeamName, f64)>>,
}

impl RecordingGraphStore {
    pub fn new(baseline_rating: f64) -> Self {
        Self {
            inner: InMemoryGraphStore::new(baseline_rating),
            set_rating_calls: RwLock::new(Vec::new()),
        }
    }

    /// All `set_rating` calls made, in order (for testing)
    pub fn set_rating_calls(&self) -> Vec<(TeamName, f64)> {
        self.set_rating_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls (for testing)
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.set_rating_calls.write() {
            calls.clear();
        }
    }
}

impl GraphStore for RecordingGraphStore {
    fn upsert_team(&self, name: &str) -> Result<()> {
        self.inner.upsert_team(name)
    }

    fn upsert_result(
        &self,
        game_id: GameId,
        home_team: &str,
        away_team: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<()> {
        self.inner
            .upsert_result(game_id, home_team, away_team, home_score, away_score)
    }

    fn initialize_ratings(&self, baseline: f64) -> Result<()> {
        self.inner.initialize_ratings(baseline)
    }

    fn get_rating(&self, name: &str) -> Result<f64> {
        self.inner.get_rating(name)
    }

    fn set_rating(&self, name: &str, value: f64) -> Result<()> {
        if let Ok(mut calls) = self.set_rating_calls.write() {
            calls.push((name.to_string(), value));
        }
        self.inner.set_rating(name, value)
    }

    fn all_matched_results(&self) -> Result<Vec<MatchedResult>> {
        self.inner.all_matched_results()
    }

    fn all_teams(&self) -> Result<Vec<TeamEntry>> {
        self.inner.all_teams()
    }

    fn team_count(&self) -> Result<usize> {
        self.inner.team_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_teams(names: &[&str]) -> InMemoryGraphStore {
        let store = InMemoryGraphStore::default();
        for name in names {
            store.upsert_team(name).unwrap();
        }
        store
    }

    #[test]
    fn test_upsert_team_creates_with_baseline() {
        let store = InMemoryGraphStore::new(1200.0);
        store.upsert_team("Bears").unwrap();

        assert_eq!(store.get_rating("Bears").unwrap(), 1200.0);
        assert_eq!(store.team_count().unwrap(), 1);
    }

    #[test]
    fn test_upsert_team_is_idempotent() {
        let store = store_with_teams(&["Bears"]);
        store.set_rating("Bears", 1612.5).unwrap();

        // Re-registering mid-season must not erase the accumulated rating
        store.upsert_team("Bears").unwrap();

        assert_eq!(store.team_count().unwrap(), 1);
        assert_eq!(store.get_rating("Bears").unwrap(), 1612.5);
    }

    #[test]
    fn test_get_rating_unknown_team() {
        let store = InMemoryGraphStore::default();
        let err = store.get_rating("Packers").unwrap_err();

        match err.downcast_ref::<RatingError>() {
            Some(RatingError::TeamNotFound { name }) => assert_eq!(name, "Packers"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_set_rating_unknown_team() {
        let store = InMemoryGraphStore::default();
        assert!(store.set_rating("Packers", 1500.0).is_err());
    }

    #[test]
    fn test_upsert_result_requires_registered_teams() {
        let store = store_with_teams(&["Bears"]);
        let err = store.upsert_result(1, "Bears", "Packers", 24, 10).unwrap_err();

        match err.downcast_ref::<RatingError>() {
            Some(RatingError::UnregisteredTeam { game_id, name }) => {
                assert_eq!(*game_id, 1);
                assert_eq!(name, "Packers");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_upsert_result_records_matched_pair() {
        let store = store_with_teams(&["Bears", "Packers"]);
        store.upsert_result(7, "Bears", "Packers", 24, 10).unwrap();

        let results = store.all_matched_results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0],
            MatchedResult {
                game_id: 7,
                home_team: "Bears".to_string(),
                home_score: 24,
                away_team: "Packers".to_string(),
                away_score: 10,
            }
        );
    }

    #[test]
    fn test_upsert_result_is_idempotent_per_game_id() {
        let store = store_with_teams(&["Bears", "Packers"]);
        store.upsert_result(7, "Bears", "Packers", 24, 10).unwrap();
        store.upsert_result(7, "Bears", "Packers", 24, 10).unwrap();

        assert_eq!(store.all_matched_results().unwrap().len(), 1);
    }

    #[test]
    fn test_half_recorded_game_is_excluded() {
        let store = store_with_teams(&["Bears", "Packers"]);
        store
            .insert_played_edge(PlayedEdge {
                game_id: 3,
                from: "Bears".to_string(),
                to: "Packers".to_string(),
                points: 17,
            })
            .unwrap();

        assert!(store.all_matched_results().unwrap().is_empty());

        // The game becomes visible once the reciprocal edge lands
        store
            .insert_played_edge(PlayedEdge {
                game_id: 3,
                from: "Packers".to_string(),
                to: "Bears".to_string(),
                points: 20,
            })
            .unwrap();

        let results = store.all_matched_results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].home_team, "Bears");
        assert_eq!(results[0].away_score, 20);
    }

    #[test]
    fn test_initialize_ratings_overwrites_everything() {
        let store = store_with_teams(&["Bears", "Packers"]);
        store.set_rating("Bears", 1710.0).unwrap();
        store.set_rating("Packers", 1290.0).unwrap();

        store.initialize_ratings(1500.0).unwrap();

        assert_eq!(store.get_rating("Bears").unwrap(), 1500.0);
        assert_eq!(store.get_rating("Packers").unwrap(), 1500.0);
    }

    #[test]
    fn test_all_teams_snapshot() {
        let store = store_with_teams(&["Bears", "Packers", "Lions"]);
        let mut names: Vec<_> = store
            .all_teams()
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["Bears", "Lions", "Packers"]);
    }

    #[test]
    fn test_recording_store_captures_rating_writes() {
        let store = RecordingGraphStore::new(1500.0);
        store.upsert_team("Bears").unwrap();
        store.upsert_team("Packers").unwrap();

        store.set_rating("Bears", 1510.0).unwrap();
        store.set_rating("Packers", 1490.0).unwrap();

        let calls = store.set_rating_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("Bears".to_string(), 1510.0));
        assert_eq!(calls[1], ("Packers".to_string(), 1490.0));

        store.clear_calls();
        assert!(store.set_rating_calls().is_empty());
    }
}
