//! External stat-source collaborators.
//!
//! The core treats scraped statistics as already-resolved values; this
//! module is the boundary where they come from. All sources implement the
//! `StatSource` trait. Network latency, retries and timeouts live here and
//! nowhere else.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BattingAggregate, DisciplineStats, MatchupRecord, PlayerStatRecord};

pub mod client;
pub mod cricmetric;
pub mod espn;
pub mod web;

pub use client::SourceClient;
pub use web::WebStatSource;

/// Errors that can occur while fetching or parsing source data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Required table not found: {0}")]
    TableNotFound(String),

    #[error("Malformed table structure: {0}")]
    MalformedTable(String),

    #[error("Could not resolve player ID for '{name}' after {attempts} attempts")]
    PlayerNotFound { name: String, attempts: u32 },
}

/// Retry policy for source fetches: bounded attempt count, fixed delay.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay_ms: 250,
        }
    }
}

/// Which discipline's table to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Batting,
    Bowling,
}

impl Discipline {
    /// Query-parameter value used by the stats site.
    pub fn as_query(&self) -> &'static str {
        match self {
            Discipline::Batting => "batting",
            Discipline::Bowling => "bowling",
        }
    }
}

/// Career-stats filter: by opposition or by venue, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerFilter {
    Opposition(u32),
    Venue(u32),
}

/// A provider of resolved statistical records.
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Source identifier for logging.
    fn name(&self) -> &'static str;

    /// Per-innings records for a player's recent history, oldest first.
    async fn recent_innings(
        &self,
        player_id: u32,
        discipline: Discipline,
    ) -> Result<Vec<PlayerStatRecord>, SourceError>;

    /// Career aggregates restricted by opposition or venue.
    async fn career_stats(
        &self,
        player_id: u32,
        discipline: Discipline,
        filter: CareerFilter,
    ) -> Result<DisciplineStats, SourceError>;

    /// Head-to-head totals for a batter/bowler pairing. Ok(None) means the
    /// pair have simply never faced each other — not a failure.
    async fn matchup_totals(
        &self,
        batter: &str,
        bowler: &str,
    ) -> Result<Option<MatchupRecord>, SourceError>;

    /// Career batting splits against (pace, spin).
    async fn type_splits(
        &self,
        player_name: &str,
    ) -> Result<(BattingAggregate, BattingAggregate), SourceError>;
}

/// In-memory source with canned responses, for tests and offline runs.
pub struct MockStatSource {
    pub innings: Vec<PlayerStatRecord>,
    pub career: DisciplineStats,
    pub matchup: Option<MatchupRecord>,
    pub splits: (BattingAggregate, BattingAggregate),
}

impl Default for MockStatSource {
    fn default() -> Self {
        Self {
            innings: Vec::new(),
            career: DisciplineStats::default(),
            matchup: None,
            splits: (BattingAggregate::default(), BattingAggregate::default()),
        }
    }
}

#[async_trait]
impl StatSource for MockStatSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn recent_innings(
        &self,
        _player_id: u32,
        _discipline: Discipline,
    ) -> Result<Vec<PlayerStatRecord>, SourceError> {
        Ok(self.innings.clone())
    }

    async fn career_stats(
        &self,
        _player_id: u32,
        _discipline: Discipline,
        _filter: CareerFilter,
    ) -> Result<DisciplineStats, SourceError> {
        Ok(self.career)
    }

    async fn matchup_totals(
        &self,
        _batter: &str,
        _bowler: &str,
    ) -> Result<Option<MatchupRecord>, SourceError> {
        Ok(self.matchup)
    }

    async fn type_splits(
        &self,
        _player_name: &str,
    ) -> Result<(BattingAggregate, BattingAggregate), SourceError> {
        Ok(self.splits)
    }
}
