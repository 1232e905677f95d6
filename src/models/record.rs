//! Per-innings stat records — the raw observations produced by the
//! scraping collaborator and consumed by the aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Batting figures for a single innings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattingEntry {
    /// Runs scored
    pub runs: u32,

    /// Balls faced
    pub balls: u32,

    /// Fours hit
    pub fours: u32,

    /// Sixes hit
    pub sixes: u32,

    /// Whether the batter remained not out
    pub not_out: bool,
}

impl BattingEntry {
    pub fn new(runs: u32, balls: u32, fours: u32, sixes: u32, not_out: bool) -> Self {
        Self {
            runs,
            balls,
            fours,
            sixes,
            not_out,
        }
    }

    /// True if this innings reached a century (>= 100 runs).
    pub fn is_century(&self) -> bool {
        self.runs >= 100
    }

    /// True if this innings reached a half-century but not a century.
    /// Thresholds are mutually exclusive, evaluated in descending order.
    pub fn is_half_century(&self) -> bool {
        !self.is_century() && self.runs >= 50
    }
}

/// Bowling figures for a single innings.
///
/// `overs` uses the cricket "overs.balls" numeral: the fractional digit is
/// completed balls within the current over (0-5), not tenths. 31.2 means
/// 31 overs and 2 balls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowlingEntry {
    /// Overs bowled, in overs.balls notation
    pub overs: f64,

    /// Maiden overs
    pub maidens: u32,

    /// Runs conceded
    pub runs_conceded: u32,

    /// Wickets taken
    pub wickets: u32,
}

impl BowlingEntry {
    pub fn new(overs: f64, maidens: u32, runs_conceded: u32, wickets: u32) -> Self {
        Self {
            overs,
            maidens,
            runs_conceded,
            wickets,
        }
    }
}

/// One per-match observation for a player. Immutable once recorded.
///
/// A record with neither a batting nor a bowling entry is a "did not bat,
/// did not bowl" appearance and contributes nothing to any aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    /// Match date, when known (used only for chronological ordering)
    pub date: Option<NaiveDate>,

    /// Batting involvement, if any
    pub batting: Option<BattingEntry>,

    /// Bowling involvement, if any
    pub bowling: Option<BowlingEntry>,
}

impl PlayerStatRecord {
    /// A record with batting involvement only.
    pub fn batting_only(entry: BattingEntry) -> Self {
        Self {
            date: None,
            batting: Some(entry),
            bowling: None,
        }
    }

    /// A record with bowling involvement only.
    pub fn bowling_only(entry: BowlingEntry) -> Self {
        Self {
            date: None,
            batting: None,
            bowling: Some(entry),
        }
    }

    /// A record with both batting and bowling involvement.
    pub fn allround(batting: BattingEntry, bowling: BowlingEntry) -> Self {
        Self {
            date: None,
            batting: Some(batting),
            bowling: Some(bowling),
        }
    }

    /// Builder method to attach the match date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}
