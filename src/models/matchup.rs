//! Head-to-head matchup model — aggregated totals for one batter-vs-bowler
//! pairing across all known historical deliveries.

use serde::{Deserialize, Serialize};

use super::stats::round2;
use super::{EntityId, MatchupId};

/// Aggregated deliveries between a specific batter and bowler.
///
/// The totals are symmetric: viewed from either side they are the same
/// numbers. Only the derived advantage score is perspective-dependent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchupRecord {
    /// Innings in which the pair faced each other
    pub innings: u32,

    /// Runs scored by the batter off the bowler
    pub runs: u32,

    /// Balls faced
    pub balls: u32,

    /// Times the bowler dismissed the batter
    pub dismissals: u32,

    /// Dot balls
    pub dots: u32,

    /// Fours hit
    pub fours: u32,

    /// Sixes hit
    pub sixes: u32,
}

impl MatchupRecord {
    /// Deterministic pairing ID from the two resolved names.
    pub fn pairing_id(batter: &str, bowler: &str) -> MatchupId {
        EntityId::generate(&[batter, bowler])
    }

    /// Batter's strike rate in this matchup. 0.0 when no balls on record.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            round2(self.runs as f64 / self.balls as f64 * 100.0)
        }
    }

    /// Batter's average in this matchup. Stays 0.0 while the bowler has
    /// never dismissed the batter (no unbeaten fallback here — a matchup
    /// with no dismissals says nothing about dominance by itself).
    pub fn average(&self) -> f64 {
        if self.dismissals == 0 {
            0.0
        } else {
            round2(self.runs as f64 / self.dismissals as f64)
        }
    }

    /// Boundary count (fours + sixes).
    pub fn boundaries(&self) -> u32 {
        self.fours + self.sixes
    }
}

/// Which side of the pairing the opponent was on, from the owning player's
/// point of view. An allrounder accumulates entries of both kinds and they
/// are averaged separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentSide {
    /// Opponent bowled to the owning player
    Bowler,
    /// Opponent batted against the owning player
    Batter,
}

/// One head-to-head entry attached to a player: the opponent, the shared
/// totals, and the advantage from the owning player's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceoffEntry {
    /// Opponent name
    pub opponent: String,

    /// Which side the opponent was on
    pub opponent_side: OpponentSide,

    /// The shared pairing totals
    pub record: MatchupRecord,

    /// Signed advantage from the owning player's perspective
    pub advantage: f64,
}
