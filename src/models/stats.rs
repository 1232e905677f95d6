//! Aggregated statistics models.
//!
//! Aggregates store base totals only; rates (strike rate, average, economy)
//! are recomputed from those totals so the derived values can never drift
//! from the counts that produced them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Round a rate to two decimal places — applied at the aggregation boundary.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The bounded window or filter an aggregate was computed over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "label")]
pub enum StatScope {
    /// Last N innings (N carried by the aggregation call, 8 by convention)
    RecentForm,
    /// Career stats against a named opposition
    VsOpposition(String),
    /// Career stats at a named venue
    AtVenue(String),
    /// Career split against pace bowling
    VsPace,
    /// Career split against spin bowling
    VsSpin,
}

impl fmt::Display for StatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatScope::RecentForm => write!(f, "recent_form"),
            StatScope::VsOpposition(opp) => write!(f, "vs_{}", opp.replace(' ', "_")),
            StatScope::AtVenue(venue) => write!(f, "at_{}", venue.replace(' ', "_")),
            StatScope::VsPace => write!(f, "vs_pace"),
            StatScope::VsSpin => write!(f, "vs_spin"),
        }
    }
}

/// Batting totals over a bounded set of innings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BattingAggregate {
    /// Innings with batting involvement
    pub innings: u32,

    /// Total runs scored
    pub runs: u32,

    /// Total balls faced
    pub balls: u32,

    /// Dismissals (= innings - not-outs; never exceeds innings)
    pub dismissals: u32,

    /// Fours hit
    pub fours: u32,

    /// Sixes hit
    pub sixes: u32,

    /// Half-centuries (50-99)
    pub fifties: u32,

    /// Centuries (>= 100)
    pub hundreds: u32,
}

impl BattingAggregate {
    /// Strike rate: runs per 100 balls. 0.0 when no balls were faced.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            round2(self.runs as f64 / self.balls as f64 * 100.0)
        }
    }

    /// Batting average: runs per dismissal. A fully-unbeaten sample has no
    /// dismissals, in which case the average equals total runs by convention
    /// rather than being undefined.
    pub fn average(&self) -> f64 {
        if self.dismissals == 0 {
            self.runs as f64
        } else {
            round2(self.runs as f64 / self.dismissals as f64)
        }
    }

    /// Boundary count (fours + sixes).
    pub fn boundaries(&self) -> u32 {
        self.fours + self.sixes
    }

    /// Milestone innings count (fifties + hundreds).
    pub fn milestones(&self) -> u32 {
        self.fifties + self.hundreds
    }
}

/// Bowling totals over a bounded set of innings.
///
/// `overs` keeps the cricket overs.balls numeral; any ball-based rate goes
/// through `legal_balls()` first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BowlingAggregate {
    /// Innings with bowling involvement
    pub innings: u32,

    /// Overs bowled, in overs.balls notation
    pub overs: f64,

    /// Maiden overs
    pub maidens: u32,

    /// Runs conceded
    pub runs_conceded: u32,

    /// Wickets taken
    pub wickets: u32,
}

impl BowlingAggregate {
    /// Total legal balls bowled. The fractional digit of `overs` counts
    /// completed balls in the current over (0-5), not tenths.
    pub fn legal_balls(&self) -> u32 {
        let whole = self.overs.trunc() as u32;
        let frac_balls = (self.overs.fract() * 10.0).round() as u32;
        whole * 6 + frac_balls
    }

    /// Economy rate: runs conceded per over. None when no overs were bowled —
    /// "no data" is distinct from an economy of zero.
    pub fn economy(&self) -> Option<f64> {
        if self.overs > 0.0 {
            Some(round2(self.runs_conceded as f64 / self.overs))
        } else {
            None
        }
    }

    /// Bowling average: runs conceded per wicket. None when wicketless.
    pub fn average(&self) -> Option<f64> {
        if self.wickets > 0 {
            Some(round2(self.runs_conceded as f64 / self.wickets as f64))
        } else {
            None
        }
    }

    /// Bowling strike rate: legal balls per wicket. None when wicketless.
    pub fn strike_rate(&self) -> Option<f64> {
        if self.wickets > 0 {
            Some(round2(self.legal_balls() as f64 / self.wickets as f64))
        } else {
            None
        }
    }
}

/// A player's aggregates for one scope: batting and/or bowling depending on
/// what the player actually does.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisciplineStats {
    #[serde(rename = "Batting", skip_serializing_if = "Option::is_none")]
    pub batting: Option<BattingAggregate>,

    #[serde(rename = "Bowling", skip_serializing_if = "Option::is_none")]
    pub bowling: Option<BowlingAggregate>,
}

impl DisciplineStats {
    pub fn batting(batting: BattingAggregate) -> Self {
        Self {
            batting: Some(batting),
            bowling: None,
        }
    }

    pub fn bowling(bowling: BowlingAggregate) -> Self {
        Self {
            batting: None,
            bowling: Some(bowling),
        }
    }

    pub fn allround(batting: BattingAggregate, bowling: BowlingAggregate) -> Self {
        Self {
            batting: Some(batting),
            bowling: Some(bowling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batting_rates() {
        let agg = BattingAggregate {
            innings: 8,
            runs: 408,
            balls: 278,
            dismissals: 7,
            fours: 46,
            sixes: 9,
            fifties: 5,
            hundreds: 0,
        };
        assert_eq!(agg.strike_rate(), 146.76);
        assert_eq!(agg.average(), 58.29);
        assert_eq!(agg.boundaries(), 55);
        assert_eq!(agg.milestones(), 5);
    }

    #[test]
    fn test_batting_zero_balls_strike_rate() {
        let agg = BattingAggregate::default();
        assert_eq!(agg.strike_rate(), 0.0);
        assert!(agg.strike_rate().is_finite());
    }

    #[test]
    fn test_batting_unbeaten_average_falls_back_to_runs() {
        let agg = BattingAggregate {
            innings: 3,
            runs: 74,
            balls: 52,
            dismissals: 0,
            ..Default::default()
        };
        assert_eq!(agg.average(), 74.0);
    }

    #[test]
    fn test_bowling_overs_to_balls() {
        let agg = BowlingAggregate {
            innings: 8,
            overs: 31.2,
            maidens: 0,
            runs_conceded: 197,
            wickets: 14,
        };
        // 31 overs and 2 balls, not 31.2 "tenths"
        assert_eq!(agg.legal_balls(), 188);
        assert_eq!(agg.strike_rate(), Some(13.43));
        assert_eq!(agg.economy(), Some(6.31));
        assert_eq!(agg.average(), Some(14.07));
    }

    #[test]
    fn test_bowling_null_rates_when_no_data() {
        let agg = BowlingAggregate::default();
        assert_eq!(agg.economy(), None);
        assert_eq!(agg.average(), None);
        assert_eq!(agg.strike_rate(), None);

        let wicketless = BowlingAggregate {
            innings: 2,
            overs: 6.0,
            maidens: 0,
            runs_conceded: 55,
            wickets: 0,
        };
        assert_eq!(wicketless.economy(), Some(9.17));
        assert_eq!(wicketless.average(), None);
        assert_eq!(wicketless.strike_rate(), None);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(StatScope::RecentForm.to_string(), "recent_form");
        assert_eq!(
            StatScope::VsOpposition("Punjab Kings".into()).to_string(),
            "vs_Punjab_Kings"
        );
        assert_eq!(
            StatScope::AtVenue("Eden Gardens".into()).to_string(),
            "at_Eden_Gardens"
        );
    }

    #[test]
    fn test_discipline_stats_serialization() {
        let stats = DisciplineStats::allround(
            BattingAggregate {
                innings: 7,
                runs: 120,
                balls: 76,
                dismissals: 5,
                fours: 9,
                sixes: 6,
                fifties: 0,
                hundreds: 0,
            },
            BowlingAggregate {
                innings: 7,
                overs: 13.0,
                maidens: 0,
                runs_conceded: 146,
                wickets: 3,
            },
        );
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"Batting\""));
        assert!(json.contains("\"Bowling\""));
        let back: DisciplineStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(146.76258992805757), 146.76);
        assert_eq!(round2(58.285714285714285), 58.29);
    }
}
