//! Matchup Evaluator — directional advantage scores for batter-vs-bowler
//! pairings and the per-player head-to-head summary.

use tracing::trace;

use crate::models::{FaceoffEntry, MatchupRecord, OpponentSide, Player, Role};

use super::{benchmarks, weights};

/// Minimum innings for a pairing to be judged.
pub const MIN_INNINGS: u32 = 5;

/// Minimum balls for a pairing to be judged.
pub const MIN_BALLS: u32 = 20;

/// Advantage score for a pairing, from the batter's perspective: positive
/// favors the batter, negative the bowler. Magnitude is roughly within
/// [-1, 1] but not clamped.
///
/// Pairings below both sample thresholds score exactly 0.0 — too little
/// data to judge dominance. Meeting either threshold is enough to proceed.
pub fn advantage_score(record: &MatchupRecord) -> f64 {
    if record.innings < MIN_INNINGS && record.balls < MIN_BALLS {
        return 0.0;
    }

    let (w_sr, w_avg, w_bound) = weights::FACEOFF_BATTER;
    let (w_dots, w_outs) = weights::FACEOFF_BOWLER;

    let per_ball = |count: u32| {
        if record.balls == 0 {
            0.0
        } else {
            count as f64 / record.balls as f64
        }
    };

    let sr_score = record.strike_rate() / benchmarks::BAT_SR;
    let avg_score = record.average() / benchmarks::BAT_AVG;
    let boundary_score = per_ball(record.boundaries());

    let batter = w_sr * sr_score + w_avg * avg_score + w_bound * boundary_score;

    let dot_score = per_ball(record.dots);
    // A bowler who dismisses the batter even half the innings outweighs any
    // strike rate, hence the doubled dismissal rate.
    let out_score = if record.innings == 0 {
        0.0
    } else {
        2.0 * record.dismissals as f64 / record.innings as f64
    };

    let bowler = w_dots * dot_score + w_outs * out_score;

    batter - bowler
}

/// Evaluate one pairing and attach the result to both players: the batter
/// gets the advantage as computed, the bowler the same value sign-flipped.
/// Each unique pairing is evaluated exactly once.
pub fn attach_faceoff(batter: &mut Player, bowler: &mut Player, record: MatchupRecord) {
    let advantage = advantage_score(&record);
    trace!(
        batter = %batter.name,
        bowler = %bowler.name,
        advantage,
        "faceoff evaluated"
    );

    batter.faceoffs.push(FaceoffEntry {
        opponent: bowler.name.clone(),
        opponent_side: OpponentSide::Bowler,
        record,
        advantage,
    });
    bowler.faceoffs.push(FaceoffEntry {
        opponent: batter.name.clone(),
        opponent_side: OpponentSide::Batter,
        record,
        advantage: -advantage,
    });
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Per-player head-to-head score: the mean of the player's own-perspective
/// advantages.
///
/// Allrounders hold entries from both sides of the ball; their two sub-means
/// (faced-as-batter, bowled-at-batters) blend with the role's 70/30 split.
/// When one sub-list is empty the other mean is used directly — an empty
/// side never averages in as zero.
pub fn head_to_head_score(role: Role, faceoffs: &[FaceoffEntry]) -> f64 {
    if role.is_allrounder() {
        let as_batter = mean(
            faceoffs
                .iter()
                .filter(|e| e.opponent_side == OpponentSide::Bowler)
                .map(|e| e.advantage),
        );
        let as_bowler = mean(
            faceoffs
                .iter()
                .filter(|e| e.opponent_side == OpponentSide::Batter)
                .map(|e| e.advantage),
        );
        let (w_bat, w_bowl) = match role {
            Role::BattingAllrounder => (0.7, 0.3),
            _ => (0.3, 0.7),
        };
        match (as_batter, as_bowler) {
            (Some(bat), Some(bowl)) => w_bat * bat + w_bowl * bowl,
            (Some(bat), None) => bat,
            (None, Some(bowl)) => bowl,
            (None, None) => 0.0,
        }
    } else {
        mean(faceoffs.iter().map(|e| e.advantage)).unwrap_or(0.0)
    }
}
