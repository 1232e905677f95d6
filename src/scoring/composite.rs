//! Composite Scorer — per-scope role-conditional scores and the weighted
//! 5-factor overall score.

use tracing::trace;

use crate::models::{BattingAggregate, BowlingAggregate, DisciplineStats, Player, Role};

use super::{benchmarks, weights};

/// Score a batting aggregate against the benchmarks.
///
/// Strike rate and average normalize against elite marks; the conversion
/// term rewards turning starts into fifties and hundreds.
pub fn batting_score(agg: &BattingAggregate) -> f64 {
    let (w_sr, w_avg, w_conv) = weights::BAT;

    let sr_score = agg.strike_rate() / benchmarks::BAT_SR;
    let avg_score = agg.average() / benchmarks::BAT_AVG;
    let conversion = if agg.innings == 0 {
        0.0
    } else {
        agg.milestones() as f64 / agg.innings as f64
    };

    w_sr * sr_score + w_avg * avg_score + w_conv * conversion
}

/// Score a bowling aggregate against the benchmarks.
///
/// Lower is better for all three bowling rates, so each term is
/// benchmark/actual. A rate that is unavailable (no overs bowled, no
/// wickets taken) contributes 0 to its term instead of raising.
pub fn bowling_score(agg: &BowlingAggregate) -> f64 {
    let (w_sr, w_avg, w_eco) = weights::BOWL;

    let inverted = |rate: Option<f64>, benchmark: f64| match rate {
        Some(r) if r > 0.0 => benchmark / r,
        _ => 0.0,
    };

    w_sr * inverted(agg.strike_rate(), benchmarks::BOWL_SR)
        + w_avg * inverted(agg.average(), benchmarks::BOWL_AVG)
        + w_eco * inverted(agg.economy(), benchmarks::BOWL_ECO)
}

/// Score one scope's aggregates for a role.
///
/// Pure batters and bowlers return their own sub-score; allrounders blend
/// the two with the role's 70/30 or 30/70 split.
pub fn compute_score(stats: &DisciplineStats, role: Role) -> f64 {
    let bat = stats.batting.as_ref().map(batting_score).unwrap_or(0.0);
    let bowl = stats.bowling.as_ref().map(bowling_score).unwrap_or(0.0);

    match role.blend_weights() {
        Some((w_bat, w_bowl)) => w_bat * bat + w_bowl * bowl,
        None if role == Role::Batsman => bat,
        None => bowl,
    }
}

/// The canonical 5-factor overall score.
///
/// Reads the head-to-head and pitch scores already attached to the player;
/// a dimension that was never evaluated contributes 0. The result is left
/// unrounded so closely-scored players keep a strict ranking order.
pub fn overall_score(player: &Player) -> f64 {
    let (w_recent, w_opp, w_venue, w_h2h, w_pitch) = weights::OVERALL;

    let recent = compute_score(&player.recent_form, player.role);
    let vs_opp = compute_score(&player.vs_opposition, player.role);
    let at_venue = compute_score(&player.at_venue, player.role);
    let h2h = player.head_to_head_score.unwrap_or(0.0);
    let pitch = player.pitch_score.unwrap_or(0.0);

    let overall = w_recent * recent
        + w_opp * vs_opp
        + w_venue * at_venue
        + w_h2h * h2h
        + w_pitch * pitch;

    trace!(
        player = %player.name,
        recent,
        vs_opp,
        at_venue,
        h2h,
        pitch,
        overall,
        "composite score"
    );
    overall
}

/// Migrate a legacy-shaped player snapshot to the canonical schema.
///
/// Earlier snapshots carried only the three scope aggregates (the 3-factor
/// weighting era) and no head-to-head or pitch evaluation. Under the
/// canonical 5-factor weighting those dimensions enter as explicit zeros,
/// and the missing ID is regenerated from the name.
pub fn migrate_legacy(mut player: Player) -> Player {
    player.ensure_id();
    player.head_to_head_score.get_or_insert(0.0);
    player.pitch_score.get_or_insert(0.0);
    player
}
