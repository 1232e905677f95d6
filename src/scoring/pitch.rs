//! Pitch Fit Evaluator — expected suitability for the match surface.

use tracing::trace;

use crate::models::{BattingAggregate, BowlingStyleClass, PitchCondition, Player, Role};

use super::{benchmarks, weights};

/// Fit score for a bowler: a fixed lookup by pitch class and bowling style.
fn bowler_fit(pitch: PitchCondition, class: BowlingStyleClass) -> f64 {
    match pitch {
        PitchCondition::SeamerFriendly => match class {
            BowlingStyleClass::Pace => 0.7,
            BowlingStyleClass::Spin => 0.3,
        },
        PitchCondition::SpinFriendly => match class {
            BowlingStyleClass::Pace => 0.3,
            BowlingStyleClass::Spin => 0.7,
        },
        PitchCondition::Flat | PitchCondition::Balanced => 0.5,
    }
}

/// Sub-score for a batter's record against one bowling type.
///
/// `wicket_share` is the fraction of the batter's type-split dismissals that
/// fell to this type — a smaller share means the type troubles them less.
fn type_sub_score(split: &BattingAggregate, wicket_share: f64) -> f64 {
    let (w_sr, w_avg, w_share) = weights::PITCH;

    w_sr * (split.strike_rate() / benchmarks::BAT_SR)
        + w_avg * (split.average() / benchmarks::BAT_AVG)
        + w_share * (1.0 - wicket_share)
}

/// Blend a batter's pace and spin sub-scores by the pitch's pace weight.
fn batter_fit(
    pitch: PitchCondition,
    pace: &BattingAggregate,
    spin: &BattingAggregate,
) -> f64 {
    let total_outs = pace.dismissals + spin.dismissals;
    // No dismissals to either type leaves the share undefined; treat it as
    // an even 0.5/0.5 split rather than dividing by zero.
    let pace_share = if total_outs == 0 {
        0.5
    } else {
        pace.dismissals as f64 / total_outs as f64
    };
    let spin_share = 1.0 - pace_share;

    let pace_score = type_sub_score(pace, pace_share);
    let spin_score = type_sub_score(spin, spin_share);

    let w_pace = pitch.pace_weight();
    w_pace * pace_score + (1.0 - w_pace) * spin_score
}

/// Pitch-fit score for a player.
///
/// With no pitch information everyone scores 0.0 regardless of role or
/// style. Bowlers use the style lookup; batters and allrounders blend their
/// career pace/spin splits (missing splits count as empty records).
pub fn pitch_score(player: &Player, pitch: Option<PitchCondition>) -> f64 {
    let Some(pitch) = pitch else {
        return 0.0;
    };

    let score = match player.role {
        Role::Bowler => bowler_fit(pitch, player.bowling_class()),
        _ => {
            let empty = BattingAggregate::default();
            let pace = player.pace_split.as_ref().unwrap_or(&empty);
            let spin = player.spin_split.as_ref().unwrap_or(&empty);
            batter_fit(pitch, pace, spin)
        }
    };

    trace!(player = %player.name, %pitch, score, "pitch fit");
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kohli_splits() -> (BattingAggregate, BattingAggregate) {
        let pace = BattingAggregate {
            innings: 0,
            runs: 8425,
            balls: 5988,
            dismissals: 217,
            fours: 872,
            sixes: 260,
            fifties: 14,
            hundreds: 0,
        };
        let spin = BattingAggregate {
            innings: 0,
            runs: 4840,
            balls: 3866,
            dismissals: 84,
            fours: 314,
            sixes: 169,
            fifties: 0,
            hundreds: 0,
        };
        (pace, spin)
    }

    #[test]
    fn test_no_pitch_information_scores_zero_for_everyone() {
        let batter = Player::new("Virat Kohli", Role::Batsman);
        let bowler =
            Player::new("Jasprit Bumrah", Role::Bowler).with_styles("RHB", "Right-arm fast");
        let ar = Player::new("Hardik Pandya", Role::BattingAllrounder);

        assert_eq!(pitch_score(&batter, None), 0.0);
        assert_eq!(pitch_score(&bowler, None), 0.0);
        assert_eq!(pitch_score(&ar, None), 0.0);
    }

    #[test]
    fn test_bowler_lookup_table() {
        let pacer =
            Player::new("Jasprit Bumrah", Role::Bowler).with_styles("RHB", "Right-arm fast");
        let spinner =
            Player::new("Yuzvendra Chahal", Role::Bowler).with_styles("RHB", "Right-arm legbreak");

        assert_eq!(
            pitch_score(&pacer, Some(PitchCondition::SeamerFriendly)),
            0.7
        );
        assert_eq!(
            pitch_score(&spinner, Some(PitchCondition::SeamerFriendly)),
            0.3
        );
        assert_eq!(pitch_score(&pacer, Some(PitchCondition::SpinFriendly)), 0.3);
        assert_eq!(
            pitch_score(&spinner, Some(PitchCondition::SpinFriendly)),
            0.7
        );
        assert_eq!(pitch_score(&pacer, Some(PitchCondition::Flat)), 0.5);
        assert_eq!(pitch_score(&spinner, Some(PitchCondition::Balanced)), 0.5);
    }

    #[test]
    fn test_batter_blend_worked_example() {
        // Career splits strongly favoring pace attack survival; on a
        // spin-friendly surface the spin sub-score carries 70%.
        let (pace, spin) = kohli_splits();
        let player = Player::new("Virat Kohli", Role::Batsman).with_type_splits(pace, spin);

        let score = pitch_score(&player, Some(PitchCondition::SpinFriendly));
        assert!((score - 0.7419933372).abs() < 1e-6, "got {score}");
    }

    #[test]
    fn test_batter_blend_direction() {
        let (pace, spin) = kohli_splits();
        let player = Player::new("Virat Kohli", Role::Batsman).with_type_splits(pace, spin);

        let seamer = pitch_score(&player, Some(PitchCondition::SeamerFriendly));
        let spinny = pitch_score(&player, Some(PitchCondition::SpinFriendly));
        let flat = pitch_score(&player, Some(PitchCondition::Flat));

        // This batter's spin sub-score dominates, so the spin-friendly
        // blend must beat the seamer-friendly one, with flat in between.
        assert!(spinny > flat && flat > seamer);
    }

    #[test]
    fn test_zero_dismissals_to_both_types_splits_evenly() {
        let clean = BattingAggregate {
            innings: 0,
            runs: 120,
            balls: 100,
            dismissals: 0,
            ..Default::default()
        };
        let player = Player::new("Unbeaten", Role::Batsman).with_type_splits(clean, clean);

        // Must not divide by zero; both shares become 0.5.
        let score = pitch_score(&player, Some(PitchCondition::Balanced));
        assert!(score.is_finite());
        let sub = type_sub_score(&clean, 0.5);
        assert!((score - sub).abs() < 1e-12);
    }

    #[test]
    fn test_allrounder_uses_batter_path() {
        let (pace, spin) = kohli_splits();
        let ar = Player::new("Hardik Pandya", Role::BattingAllrounder)
            .with_styles("RHB", "Right-arm fast-medium")
            .with_type_splits(pace, spin);

        // Not the 0.3/0.7 bowler lookup — the blend of career splits.
        let score = pitch_score(&ar, Some(PitchCondition::SpinFriendly));
        assert_ne!(score, 0.3);
        assert_ne!(score, 0.7);
    }
}
