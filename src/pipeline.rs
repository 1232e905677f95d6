//! Selection-run driver: wires the evaluators together for one fixture.
//!
//! Every step is a pure function of the fixture and the matchup lookup, so
//! a caller that wants to score many players concurrently can do so freely —
//! nothing here shares mutable state across players.

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::models::{Fixture, MatchupId, MatchupRecord, Player};
use crate::scoring::{attach_faceoff, head_to_head_score, pitch_score};
use crate::selection::{score_players, select_xi, RankedEntry, RosterRules, SelectedXi, SelectionError};

/// Errors raised by the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Everything a selection run produces: the augmented player list, the
/// ranked summary, and the constructed XI.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub players: Vec<Player>,
    pub summary: Vec<RankedEntry>,
    pub xi: SelectedXi,
}

/// Look up the shared totals for a pairing; a pairing with no history is an
/// empty record, which the evaluator scores 0.0 under the minimum-sample
/// rule.
fn matchup_for(
    matchups: &HashMap<MatchupId, MatchupRecord>,
    batter: &str,
    bowler: &str,
) -> MatchupRecord {
    matchups
        .get(&MatchupRecord::pairing_id(batter, bowler))
        .copied()
        .unwrap_or_default()
}

/// Evaluate every cross-team pairing once, attaching the advantage to the
/// batter and its negation to the bowler, then fold each player's entries
/// into their head-to-head score.
fn evaluate_faceoffs(
    side_a: &mut [Player],
    side_b: &mut [Player],
    matchups: &HashMap<MatchupId, MatchupRecord>,
) {
    let bat_a: Vec<usize> = (0..side_a.len()).filter(|&i| side_a[i].role.bats()).collect();
    let bowl_a: Vec<usize> = (0..side_a.len()).filter(|&i| side_a[i].role.bowls()).collect();
    let bat_b: Vec<usize> = (0..side_b.len()).filter(|&i| side_b[i].role.bats()).collect();
    let bowl_b: Vec<usize> = (0..side_b.len()).filter(|&i| side_b[i].role.bowls()).collect();

    for &i in &bat_a {
        for &j in &bowl_b {
            let record = matchup_for(matchups, &side_a[i].name, &side_b[j].name);
            attach_faceoff(&mut side_a[i], &mut side_b[j], record);
        }
    }
    for &j in &bat_b {
        for &i in &bowl_a {
            let record = matchup_for(matchups, &side_b[j].name, &side_a[i].name);
            attach_faceoff(&mut side_b[j], &mut side_a[i], record);
        }
    }

    for player in side_a.iter_mut().chain(side_b.iter_mut()) {
        player.head_to_head_score = Some(head_to_head_score(player.role, &player.faceoffs));
    }
}

/// Run the full scoring and selection pipeline for a fixture.
///
/// `matchups` holds the pre-aggregated pairing totals keyed by
/// `MatchupRecord::pairing_id(batter, bowler)` — the scraping collaborator's
/// output, already resolved.
pub fn run_selection(
    fixture: Fixture,
    matchups: &HashMap<MatchupId, MatchupRecord>,
    rules: &RosterRules,
) -> Result<PipelineResult, PipelineError> {
    let Fixture {
        team_a,
        team_b,
        pitch,
        ..
    } = fixture;

    let mut side_a = team_a.players;
    let mut side_b = team_b.players;

    info!(
        team_a = %team_a.name,
        team_b = %team_b.name,
        pitch = pitch.map(|p| p.to_string()).unwrap_or_else(|| "none".into()),
        "running selection pipeline"
    );

    evaluate_faceoffs(&mut side_a, &mut side_b, matchups);

    let mut players: Vec<Player> = side_a.into_iter().chain(side_b).collect();
    for player in &mut players {
        player.pitch_score = Some(pitch_score(player, pitch));
    }

    let (players, summary) = score_players(players);
    let xi = select_xi(&players, rules)?;

    Ok(PipelineResult {
        players,
        summary,
        xi,
    })
}

/// Score and rank without constructing an XI — useful when the caller only
/// wants the ordered candidate list.
pub fn run_scoring(
    fixture: Fixture,
    matchups: &HashMap<MatchupId, MatchupRecord>,
) -> (Vec<Player>, Vec<RankedEntry>) {
    let Fixture {
        team_a,
        team_b,
        pitch,
        ..
    } = fixture;

    let mut side_a = team_a.players;
    let mut side_b = team_b.players;
    evaluate_faceoffs(&mut side_a, &mut side_b, matchups);

    let mut players: Vec<Player> = side_a.into_iter().chain(side_b).collect();
    for player in &mut players {
        player.pitch_score = Some(pitch_score(player, pitch));
    }

    score_players(players)
}
