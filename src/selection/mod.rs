//! Team Selector — ranks scored players and constructs the final XI under
//! roster constraints.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Player, Role};
use crate::scoring::overall_score;

/// Errors raised during roster construction.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Player '{name}' has no overall score attached")]
    UnscoredPlayer { name: String },

    #[error("Cannot satisfy roster constraints: {reason} (needed {needed}, available {available})")]
    ConstraintUnsatisfiable {
        reason: String,
        needed: usize,
        available: usize,
    },
}

/// Roster-construction rules. Defaults follow the standard fantasy XI
/// format: 5 batters (one keeping wicket), 4 bowlers, 1-2 allrounders,
/// at most 4 overseas players, 11 in total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRules {
    #[serde(default = "default_squad_size")]
    pub squad_size: usize,

    #[serde(default = "default_min_batters")]
    pub min_batters: usize,

    #[serde(default = "default_min_bowlers")]
    pub min_bowlers: usize,

    #[serde(default = "default_min_allrounders")]
    pub min_allrounders: usize,

    #[serde(default = "default_max_allrounders")]
    pub max_allrounders: usize,

    #[serde(default = "default_max_overseas")]
    pub max_overseas: usize,

    #[serde(default = "default_require_wicketkeeper")]
    pub require_wicketkeeper: bool,
}

fn default_squad_size() -> usize {
    11
}

fn default_min_batters() -> usize {
    5
}

fn default_min_bowlers() -> usize {
    4
}

fn default_min_allrounders() -> usize {
    1
}

fn default_max_allrounders() -> usize {
    2
}

fn default_max_overseas() -> usize {
    4
}

fn default_require_wicketkeeper() -> bool {
    true
}

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            squad_size: default_squad_size(),
            min_batters: default_min_batters(),
            min_bowlers: default_min_bowlers(),
            min_allrounders: default_min_allrounders(),
            max_allrounders: default_max_allrounders(),
            max_overseas: default_max_overseas(),
            require_wicketkeeper: default_require_wicketkeeper(),
        }
    }
}

/// One row of the simplified ranked summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub role: Role,
    pub overall_score: f64,
}

/// The kind of slot a pick filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Wicketkeeper,
    Batter,
    Bowler,
    Allrounder,
    /// Open slot filled by best remaining score regardless of role
    Flex,
}

/// One pick in the final XI, with the reasoning that put it there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub name: String,
    pub role: Role,
    pub overall_score: f64,
    pub wicketkeeper: bool,
    pub overseas: bool,
    pub slot: SlotKind,
    pub rationale: String,
}

/// The constructed XI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedXi {
    pub picks: Vec<Selection>,
}

impl SelectedXi {
    pub fn count_role(&self, pred: impl Fn(Role) -> bool) -> usize {
        self.picks.iter().filter(|p| pred(p.role)).count()
    }

    pub fn overseas_count(&self) -> usize {
        self.picks.iter().filter(|p| p.overseas).count()
    }
}

/// Descending by score; equal scores order lexicographically by name so the
/// selection is deterministic under any input ordering.
fn rank_order(a_name: &str, a_score: f64, b_name: &str, b_score: f64) -> std::cmp::Ordering {
    b_score.total_cmp(&a_score).then_with(|| a_name.cmp(b_name))
}

/// Compute and attach the overall score for every player, returning the
/// augmented full list and the simplified ranked summary.
///
/// No filtering happens here — roster constraints live in `select_xi`.
pub fn score_players(mut players: Vec<Player>) -> (Vec<Player>, Vec<RankedEntry>) {
    for player in &mut players {
        player.overall_score = Some(overall_score(player));
    }

    let mut summary: Vec<RankedEntry> = players
        .iter()
        .map(|p| RankedEntry {
            name: p.name.clone(),
            role: p.role,
            overall_score: p.overall_score.unwrap_or(0.0),
        })
        .collect();
    summary.sort_by(|a, b| rank_order(&a.name, a.overall_score, &b.name, b.overall_score));

    (players, summary)
}

#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    role: Role,
    score: f64,
    wicketkeeper: bool,
    overseas: bool,
}

fn slot_matches(slot: SlotKind, c: &Candidate) -> bool {
    match slot {
        SlotKind::Wicketkeeper => c.wicketkeeper && c.role == Role::Batsman,
        SlotKind::Batter => c.role == Role::Batsman,
        SlotKind::Bowler => c.role == Role::Bowler,
        SlotKind::Allrounder => c.role.is_allrounder(),
        SlotKind::Flex => true,
    }
}

struct Picker<'a> {
    candidates: &'a [Candidate],
    picked: Vec<bool>,
    rules: &'a RosterRules,
    overseas_count: usize,
    allrounder_count: usize,
    picks: Vec<Selection>,
}

impl<'a> Picker<'a> {
    fn can_pick(&self, idx: usize) -> bool {
        let c = &self.candidates[idx];
        if self.picked[idx] || self.picks.len() >= self.rules.squad_size {
            return false;
        }
        if c.overseas && self.overseas_count >= self.rules.max_overseas {
            return false;
        }
        if c.role.is_allrounder() && self.allrounder_count >= self.rules.max_allrounders {
            return false;
        }
        true
    }

    fn pick(&mut self, idx: usize, slot: SlotKind, rationale: String) {
        let c = &self.candidates[idx];
        self.picked[idx] = true;
        if c.overseas {
            self.overseas_count += 1;
        }
        if c.role.is_allrounder() {
            self.allrounder_count += 1;
        }
        debug!(player = %c.name, role = %c.role, score = c.score, ?slot, "picked");
        self.picks.push(Selection {
            name: c.name.clone(),
            role: c.role,
            overall_score: c.score,
            wicketkeeper: c.wicketkeeper,
            overseas: c.overseas,
            slot,
            rationale,
        });
    }

    /// Indices of unpicked candidates eligible for `slot`, in rank order.
    fn ranked_indices(&self, slot: SlotKind) -> Vec<usize> {
        let mut idxs: Vec<usize> = (0..self.candidates.len())
            .filter(|&i| !self.picked[i] && slot_matches(slot, &self.candidates[i]))
            .collect();
        idxs.sort_by(|&a, &b| {
            rank_order(
                &self.candidates[a].name,
                self.candidates[a].score,
                &self.candidates[b].name,
                self.candidates[b].score,
            )
        });
        idxs
    }

    /// Pick up to `count` candidates for `slot`, best first, honoring the
    /// overseas and allrounder caps.
    fn pick_quota(&mut self, count: usize, slot: SlotKind, reason: &str) -> Result<(), SelectionError> {
        let mut taken = 0;
        for idx in self.ranked_indices(slot) {
            if taken == count {
                break;
            }
            if self.can_pick(idx) {
                let c = &self.candidates[idx];
                let mut rationale = format!(
                    "{} pick #{} ({}, overall {:.4})",
                    reason,
                    taken + 1,
                    c.role,
                    c.score
                );
                if c.overseas {
                    rationale.push_str("; overseas");
                }
                self.pick(idx, slot, rationale);
                taken += 1;
            }
        }
        if taken < count {
            return Err(SelectionError::ConstraintUnsatisfiable {
                reason: reason.to_string(),
                needed: count,
                available: taken,
            });
        }
        Ok(())
    }
}

/// One greedy pass over the pool with `excluded` players withheld. On
/// failure the partial picks come back so the caller can decide what to
/// swap out.
fn attempt(
    candidates: &[Candidate],
    rules: &RosterRules,
    excluded: &HashSet<String>,
) -> Result<SelectedXi, (SelectionError, Vec<Selection>)> {
    let picked: Vec<bool> = candidates
        .iter()
        .map(|c| excluded.contains(&c.name))
        .collect();
    let mut picker = Picker {
        candidates,
        picked,
        rules,
        overseas_count: 0,
        allrounder_count: 0,
        picks: Vec::new(),
    };

    let run = |picker: &mut Picker| -> Result<(), SelectionError> {
        // Wicketkeeper first: the keeper counts toward the batter minimum.
        if picker.rules.require_wicketkeeper {
            picker.pick_quota(1, SlotKind::Wicketkeeper, "wicketkeeper")?;
        }
        let keepers = picker.picks.len();
        picker.pick_quota(
            picker.rules.min_batters.saturating_sub(keepers),
            SlotKind::Batter,
            "batter",
        )?;
        picker.pick_quota(picker.rules.min_bowlers, SlotKind::Bowler, "bowler")?;
        picker.pick_quota(picker.rules.min_allrounders, SlotKind::Allrounder, "allrounder")?;

        // Remaining slots: best remaining overall score regardless of role.
        while picker.picks.len() < picker.rules.squad_size {
            let next = picker
                .ranked_indices(SlotKind::Flex)
                .into_iter()
                .find(|&i| picker.can_pick(i));
            match next {
                Some(idx) => {
                    let c = &picker.candidates[idx];
                    let mut rationale =
                        format!("best remaining ({}, overall {:.4})", c.role, c.score);
                    if c.overseas {
                        rationale.push_str("; overseas");
                    }
                    picker.pick(idx, SlotKind::Flex, rationale);
                }
                None => {
                    return Err(SelectionError::ConstraintUnsatisfiable {
                        reason: "squad".to_string(),
                        needed: picker.rules.squad_size,
                        available: picker.picks.len(),
                    });
                }
            }
        }
        Ok(())
    };

    match run(&mut picker) {
        Ok(()) => Ok(SelectedXi {
            picks: picker.picks,
        }),
        Err(e) => Err((e, picker.picks)),
    }
}

/// Construct the final XI from scored players.
///
/// Seeds each role quota best-first (wicketkeeper before the remaining
/// batters), then fills the open slots with the best remaining score
/// regardless of role. Every pick honors the overseas and allrounder caps.
///
/// A best-first pass can strand overseas slots on early picks and starve a
/// later quota even though a valid XI exists. When that happens the lowest
/// scoring overseas pick that has a domestic stand-in for its slot is
/// withheld and the pass restarts; only when no such swap remains does the
/// failure surface as `ConstraintUnsatisfiable`.
pub fn select_xi(players: &[Player], rules: &RosterRules) -> Result<SelectedXi, SelectionError> {
    let candidates: Vec<Candidate> = players
        .iter()
        .map(|p| {
            let score = p
                .overall_score
                .ok_or_else(|| SelectionError::UnscoredPlayer {
                    name: p.name.clone(),
                })?;
            Ok(Candidate {
                name: p.name.clone(),
                role: p.role,
                score,
                wicketkeeper: p.wicketkeeper,
                overseas: p.overseas,
            })
        })
        .collect::<Result<_, SelectionError>>()?;

    let mut excluded: HashSet<String> = HashSet::new();
    loop {
        match attempt(&candidates, rules, &excluded) {
            Ok(xi) => {
                info!(
                    picks = xi.picks.len(),
                    overseas = xi.overseas_count(),
                    "XI selected"
                );
                return Ok(xi);
            }
            Err((err, partial)) => {
                let swap = replaceable_overseas_pick(&candidates, &partial, &excluded);
                match swap {
                    Some(name) => {
                        debug!(player = %name, "withholding overseas pick and retrying");
                        excluded.insert(name);
                    }
                    None => return Err(err),
                }
            }
        }
    }
}

/// The lowest-scoring overseas pick in a failed attempt that could be
/// replaced by an unpicked domestic candidate eligible for the same slot.
fn replaceable_overseas_pick(
    candidates: &[Candidate],
    partial: &[Selection],
    excluded: &HashSet<String>,
) -> Option<String> {
    let picked_names: HashSet<&str> = partial.iter().map(|s| s.name.as_str()).collect();

    let mut overseas_picks: Vec<&Selection> = partial.iter().filter(|s| s.overseas).collect();
    // Lowest score first: give up the least value when swapping.
    overseas_picks.sort_by(|a, b| rank_order(&b.name, b.overall_score, &a.name, a.overall_score));

    overseas_picks
        .iter()
        .find(|pick| {
            candidates.iter().any(|c| {
                !c.overseas
                    && !picked_names.contains(c.name.as_str())
                    && !excluded.contains(&c.name)
                    && slot_matches(pick.slot, c)
            })
        })
        .map(|pick| pick.name.clone())
}
