//! Team rosters and the fixture being analyzed.

use serde::{Deserialize, Serialize};

use super::pitch::PitchCondition;
use super::player::{ModelError, Player};

/// One team's roster: a name plus its candidate players. Player names are
/// unique within a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    /// Create a roster, rejecting duplicate player names.
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Result<Self, ModelError> {
        let name = name.into();
        let mut seen = std::collections::HashSet::new();
        for p in &players {
            if !seen.insert(p.name.as_str()) {
                return Err(ModelError::DuplicatePlayer {
                    team: name,
                    name: p.name.clone(),
                });
            }
        }
        Ok(Self { name, players })
    }

    /// Look up a player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }
}

/// The two rosters being compared plus the shared pitch classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub team_a: Team,
    pub team_b: Team,

    /// Venue label, used for the at-venue aggregation scope
    #[serde(default)]
    pub venue: Option<String>,

    /// Normalized pitch classification; None when no pitch report exists
    #[serde(default)]
    pub pitch: Option<PitchCondition>,
}

impl Fixture {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self {
            team_a,
            team_b,
            venue: None,
            pitch: None,
        }
    }

    /// Builder method to set the pitch classification.
    pub fn with_pitch(mut self, pitch: Option<PitchCondition>) -> Self {
        self.pitch = pitch;
        self
    }

    /// Builder method to set the venue label.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// All candidate players across both rosters.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.team_a.players.iter().chain(self.team_b.players.iter())
    }
}
