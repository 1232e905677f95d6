//! Player model: identity, role, styles, scoped aggregates and derived scores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::matchup::FaceoffEntry;
use super::stats::{BattingAggregate, DisciplineStats};
use super::{EntityId, PlayerId};

/// Errors raised while constructing model objects from collaborator data.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unrecognized role string: '{0}'")]
    UnknownRole(String),

    #[error("Duplicate player name in team '{team}': {name}")]
    DuplicatePlayer { team: String, name: String },
}

/// Player role, resolved once at ingestion from the collaborator's role
/// string. Scoring dispatches on this enum, never on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Batsman,
    Bowler,
    BattingAllrounder,
    BowlingAllrounder,
}

impl Role {
    /// Parse a collaborator role string ("wk-batsman", "batting allrounder",
    /// "bowler", ...). Unknown strings are an error at the boundary, not a
    /// scoring-time fallback.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let s: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if s.contains("allrounder") {
            if s.contains("batting") {
                Ok(Role::BattingAllrounder)
            } else {
                Ok(Role::BowlingAllrounder)
            }
        } else if s.contains("batsman") || s.contains("batter") || s.starts_with("wk") {
            Ok(Role::Batsman)
        } else if s.contains("bowler") {
            Ok(Role::Bowler)
        } else {
            Err(ModelError::UnknownRole(raw.to_string()))
        }
    }

    /// Whether this role contributes batting statistics.
    pub fn bats(&self) -> bool {
        !matches!(self, Role::Bowler)
    }

    /// Whether this role contributes bowling statistics.
    pub fn bowls(&self) -> bool {
        !matches!(self, Role::Batsman)
    }

    pub fn is_allrounder(&self) -> bool {
        matches!(self, Role::BattingAllrounder | Role::BowlingAllrounder)
    }

    /// (batting, bowling) blend weights for combining the two discipline
    /// scores of an allrounder. None for pure batters and bowlers.
    pub fn blend_weights(&self) -> Option<(f64, f64)> {
        match self {
            Role::BattingAllrounder => Some((0.7, 0.3)),
            Role::BowlingAllrounder => Some((0.3, 0.7)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Batsman => write!(f, "batsman"),
            Role::Bowler => write!(f, "bowler"),
            Role::BattingAllrounder => write!(f, "batting_allrounder"),
            Role::BowlingAllrounder => write!(f, "bowling_allrounder"),
        }
    }
}

/// Pace/spin classification of a bowling style string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BowlingStyleClass {
    Pace,
    Spin,
}

impl BowlingStyleClass {
    /// "fast" and "medium" styles are pace; legbreak, offbreak, orthodox,
    /// chinaman and anything unrecognized count as spin.
    pub fn classify(style: &str) -> Self {
        let s = style.to_lowercase();
        if s.contains("fast") || s.contains("medium") {
            BowlingStyleClass::Pace
        } else {
            BowlingStyleClass::Spin
        }
    }
}

/// A candidate player for one selection run.
///
/// Constructed once from upstream data; the evaluators attach the derived
/// scores incrementally. The selector only reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Deterministic ID from the resolved player name
    #[serde(default = "unset_id")]
    pub id: PlayerId,

    /// Resolved player name
    pub name: String,

    /// Role, already resolved to the closed enum
    pub role: Role,

    /// Wicketkeeper flag. Accepts the legacy `is_wk` field name.
    #[serde(rename = "is_wicketkeeper", alias = "is_wk", default)]
    pub wicketkeeper: bool,

    /// Overseas flag (counts against the roster's overseas cap)
    #[serde(rename = "is_overseas", default)]
    pub overseas: bool,

    /// Batting style string, e.g. "Right Handed Bat"
    #[serde(default)]
    pub batting_style: Option<String>,

    /// Bowling style string, e.g. "Right-arm fast-medium"
    #[serde(default)]
    pub bowling_style: Option<String>,

    /// Aggregates over the last N innings
    #[serde(default)]
    pub recent_form: DisciplineStats,

    /// Career aggregates against the opposition
    #[serde(default)]
    pub vs_opposition: DisciplineStats,

    /// Career aggregates at the venue
    #[serde(default)]
    pub at_venue: DisciplineStats,

    /// Career batting split against pace bowling
    #[serde(default)]
    pub pace_split: Option<BattingAggregate>,

    /// Career batting split against spin bowling
    #[serde(default)]
    pub spin_split: Option<BattingAggregate>,

    /// Head-to-head entries, one per opponent faced
    #[serde(default)]
    pub faceoffs: Vec<FaceoffEntry>,

    /// Mean own-perspective head-to-head advantage
    #[serde(default)]
    pub head_to_head_score: Option<f64>,

    /// Pitch-fit score
    #[serde(default)]
    pub pitch_score: Option<f64>,

    /// Weighted 5-factor overall score
    #[serde(default)]
    pub overall_score: Option<f64>,
}

fn unset_id() -> PlayerId {
    EntityId::new(String::new())
}

impl Player {
    /// Create a new Player with a deterministic ID.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        let name = name.into();
        let id = EntityId::generate(&[&name]);
        Self {
            id,
            name,
            role,
            wicketkeeper: false,
            overseas: false,
            batting_style: None,
            bowling_style: None,
            recent_form: DisciplineStats::default(),
            vs_opposition: DisciplineStats::default(),
            at_venue: DisciplineStats::default(),
            pace_split: None,
            spin_split: None,
            faceoffs: Vec::new(),
            head_to_head_score: None,
            pitch_score: None,
            overall_score: None,
        }
    }

    /// Builder method to mark the player as a wicketkeeper.
    pub fn with_wicketkeeper(mut self, wk: bool) -> Self {
        self.wicketkeeper = wk;
        self
    }

    /// Builder method to mark the player as overseas.
    pub fn with_overseas(mut self, overseas: bool) -> Self {
        self.overseas = overseas;
        self
    }

    /// Builder method to set style strings.
    pub fn with_styles(
        mut self,
        batting_style: impl Into<String>,
        bowling_style: impl Into<String>,
    ) -> Self {
        self.batting_style = Some(batting_style.into());
        self.bowling_style = Some(bowling_style.into());
        self
    }

    /// Builder method to set the three scoped aggregates.
    pub fn with_scoped_stats(
        mut self,
        recent_form: DisciplineStats,
        vs_opposition: DisciplineStats,
        at_venue: DisciplineStats,
    ) -> Self {
        self.recent_form = recent_form;
        self.vs_opposition = vs_opposition;
        self.at_venue = at_venue;
        self
    }

    /// Builder method to set the pace/spin career splits.
    pub fn with_type_splits(
        mut self,
        pace: BattingAggregate,
        spin: BattingAggregate,
    ) -> Self {
        self.pace_split = Some(pace);
        self.spin_split = Some(spin);
        self
    }

    /// Pace/spin classification of this player's bowling style. Players with
    /// no recorded style classify as spin, matching the style matcher.
    pub fn bowling_class(&self) -> BowlingStyleClass {
        BowlingStyleClass::classify(self.bowling_style.as_deref().unwrap_or(""))
    }

    /// Regenerate the ID from the current name. Used after deserializing
    /// legacy-shaped inputs that carry no ID.
    pub fn ensure_id(&mut self) {
        if self.id.as_str().is_empty() {
            self.id = EntityId::generate(&[&self.name]);
        }
    }
}
