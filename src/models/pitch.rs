//! Pitch condition classification.

use serde::{Deserialize, Serialize};

/// Coarse classification of playing-surface behavior, as normalized by the
/// orchestration collaborator from a raw pitch report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchCondition {
    /// Pace and seam movement dominate
    SeamerFriendly,
    /// Turn dominates
    SpinFriendly,
    /// High-scoring surface with little assistance for bowlers
    Flat,
    /// No strong bias either way
    Balanced,
}

impl PitchCondition {
    /// Parse a collaborator-supplied label. "none", "unknown" and empty
    /// strings mean no pitch information, which is a valid state — every
    /// player then scores 0.0 for pitch fit.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "seamer_friendly" | "seamer-friendly" => Some(PitchCondition::SeamerFriendly),
            "spin_friendly" | "spin-friendly" => Some(PitchCondition::SpinFriendly),
            "flat" => Some(PitchCondition::Flat),
            "balanced" => Some(PitchCondition::Balanced),
            _ => None,
        }
    }

    /// Weight applied to the pace sub-score when blending pace/spin fit;
    /// the spin weight is the complement.
    pub fn pace_weight(&self) -> f64 {
        match self {
            PitchCondition::SeamerFriendly => 0.7,
            PitchCondition::SpinFriendly => 0.3,
            PitchCondition::Flat | PitchCondition::Balanced => 0.5,
        }
    }
}

impl std::fmt::Display for PitchCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PitchCondition::SeamerFriendly => write!(f, "seamer_friendly"),
            PitchCondition::SpinFriendly => write!(f, "spin_friendly"),
            PitchCondition::Flat => write!(f, "flat"),
            PitchCondition::Balanced => write!(f, "balanced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(
            PitchCondition::from_label("seamer_friendly"),
            Some(PitchCondition::SeamerFriendly)
        );
        assert_eq!(
            PitchCondition::from_label("Spin-Friendly"),
            Some(PitchCondition::SpinFriendly)
        );
        assert_eq!(PitchCondition::from_label("flat"), Some(PitchCondition::Flat));
        assert_eq!(PitchCondition::from_label("None"), None);
        assert_eq!(PitchCondition::from_label(""), None);
        assert_eq!(PitchCondition::from_label("green top"), None);
    }

    #[test]
    fn test_pace_weights() {
        assert_eq!(PitchCondition::SeamerFriendly.pace_weight(), 0.7);
        assert_eq!(PitchCondition::SpinFriendly.pace_weight(), 0.3);
        assert_eq!(PitchCondition::Flat.pace_weight(), 0.5);
        assert_eq!(PitchCondition::Balanced.pace_weight(), 0.5);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&PitchCondition::SpinFriendly).unwrap();
        assert_eq!(json, "\"spin_friendly\"");
        let back: PitchCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PitchCondition::SpinFriendly);
    }
}
