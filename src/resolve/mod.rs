//! Identity resolution: mapping collaborator-supplied labels (opposition
//! names, venue names, player names) onto canonical IDs.
//!
//! The mapping tables are immutable configuration injected at startup.
//! Matching runs an ordered fallback chain — exact, then substring, then
//! edit-distance closest — and each tier is observable for testing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::debug;

/// Minimum Jaro-Winkler similarity for the fuzzy tier to accept a match.
const FUZZY_CUTOFF: f64 = 0.85;

/// Which tier of the fallback chain produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Substring,
    Fuzzy,
}

/// An immutable name-to-ID table with tiered fuzzy lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingTable {
    /// BTreeMap keeps iteration (and therefore tie-breaking) deterministic.
    entries: BTreeMap<String, u32>,
}

impl MappingTable {
    pub fn new(entries: BTreeMap<String, u32>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a label to an ID, reporting which tier matched.
    ///
    /// 1. Exact match, case-insensitive.
    /// 2. Substring: the query appears inside a key.
    /// 3. Fuzzy: highest Jaro-Winkler similarity at or above the cutoff.
    pub fn resolve_with_tier(&self, name: &str) -> Option<(u32, MatchTier)> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let needle = name.to_lowercase();

        for (key, &id) in &self.entries {
            if key.to_lowercase() == needle {
                return Some((id, MatchTier::Exact));
            }
        }

        for (key, &id) in &self.entries {
            if key.to_lowercase().contains(&needle) {
                return Some((id, MatchTier::Substring));
            }
        }

        let mut best: Option<(&str, u32, f64)> = None;
        for (key, &id) in &self.entries {
            let score = jaro_winkler(&needle, &key.to_lowercase());
            if score >= FUZZY_CUTOFF && best.map_or(true, |(_, _, b)| score > b) {
                best = Some((key, id, score));
            }
        }
        if let Some((key, id, score)) = best {
            debug!(query = name, matched = key, score, "fuzzy resolution");
            return Some((id, MatchTier::Fuzzy));
        }

        None
    }

    /// Resolve a label to an ID.
    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.resolve_with_tier(name).map(|(id, _)| id)
    }
}

/// Abbreviated variants of a player name, matching the short forms stat
/// sites index some players under (e.g. "A Mhatre" for "Ayush Mhatre").
pub fn name_variants(full_name: &str) -> Vec<String> {
    let trimmed = full_name.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let mut variants = vec![trimmed.to_string()];

    match parts.as_slice() {
        [first, last] => {
            if let Some(initial) = first.chars().next() {
                variants.push(format!("{} {}", initial, last));
            }
        }
        [a, b, c] => {
            if let (Some(ai), Some(bi)) = (a.chars().next(), b.chars().next()) {
                variants.push(format!("{}{} {}", ai, bi, c));
                variants.push(format!("{} {} {}", ai, b, c));
            }
        }
        _ => {}
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opposition_table() -> MappingTable {
        let mut entries = BTreeMap::new();
        entries.insert("Royal Challengers Bengaluru".to_string(), 4340);
        entries.insert("Kolkata Knight Riders".to_string(), 4341);
        entries.insert("Punjab Kings".to_string(), 4342);
        entries.insert("Chennai Super Kings".to_string(), 4343);
        entries.insert("Mumbai Indians".to_string(), 4346);
        MappingTable::new(entries)
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let table = opposition_table();
        assert_eq!(
            table.resolve_with_tier("punjab kings"),
            Some((4342, MatchTier::Exact))
        );
    }

    #[test]
    fn test_substring_match() {
        let table = opposition_table();
        assert_eq!(
            table.resolve_with_tier("Chennai"),
            Some((4343, MatchTier::Substring))
        );
    }

    #[test]
    fn test_fuzzy_match_catches_misspellings() {
        let table = opposition_table();
        let (id, tier) = table.resolve_with_tier("Panjab Kings").unwrap();
        assert_eq!(id, 4342);
        assert_eq!(tier, MatchTier::Fuzzy);
    }

    #[test]
    fn test_tiers_are_ordered() {
        // "Mumbai Indians" matches exactly even though it would also match
        // as a substring or fuzzily.
        let table = opposition_table();
        assert_eq!(
            table.resolve_with_tier("Mumbai Indians").unwrap().1,
            MatchTier::Exact
        );
    }

    #[test]
    fn test_unresolvable_names_return_none() {
        let table = opposition_table();
        assert_eq!(table.resolve("Sydney Sixers"), None);
        assert_eq!(table.resolve(""), None);
        assert_eq!(table.resolve("   "), None);
    }

    #[test]
    fn test_name_variants_two_words() {
        assert_eq!(
            name_variants("Ayush Mhatre"),
            vec!["Ayush Mhatre".to_string(), "A Mhatre".to_string()]
        );
    }

    #[test]
    fn test_name_variants_three_words() {
        assert_eq!(
            name_variants("Ruturaj Dasharath Gaikwad"),
            vec![
                "Ruturaj Dasharath Gaikwad".to_string(),
                "RD Gaikwad".to_string(),
                "R Dasharath Gaikwad".to_string(),
            ]
        );
    }

    #[test]
    fn test_name_variants_single_word() {
        assert_eq!(name_variants("Sachin"), vec!["Sachin".to_string()]);
    }
}
