//! Configuration loading and validation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolve::MappingTable;
use crate::selection::RosterRules;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Stat-source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the innings/career stats site
    #[serde(default = "default_stats_base_url")]
    pub stats_base_url: String,

    /// Base URL of the matchup/splits site
    #[serde(default = "default_matchup_base_url")]
    pub matchup_base_url: String,

    /// Search engine used for player-ID resolution
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Max fetch attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_stats_base_url() -> String {
    "https://stats.espncricinfo.com".to_string()
}

fn default_matchup_base_url() -> String {
    "https://www.cricmetric.com".to_string()
}

fn default_search_base_url() -> String {
    "https://www.bing.com/search".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    10
}

fn default_retry_delay() -> u64 {
    250
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            stats_base_url: default_stats_base_url(),
            matchup_base_url: default_matchup_base_url(),
            search_base_url: default_search_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

/// Selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Recent-form window: how many trailing innings count as "form"
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,

    /// Roster-construction rules
    #[serde(default)]
    pub roster: RosterRules,
}

fn default_recent_window() -> usize {
    8
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            recent_window: default_recent_window(),
            roster: RosterRules::default(),
        }
    }
}

/// Name-to-ID mapping tables, injected at startup and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default = "default_oppositions")]
    pub oppositions: BTreeMap<String, u32>,

    #[serde(default = "default_venues")]
    pub venues: BTreeMap<String, u32>,
}

fn default_oppositions() -> BTreeMap<String, u32> {
    BTreeMap::from([
        ("Royal Challengers Bengaluru".to_string(), 4340),
        ("Kolkata Knight Riders".to_string(), 4341),
        ("Punjab Kings".to_string(), 4342),
        ("Chennai Super Kings".to_string(), 4343),
        ("Delhi Capitals".to_string(), 4344),
        ("Rajasthan Royals".to_string(), 4345),
        ("Mumbai Indians".to_string(), 4346),
        ("Sunrisers Hyderabad".to_string(), 5143),
        ("Lucknow Super Giants".to_string(), 6903),
        ("Gujarat Titans".to_string(), 6904),
    ])
}

fn default_venues() -> BTreeMap<String, u32> {
    BTreeMap::from([
        ("Arun Jaitley Stadium, Delhi".to_string(), 333),
        ("Ekana Cricket Stadium, Lucknow".to_string(), 3355),
        ("Eden Gardens, Kolkata".to_string(), 292),
        ("Chinnaswamy Stadium, Bengaluru".to_string(), 683),
        ("MA Chidambaram Stadium, Chepauk, Chennai".to_string(), 291),
        ("Narendra Modi Stadium, Ahmedabad".to_string(), 840),
        ("Sawai Mansingh Stadium, Jaipur".to_string(), 664),
        ("Wankhede Stadium, Mumbai".to_string(), 713),
        ("Rajiv Gandhi International Stadium, Hyderabad".to_string(), 1981),
        ("Barsapara Cricket Stadium, Guwahati".to_string(), 2865),
        ("HPCA Stadium, Dharamsala".to_string(), 1920),
        ("Brabourne Stadium, Mumbai".to_string(), 393),
        ("Dr DY Patil Sports Academy, Navi Mumbai".to_string(), 2361),
        ("ACA-VDCA Cricket Stadium, Visakhapatnam".to_string(), 1896),
        ("Holkar Cricket Stadium, Indore".to_string(), 1055),
        ("Maharaja Yadavindra Singh Stadium, Mullanpur".to_string(), 3585),
    ])
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            oppositions: default_oppositions(),
            venues: default_venues(),
        }
    }
}

impl MappingConfig {
    pub fn opposition_table(&self) -> MappingTable {
        MappingTable::new(self.oppositions.clone())
    }

    pub fn venue_table(&self) -> MappingTable {
        MappingTable::new(self.venues.clone())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub mappings: MappingConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            source: SourceConfig::default(),
            selection: SelectionConfig::default(),
            mappings: MappingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Source timeout must be greater than 0".to_string(),
            ));
        }
        if self.source.max_retries == 0 {
            return Err(ConfigError::ValidationError(
                "Max retries must be greater than 0".to_string(),
            ));
        }
        if self.selection.recent_window == 0 {
            return Err(ConfigError::ValidationError(
                "Recent window must be greater than 0".to_string(),
            ));
        }

        let roster = &self.selection.roster;
        let keeper_slots = usize::from(roster.require_wicketkeeper);
        let seeded = roster.min_batters.max(keeper_slots) + roster.min_bowlers + roster.min_allrounders;
        if seeded > roster.squad_size {
            return Err(ConfigError::ValidationError(format!(
                "Role minimums ({seeded}) exceed squad size ({})",
                roster.squad_size
            )));
        }
        if roster.min_allrounders > roster.max_allrounders {
            return Err(ConfigError::ValidationError(
                "min_allrounders exceeds max_allrounders".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.source.max_retries, 10);
        assert_eq!(config.selection.recent_window, 8);
        assert_eq!(config.selection.roster.squad_size, 11);
        assert!(!config.mappings.oppositions.is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.source.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_impossible_roster() {
        let mut config = AppConfig::default();
        config.selection.roster.min_batters = 8;
        config.selection.roster.min_bowlers = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mapping_tables_resolve() {
        let config = AppConfig::default();
        let oppositions = config.mappings.opposition_table();
        assert_eq!(oppositions.resolve("Punjab Kings"), Some(4342));
        assert_eq!(oppositions.resolve("punjab"), Some(4342));

        let venues = config.mappings.venue_table();
        assert_eq!(venues.resolve("Eden Gardens, Kolkata"), Some(292));
        assert_eq!(venues.resolve("eden"), Some(292));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.source.stats_base_url, parsed.source.stats_base_url);
        assert_eq!(config.mappings.venues, parsed.mappings.venues);
    }

    #[test]
    fn test_config_from_file() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n[selection]\nrecent_window = 5\n"
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.selection.recent_window, 5);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.source.max_retries, 10);
    }
}
