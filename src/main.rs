use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fantasy_xi::config::AppConfig;
use fantasy_xi::models::{Fixture, MatchupId, MatchupRecord, PitchCondition, Team};
use fantasy_xi::pipeline::{run_scoring, run_selection};
use fantasy_xi::scoring::migrate_legacy;

#[derive(Parser)]
#[command(name = "fantasy-xi")]
#[command(about = "Fantasy cricket XI selection engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score both rosters and build the constrained XI
    Select {
        /// Match input file (JSON: rosters, matchups, pitch)
        #[arg(long)]
        input: String,

        /// Override the pitch classification from the input file
        #[arg(long)]
        pitch: Option<String>,
    },

    /// Score and rank the candidates without roster constraints
    Score {
        /// Match input file (JSON: rosters, matchups, pitch)
        #[arg(long)]
        input: String,
    },
}

/// The match file the orchestration collaborator hands over: two rosters,
/// the pre-aggregated pairing totals, and the pitch classification label.
#[derive(Debug, Deserialize)]
struct MatchInput {
    team_a: Team,
    team_b: Team,

    #[serde(default)]
    venue: Option<String>,

    #[serde(default)]
    pitch: Option<String>,

    #[serde(default)]
    matchups: Vec<MatchupInput>,
}

#[derive(Debug, Deserialize)]
struct MatchupInput {
    batter: String,
    bowler: String,
    #[serde(flatten)]
    record: MatchupRecord,
}

fn load_match(path: &str, pitch_override: Option<&str>) -> Result<(Fixture, HashMap<MatchupId, MatchupRecord>)> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading match file {path}"))?;
    let input: MatchInput =
        serde_json::from_str(&contents).with_context(|| format!("parsing match file {path}"))?;

    let normalize = |team: Team| -> Team {
        Team {
            name: team.name,
            players: team.players.into_iter().map(migrate_legacy).collect(),
        }
    };

    let pitch_label = pitch_override
        .map(str::to_string)
        .or(input.pitch);
    let pitch = pitch_label.as_deref().and_then(PitchCondition::from_label);

    let mut fixture =
        Fixture::new(normalize(input.team_a), normalize(input.team_b)).with_pitch(pitch);
    if let Some(venue) = input.venue {
        fixture = fixture.with_venue(venue);
    }

    let matchups: HashMap<MatchupId, MatchupRecord> = input
        .matchups
        .into_iter()
        .map(|m| (MatchupRecord::pairing_id(&m.batter, &m.bowler), m.record))
        .collect();

    Ok((fixture, matchups))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fantasy-xi v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path).context("loading configuration")?
    } else {
        tracing::debug!("No config file at {:?}, using defaults", config_path);
        AppConfig::default()
    };

    match cli.command {
        Commands::Select { input, pitch } => {
            let (fixture, matchups) = load_match(&input, pitch.as_deref())?;
            let result = run_selection(fixture, &matchups, &config.selection.roster)?;

            println!("\n=== Ranked Candidates ===");
            for (i, entry) in result.summary.iter().enumerate() {
                println!(
                    "{:>2}. {:<24} {:<20} {:.4}",
                    i + 1,
                    entry.name,
                    entry.role.to_string(),
                    entry.overall_score
                );
            }

            println!("\n=== Selected XI ===");
            for pick in &result.xi.picks {
                let mut tags = Vec::new();
                if pick.wicketkeeper {
                    tags.push("wk");
                }
                if pick.overseas {
                    tags.push("overseas");
                }
                let tags = if tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", tags.join(", "))
                };
                println!(
                    "  {:<24} {:<20} {:.4}{}  — {}",
                    pick.name,
                    pick.role.to_string(),
                    pick.overall_score,
                    tags,
                    pick.rationale
                );
            }
            println!(
                "\nOverseas: {}/{}",
                result.xi.overseas_count(),
                config.selection.roster.max_overseas
            );
        }
        Commands::Score { input } => {
            let (fixture, matchups) = load_match(&input, None)?;
            let (_, summary) = run_scoring(fixture, &matchups);

            println!("\n=== Ranked Candidates ===");
            for (i, entry) in summary.iter().enumerate() {
                println!(
                    "{:>2}. {:<24} {:<20} {:.4}",
                    i + 1,
                    entry.name,
                    entry.role.to_string(),
                    entry.overall_score
                );
            }
        }
    }

    Ok(())
}
