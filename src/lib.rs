//! # Fantasy XI
//!
//! A fantasy-cricket selection engine: scores every candidate player across
//! five weighted dimensions and builds a constrained best XI.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (stat records, aggregates, matchups,
//!   players, teams)
//! - **aggregate**: Reduces per-innings records into scoped aggregates
//! - **scoring**: Matchup, pitch-fit and composite evaluators
//! - **selection**: Ranking and roster construction under constraints
//! - **pipeline**: The per-fixture driver wiring the evaluators together
//! - **resolve**: Fuzzy identity resolution against injected mapping tables
//! - **sources**: External stat-source collaborators (fetching + parsing)
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod resolve;
pub mod scoring;
pub mod selection;
pub mod sources;

pub use models::*;
