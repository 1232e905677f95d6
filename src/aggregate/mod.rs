//! Metric Aggregator — reduces sequences of per-innings records into
//! scoped batting/bowling aggregates.
//!
//! Aggregation is accumulative: a record missing the requested discipline
//! contributes nothing and is skipped, never an error. The absence of the
//! underlying scope itself (no table upstream) is an error, because zero
//! and "no data" mean different things downstream.

use thiserror::Error;
use tracing::debug;

use crate::models::{
    BattingAggregate, BowlingAggregate, DisciplineStats, PlayerStatRecord, Role, StatScope,
};

/// Number of recent innings the form window covers, by convention.
pub const RECENT_WINDOW: usize = 8;

/// Errors raised by the aggregator.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("No data available for scope '{scope}'")]
    MissingData { scope: StatScope },
}

/// Convert a legal-ball count back to the overs.balls numeral.
fn balls_to_overs(balls: u32) -> f64 {
    (balls / 6) as f64 + (balls % 6) as f64 / 10.0
}

/// Take at most the last `n` chronological records. Records carrying dates
/// are ordered by date first; short histories are used whole.
pub fn recent_window(records: &[PlayerStatRecord], n: usize) -> Vec<PlayerStatRecord> {
    let mut ordered: Vec<PlayerStatRecord> = records.to_vec();
    if ordered.iter().all(|r| r.date.is_some()) {
        ordered.sort_by_key(|r| r.date);
    }
    let start = ordered.len().saturating_sub(n);
    ordered.split_off(start)
}

/// Sum batting figures over every record with batting involvement.
///
/// An empty window yields an all-zero aggregate; its strike rate is 0 and
/// its average falls back to 0 total runs.
pub fn aggregate_batting(records: &[PlayerStatRecord]) -> BattingAggregate {
    let mut agg = BattingAggregate::default();
    let mut not_outs = 0u32;

    for entry in records.iter().filter_map(|r| r.batting.as_ref()) {
        agg.innings += 1;
        agg.runs += entry.runs;
        agg.balls += entry.balls;
        agg.fours += entry.fours;
        agg.sixes += entry.sixes;
        if entry.not_out {
            not_outs += 1;
        }
        if entry.is_century() {
            agg.hundreds += 1;
        } else if entry.is_half_century() {
            agg.fifties += 1;
        }
    }

    // Canonical definition: dismissals = innings - not-outs.
    agg.dismissals = agg.innings.saturating_sub(not_outs);
    agg
}

/// Sum bowling figures over every record with bowling involvement.
///
/// Overs are summed in legal balls (each entry's fractional digit counts
/// completed balls, 0-5) and renormalized, so the total is always a valid
/// overs.balls numeral.
pub fn aggregate_bowling(records: &[PlayerStatRecord]) -> BowlingAggregate {
    let mut agg = BowlingAggregate::default();
    let mut total_balls = 0u32;

    for entry in records.iter().filter_map(|r| r.bowling.as_ref()) {
        agg.innings += 1;
        agg.maidens += entry.maidens;
        agg.runs_conceded += entry.runs_conceded;
        agg.wickets += entry.wickets;
        let whole = entry.overs.trunc() as u32;
        total_balls += whole * 6 + (entry.overs.fract() * 10.0).round() as u32;
    }

    agg.overs = balls_to_overs(total_balls);
    agg
}

/// Aggregate the disciplines a role actually plays.
pub fn aggregate(records: &[PlayerStatRecord], role: Role) -> DisciplineStats {
    DisciplineStats {
        batting: role.bats().then(|| aggregate_batting(records)),
        bowling: role.bowls().then(|| aggregate_bowling(records)),
    }
}

/// Aggregate one scope's records for a role.
///
/// `records` is None when the upstream source had no table for this scope —
/// that propagates as `MissingData` rather than silently aggregating to
/// zeros. An empty slice (a table with no rows) aggregates normally.
pub fn aggregate_scoped(
    records: Option<&[PlayerStatRecord]>,
    scope: &StatScope,
    role: Role,
) -> Result<DisciplineStats, AggregateError> {
    let records = records.ok_or_else(|| AggregateError::MissingData {
        scope: scope.clone(),
    })?;

    let windowed;
    let effective: &[PlayerStatRecord] = if matches!(scope, StatScope::RecentForm) {
        windowed = recent_window(records, RECENT_WINDOW);
        &windowed
    } else {
        records
    };

    debug!(
        scope = %scope,
        records = effective.len(),
        "aggregating scope"
    );
    Ok(aggregate(effective, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BattingEntry, BowlingEntry};
    use chrono::NaiveDate;

    fn batting_record(runs: u32, balls: u32, not_out: bool) -> PlayerStatRecord {
        PlayerStatRecord::batting_only(BattingEntry::new(runs, balls, runs / 10, runs / 25, not_out))
    }

    #[test]
    fn test_batting_aggregation_counts_milestones() {
        let records = vec![
            batting_record(104, 58, false),
            batting_record(67, 41, true),
            batting_record(12, 9, false),
            batting_record(50, 38, false),
        ];
        let agg = aggregate_batting(&records);
        assert_eq!(agg.innings, 4);
        assert_eq!(agg.runs, 233);
        assert_eq!(agg.hundreds, 1);
        assert_eq!(agg.fifties, 2);
        assert_eq!(agg.dismissals, 3);
    }

    #[test]
    fn test_dismissals_never_exceed_innings() {
        let records = vec![batting_record(30, 20, true), batting_record(45, 31, true)];
        let agg = aggregate_batting(&records);
        assert_eq!(agg.dismissals, 0);
        assert!(agg.dismissals <= agg.innings);
    }

    #[test]
    fn test_batting_skips_bowling_only_records() {
        let records = vec![
            batting_record(30, 22, false),
            PlayerStatRecord::bowling_only(BowlingEntry::new(4.0, 0, 31, 1)),
        ];
        let agg = aggregate_batting(&records);
        assert_eq!(agg.innings, 1);
    }

    #[test]
    fn test_empty_window_aggregates_to_zero() {
        let agg = aggregate_batting(&[]);
        assert_eq!(agg.innings, 0);
        assert_eq!(agg.strike_rate(), 0.0);
        assert_eq!(agg.average(), 0.0);

        let bowl = aggregate_bowling(&[]);
        assert_eq!(bowl.innings, 0);
        assert_eq!(bowl.economy(), None);
    }

    #[test]
    fn test_bowling_overs_sum_in_balls() {
        // 3.4 + 3.4 overs is 44 balls = 7.2 overs, not the 6.8 a naive
        // float sum would produce.
        let records = vec![
            PlayerStatRecord::bowling_only(BowlingEntry::new(3.4, 0, 28, 1)),
            PlayerStatRecord::bowling_only(BowlingEntry::new(3.4, 1, 22, 2)),
        ];
        let agg = aggregate_bowling(&records);
        assert_eq!(agg.overs, 7.2);
        assert_eq!(agg.legal_balls(), 44);
        assert_eq!(agg.wickets, 3);
        assert_eq!(agg.runs_conceded, 50);
    }

    #[test]
    fn test_recent_window_takes_last_n() {
        let records: Vec<PlayerStatRecord> = (0..12).map(|i| batting_record(i, i, false)).collect();
        let window = recent_window(&records, 8);
        assert_eq!(window.len(), 8);
        assert_eq!(window[0].batting.unwrap().runs, 4);
        assert_eq!(window[7].batting.unwrap().runs, 11);
    }

    #[test]
    fn test_recent_window_short_history_uses_all() {
        let records: Vec<PlayerStatRecord> = (0..3).map(|i| batting_record(i, i, false)).collect();
        assert_eq!(recent_window(&records, 8).len(), 3);
    }

    #[test]
    fn test_recent_window_orders_by_date() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        let records = vec![
            batting_record(3, 5, false).with_date(d(20)),
            batting_record(1, 2, false).with_date(d(5)),
            batting_record(2, 4, false).with_date(d(12)),
        ];
        let window = recent_window(&records, 2);
        assert_eq!(window[0].batting.unwrap().runs, 2);
        assert_eq!(window[1].batting.unwrap().runs, 3);
    }

    #[test]
    fn test_aggregate_by_role() {
        let records = vec![PlayerStatRecord::allround(
            BattingEntry::new(34, 20, 3, 1, false),
            BowlingEntry::new(4.0, 0, 30, 2),
        )];
        let batter = aggregate(&records, Role::Batsman);
        assert!(batter.batting.is_some());
        assert!(batter.bowling.is_none());

        let bowler = aggregate(&records, Role::Bowler);
        assert!(bowler.batting.is_none());
        assert!(bowler.bowling.is_some());

        let ar = aggregate(&records, Role::BattingAllrounder);
        assert!(ar.batting.is_some() && ar.bowling.is_some());
    }

    #[test]
    fn test_missing_scope_is_an_error_not_zeros() {
        let scope = StatScope::VsOpposition("Punjab Kings".into());
        let err = aggregate_scoped(None, &scope, Role::Batsman).unwrap_err();
        assert!(err.to_string().contains("Punjab_Kings"));

        // An empty table is NOT an error.
        let ok = aggregate_scoped(Some(&[]), &scope, Role::Batsman).unwrap();
        assert_eq!(ok.batting.unwrap().innings, 0);
    }

    #[test]
    fn test_recent_scope_applies_window() {
        let records: Vec<PlayerStatRecord> =
            (0..12).map(|i| batting_record(10 + i, 10, false)).collect();
        let stats = aggregate_scoped(Some(&records), &StatScope::RecentForm, Role::Batsman).unwrap();
        assert_eq!(stats.batting.unwrap().innings, 8);
    }
}
