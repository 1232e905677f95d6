//! Parsers for Statsguru player pages: the per-match innings list and the
//! filtered career-averages row.
//!
//! Parsing is lenient per-row and strict per-table: a single row that fails
//! numeric parsing is skipped (partial cricket records are common and
//! aggregation is accumulative), but an absent table is an error — the
//! caller must never mistake "no data" for zeros.

use scraper::{ElementRef, Html, Selector};

use crate::models::{
    BattingAggregate, BattingEntry, BowlingAggregate, BowlingEntry, DisciplineStats,
    PlayerStatRecord,
};

use super::{Discipline, SourceError};

fn engine_table_with_caption<'a>(doc: &'a Html, needle: &str) -> Option<ElementRef<'a>> {
    let table_sel = Selector::parse("table.engineTable").unwrap();
    let caption_sel = Selector::parse("caption").unwrap();
    doc.select(&table_sel).find(|tbl| {
        tbl.select(&caption_sel)
            .next()
            .map(|c| c.text().collect::<String>().contains(needle))
            .unwrap_or(false)
    })
}

fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    let cell_sel = Selector::parse("td, th").unwrap();
    row.select(&cell_sel)
        .map(|c| c.text().collect::<String>().trim().to_string())
        .collect()
}

fn parse_u32(s: &str) -> u32 {
    s.replace(',', "").trim().parse().unwrap_or(0)
}

fn parse_f64(s: &str) -> f64 {
    s.replace(',', "").trim().parse().unwrap_or(0.0)
}

/// Parse the "Match by match list" table into per-innings records.
///
/// Rows marked "-", "DNB" or "TDNB" are appearances without involvement in
/// the requested discipline and produce no record; rows whose primary cell
/// fails to parse are skipped individually.
pub fn parse_innings_table(
    html: &str,
    discipline: Discipline,
) -> Result<Vec<PlayerStatRecord>, SourceError> {
    let doc = Html::parse_document(html);
    let table = engine_table_with_caption(&doc, "Match by match list")
        .ok_or_else(|| SourceError::TableNotFound("Match by match list".to_string()))?;

    let row_sel = Selector::parse("tr").unwrap();
    let mut rows = table.select(&row_sel);

    let headers = rows
        .next()
        .map(cell_texts)
        .ok_or_else(|| SourceError::MalformedTable("no header row".to_string()))?;
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::MalformedTable(format!("missing column '{name}'")))
    };

    let mut records = Vec::new();
    match discipline {
        Discipline::Batting => {
            let i_runs = col("Bat1")?;
            let i_balls = col("BF")?;
            let i_fours = col("4s")?;
            let i_sixes = col("6s")?;

            for row in rows {
                let cells = cell_texts(row);
                let Some(raw) = cells.get(i_runs) else {
                    continue;
                };
                if raw == "-" || raw.is_empty() || raw == "DNB" || raw == "TDNB" {
                    continue;
                }
                let not_out = raw.ends_with('*');
                let runs: u32 = match raw.trim_end_matches('*').parse() {
                    Ok(r) => r,
                    Err(_) => continue, // skip the single offending record
                };
                records.push(PlayerStatRecord::batting_only(BattingEntry::new(
                    runs,
                    cells.get(i_balls).map(|s| parse_u32(s)).unwrap_or(0),
                    cells.get(i_fours).map(|s| parse_u32(s)).unwrap_or(0),
                    cells.get(i_sixes).map(|s| parse_u32(s)).unwrap_or(0),
                    not_out,
                )));
            }
        }
        Discipline::Bowling => {
            let i_overs = col("Overs")?;
            let i_maidens = col("Mdns")?;
            let i_runs = col("Runs")?;
            let i_wkts = col("Wkts")?;

            for row in rows {
                let cells = cell_texts(row);
                let Some(raw) = cells.get(i_overs) else {
                    continue;
                };
                if raw == "-" || raw.is_empty() || raw == "DNB" || raw == "TDNB" {
                    continue;
                }
                let overs: f64 = match raw.parse() {
                    Ok(o) => o,
                    Err(_) => continue,
                };
                records.push(PlayerStatRecord::bowling_only(BowlingEntry::new(
                    overs,
                    cells.get(i_maidens).map(|s| parse_u32(s)).unwrap_or(0),
                    cells.get(i_runs).map(|s| parse_u32(s)).unwrap_or(0),
                    cells.get(i_wkts).map(|s| parse_u32(s)).unwrap_or(0),
                )));
            }
        }
    }

    Ok(records)
}

/// Parse the "filtered" row of the Career averages table into an aggregate.
///
/// Only base totals are read; rates are recomputed downstream from the
/// totals, never trusted from the page.
pub fn parse_career_filtered_row(
    html: &str,
    discipline: Discipline,
) -> Result<DisciplineStats, SourceError> {
    let doc = Html::parse_document(html);
    let table = engine_table_with_caption(&doc, "Career averages")
        .ok_or_else(|| SourceError::TableNotFound("Career averages".to_string()))?;

    let row_sel = Selector::parse("tr").unwrap();
    let cells = table
        .select(&row_sel)
        .map(cell_texts)
        .find(|cells| {
            cells
                .first()
                .map(|c| c.eq_ignore_ascii_case("filtered"))
                .unwrap_or(false)
        })
        .ok_or_else(|| SourceError::MalformedTable("filtered row not found".to_string()))?;

    match discipline {
        Discipline::Batting => {
            if cells.len() < 15 {
                return Err(SourceError::MalformedTable(format!(
                    "filtered batting row has {} cells",
                    cells.len()
                )));
            }
            let innings = parse_u32(&cells[3]);
            let not_outs = parse_u32(&cells[4]);
            Ok(DisciplineStats::batting(BattingAggregate {
                innings,
                runs: parse_u32(&cells[5]),
                balls: parse_u32(&cells[8]),
                dismissals: innings.saturating_sub(not_outs),
                fours: parse_u32(&cells[13]),
                sixes: parse_u32(&cells[14]),
                fifties: parse_u32(&cells[11]),
                hundreds: parse_u32(&cells[10]),
            }))
        }
        Discipline::Bowling => {
            if cells.len() < 8 {
                return Err(SourceError::MalformedTable(format!(
                    "filtered bowling row has {} cells",
                    cells.len()
                )));
            }
            Ok(DisciplineStats::bowling(BowlingAggregate {
                innings: parse_u32(&cells[3]),
                overs: parse_f64(&cells[4]),
                maidens: parse_u32(&cells[5]),
                runs_conceded: parse_u32(&cells[6]),
                wickets: parse_u32(&cells[7]),
            }))
        }
    }
}
