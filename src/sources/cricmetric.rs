//! Parsers for CricMetric pages: head-to-head matchup panels and the
//! by-bowling-type career split table.

use scraper::{ElementRef, Html, Selector};

use crate::models::{BattingAggregate, MatchupRecord};

use super::SourceError;

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn parse_u32(s: &str) -> u32 {
    s.replace(',', "")
        .trim()
        .parse::<f64>()
        .map(|v| v as u32)
        .unwrap_or(0)
}

/// Parse the T20 matchup panels into combined pairing totals.
///
/// The page carries one panel per format; only panels whose heading says
/// T20I or TWENTY20 count, and their totals rows sum column-wise. No
/// matching panel at all means the pairing has no recorded history — the
/// caller decides whether that is an empty record or an error.
pub fn parse_matchup_tables(html: &str) -> Result<MatchupRecord, SourceError> {
    let doc = Html::parse_document(html);
    let panel_sel = Selector::parse("div.panel.panel-default").unwrap();
    let heading_sel = Selector::parse("div.panel-heading").unwrap();
    let table_sel = Selector::parse("table.table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let body_row_sel = Selector::parse("tbody tr").unwrap();
    let foot_row_sel = Selector::parse("tfoot tr").unwrap();
    let cell_sel = Selector::parse("td, th").unwrap();
    let data_cell_sel = Selector::parse("td").unwrap();

    let mut record = MatchupRecord::default();
    let mut found = false;

    for panel in doc.select(&panel_sel) {
        let label = panel
            .select(&heading_sel)
            .next()
            .map(|h| text_of(h).to_uppercase())
            .unwrap_or_default();
        if !label.contains("T20I") && !label.contains("TWENTY20") {
            continue;
        }
        let Some(table) = panel.select(&table_sel).next() else {
            continue;
        };
        found = true;

        let headers: Vec<String> = table
            .select(&row_sel)
            .next()
            .map(|r| r.select(&cell_sel).map(text_of).collect())
            .unwrap_or_default();

        // Count only data rows: the header <tr> may be folded into an
        // implicit tbody by the HTML parser, but it carries <th> cells.
        record.innings += table
            .select(&body_row_sel)
            .filter(|r| r.select(&data_cell_sel).next().is_some())
            .count() as u32;

        let Some(total_row) = table.select(&foot_row_sel).next() else {
            continue;
        };
        let cells: Vec<String> = total_row.select(&cell_sel).map(text_of).collect();
        if cells.len() != headers.len() {
            return Err(SourceError::MalformedTable(format!(
                "totals row has {} cells for {} headers",
                cells.len(),
                headers.len()
            )));
        }

        for (name, cell) in headers.iter().zip(cells.iter()).skip(1) {
            let value = parse_u32(cell);
            match name.as_str() {
                "Runs" => record.runs += value,
                "Balls" => record.balls += value,
                "Outs" => record.dismissals += value,
                "Dots" => record.dots += value,
                "4s" => record.fours += value,
                "6s" => record.sixes += value,
                _ => {}
            }
        }
    }

    if !found {
        return Err(SourceError::TableNotFound("T20 matchup panel".to_string()));
    }
    Ok(record)
}

/// Parse the by-bowling-type score table into (pace, spin) batting splits.
///
/// Rows are classified by the "Versus Player Type" cell: fast/medium bowling
/// is pace; chinaman, orthodox, legbreak and offbreak are spin; anything
/// else (e.g. unknown style labels) is left out of both splits.
pub fn parse_type_split_table(
    html: &str,
) -> Result<(BattingAggregate, BattingAggregate), SourceError> {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("table.table.scoretable").unwrap();
    let head_cell_sel = Selector::parse("thead th").unwrap();
    let body_row_sel = Selector::parse("tbody tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| SourceError::TableNotFound("bowling-type score table".to_string()))?;

    let headers: Vec<String> = table.select(&head_cell_sel).map(text_of).collect();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::MalformedTable(format!("missing column '{name}'")))
    };

    let i_type = col("Versus Player Type")?;
    let i_runs = col("Runs")?;
    let i_balls = col("Balls")?;
    let i_outs = col("Outs")?;
    let i_fours = col("4s")?;
    let i_sixes = col("6s")?;
    let i_fifties = headers.iter().position(|h| h == "50");
    let i_hundreds = headers.iter().position(|h| h == "100");

    let mut pace = BattingAggregate::default();
    let mut spin = BattingAggregate::default();

    for row in table.select(&body_row_sel) {
        let cells: Vec<String> = row.select(&cell_sel).map(text_of).collect();
        let Some(vs_type) = cells.get(i_type).map(|s| s.to_lowercase()) else {
            continue;
        };

        let is_pace = vs_type.contains("fast") || vs_type.contains("medium");
        let is_spin = ["chinaman", "orthodox", "legbreak", "offbreak"]
            .iter()
            .any(|kw| vs_type.contains(kw));
        if !is_pace && !is_spin {
            continue;
        }

        let at = |idx: usize| cells.get(idx).map(|s| parse_u32(s)).unwrap_or(0);
        let acc = if is_pace { &mut pace } else { &mut spin };
        acc.runs += at(i_runs);
        acc.balls += at(i_balls);
        acc.dismissals += at(i_outs);
        acc.fours += at(i_fours);
        acc.sixes += at(i_sixes);
        if let Some(i) = i_fifties {
            acc.fifties += at(i);
        }
        if let Some(i) = i_hundreds {
            acc.hundreds += at(i);
        }
    }

    Ok((pace, spin))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCHUP_HTML: &str = r#"
    <div class="panel panel-default">
      <div class="panel-heading">ODI</div>
      <table class="table">
        <tr><th>Match</th><th>Runs</th><th>Balls</th><th>Outs</th><th>Dots</th><th>4s</th><th>6s</th></tr>
        <tbody><tr><td>m1</td><td>99</td><td>80</td><td>1</td><td>30</td><td>9</td><td>2</td></tr></tbody>
        <tfoot><tr><td>Total</td><td>99</td><td>80</td><td>1</td><td>30</td><td>9</td><td>2</td></tr></tfoot>
      </table>
    </div>
    <div class="panel panel-default">
      <div class="panel-heading">T20I</div>
      <table class="table">
        <tr><th>Match</th><th>Runs</th><th>Balls</th><th>Outs</th><th>Dots</th><th>4s</th><th>6s</th></tr>
        <tbody>
          <tr><td>m1</td><td>40</td><td>30</td><td>1</td><td>10</td><td>4</td><td>2</td></tr>
          <tr><td>m2</td><td>35</td><td>25</td><td>2</td><td>9</td><td>3</td><td>1</td></tr>
        </tbody>
        <tfoot><tr><td>Total</td><td>75</td><td>55</td><td>3</td><td>19</td><td>7</td><td>3</td></tr></tfoot>
      </table>
    </div>
    <div class="panel panel-default">
      <div class="panel-heading">TWENTY20</div>
      <table class="table">
        <tr><th>Match</th><th>Runs</th><th>Balls</th><th>Outs</th><th>Dots</th><th>4s</th><th>6s</th></tr>
        <tbody>
          <tr><td>m1</td><td>75</td><td>46</td><td>2</td><td>18</td><td>8</td><td>3</td></tr>
        </tbody>
        <tfoot><tr><td>Total</td><td>75</td><td>46</td><td>2</td><td>18</td><td>8</td><td>3</td></tr></tfoot>
      </table>
    </div>"#;

    const SPLIT_HTML: &str = r#"
    <table class="table scoretable">
      <thead>
        <tr><th>Versus Player Type</th><th>Runs</th><th>Balls</th><th>Outs</th>
            <th>4s</th><th>6s</th><th>50</th><th>100</th></tr>
      </thead>
      <tbody>
        <tr><td>Right-arm fast</td><td>500</td><td>400</td><td>12</td><td>45</td><td>15</td><td>3</td><td>0</td></tr>
        <tr><td>Right-arm medium</td><td>300</td><td>250</td><td>8</td><td>30</td><td>8</td><td>1</td><td>0</td></tr>
        <tr><td>Legbreak</td><td>280</td><td>260</td><td>6</td><td>20</td><td>10</td><td>1</td><td>0</td></tr>
        <tr><td>Slow left-arm orthodox</td><td>150</td><td>140</td><td>4</td><td>9</td><td>5</td><td>0</td><td>0</td></tr>
        <tr><td>Unknown</td><td>999</td><td>999</td><td>9</td><td>9</td><td>9</td><td>9</td><td>0</td></tr>
      </tbody>
    </table>"#;

    #[test]
    fn test_matchup_sums_only_t20_panels() {
        let record = parse_matchup_tables(MATCHUP_HTML).unwrap();
        // The ODI panel is excluded; T20I and TWENTY20 panels sum.
        assert_eq!(record.innings, 3);
        assert_eq!(record.runs, 150);
        assert_eq!(record.balls, 101);
        assert_eq!(record.dismissals, 5);
        assert_eq!(record.dots, 37);
        assert_eq!(record.fours, 15);
        assert_eq!(record.sixes, 6);
    }

    #[test]
    fn test_no_t20_panel_is_table_not_found() {
        let html = r#"
        <div class="panel panel-default">
          <div class="panel-heading">ODI</div>
          <table class="table"><tr><th>Match</th></tr></table>
        </div>"#;
        let err = parse_matchup_tables(html).unwrap_err();
        assert!(matches!(err, SourceError::TableNotFound(_)));
    }

    #[test]
    fn test_matchup_header_cell_mismatch_is_malformed() {
        let html = r#"
        <div class="panel panel-default">
          <div class="panel-heading">T20I</div>
          <table class="table">
            <tr><th>Match</th><th>Runs</th><th>Balls</th></tr>
            <tbody><tr><td>m1</td><td>10</td><td>8</td></tr></tbody>
            <tfoot><tr><td>Total</td><td>10</td></tr></tfoot>
          </table>
        </div>"#;
        let err = parse_matchup_tables(html).unwrap_err();
        assert!(matches!(err, SourceError::MalformedTable(_)));
    }

    #[test]
    fn test_type_splits_classified_by_style() {
        let (pace, spin) = parse_type_split_table(SPLIT_HTML).unwrap();
        assert_eq!(pace.runs, 800);
        assert_eq!(pace.balls, 650);
        assert_eq!(pace.dismissals, 20);
        assert_eq!(pace.fifties, 4);

        assert_eq!(spin.runs, 430);
        assert_eq!(spin.balls, 400);
        assert_eq!(spin.dismissals, 10);

        // The unrecognized style row lands in neither split.
        assert!(pace.runs + spin.runs < 800 + 430 + 999);
    }

    #[test]
    fn test_type_split_table_missing() {
        let err = parse_type_split_table("<html></html>").unwrap_err();
        assert!(matches!(err, SourceError::TableNotFound(_)));
    }
}
