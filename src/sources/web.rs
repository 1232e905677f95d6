//! The production stat source: Statsguru pages for innings and career
//! stats, CricMetric for matchups and bowling-type splits.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::SourceConfig;
use crate::models::{BattingAggregate, DisciplineStats, MatchupRecord, PlayerStatRecord};
use crate::resolve::name_variants;

use super::client::SourceClient;
use super::{cricmetric, espn, CareerFilter, Discipline, RetryPolicy, SourceError, StatSource};

/// T20 class identifier used by the stats site.
const T20_CLASS: u32 = 6;

pub struct WebStatSource {
    client: SourceClient,
    stats_base: Url,
    matchup_base: Url,
}

impl WebStatSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = SourceClient::new(
            Duration::from_secs(config.timeout_seconds),
            RetryPolicy {
                max_attempts: config.max_retries,
                delay_ms: config.retry_delay_ms,
            },
        )?;
        let stats_base = Url::parse(&config.stats_base_url)
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        let matchup_base = Url::parse(&config.matchup_base_url)
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client,
            stats_base,
            matchup_base,
        })
    }
}

/// URL of a player's match-by-match innings list.
pub fn innings_url(base: &Url, player_id: u32, discipline: Discipline) -> Result<Url, SourceError> {
    let mut url = base
        .join(&format!("ci/engine/player/{player_id}.html"))
        .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("class", &T20_CLASS.to_string())
        .append_pair("template", "results")
        .append_pair("type", discipline.as_query())
        .append_pair("view", "match");
    Ok(url)
}

/// URL of a player's career averages filtered by opposition or venue.
pub fn career_url(
    base: &Url,
    player_id: u32,
    discipline: Discipline,
    filter: CareerFilter,
) -> Result<Url, SourceError> {
    let mut url = base
        .join(&format!("ci/engine/player/{player_id}.html"))
        .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("class", &T20_CLASS.to_string())
            .append_pair("template", "results")
            .append_pair("type", discipline.as_query());
        match filter {
            CareerFilter::Opposition(id) => pairs.append_pair("opposition", &id.to_string()),
            CareerFilter::Venue(id) => pairs.append_pair("ground", &id.to_string()),
        };
    }
    Ok(url)
}

/// URL of the batter-vs-bowler matchup page.
pub fn matchup_url(base: &Url, batter: &str, bowler: &str) -> Result<Url, SourceError> {
    let mut url = base
        .join("matchup.py")
        .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("batsman", batter)
        .append_pair("bowler", bowler)
        .append_pair("groupby", "match");
    Ok(url)
}

/// URL of the by-bowling-type career split page.
pub fn type_split_url(base: &Url, player_name: &str) -> Result<Url, SourceError> {
    let mut url = base
        .join("playerstats.py")
        .map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("player", player_name)
        .append_pair("role", "batsman")
        .append_pair("format", "All_T20")
        .append_pair("groupby", "opp_player_type");
    Ok(url)
}

#[async_trait]
impl StatSource for WebStatSource {
    fn name(&self) -> &'static str {
        "web"
    }

    async fn recent_innings(
        &self,
        player_id: u32,
        discipline: Discipline,
    ) -> Result<Vec<PlayerStatRecord>, SourceError> {
        let url = innings_url(&self.stats_base, player_id, discipline)?;
        let html = self.client.get_text(&url).await?;
        espn::parse_innings_table(&html, discipline)
    }

    async fn career_stats(
        &self,
        player_id: u32,
        discipline: Discipline,
        filter: CareerFilter,
    ) -> Result<DisciplineStats, SourceError> {
        let url = career_url(&self.stats_base, player_id, discipline, filter)?;
        let html = self.client.get_text(&url).await?;
        espn::parse_career_filtered_row(&html, discipline)
    }

    async fn matchup_totals(
        &self,
        batter: &str,
        bowler: &str,
    ) -> Result<Option<MatchupRecord>, SourceError> {
        // Some players are indexed under abbreviated forms; walk the
        // variant grid until a page carries a T20 panel.
        for batter_variant in name_variants(batter) {
            for bowler_variant in name_variants(bowler) {
                let url = matchup_url(&self.matchup_base, &batter_variant, &bowler_variant)?;
                let html = self.client.get_text(&url).await?;
                match cricmetric::parse_matchup_tables(&html) {
                    Ok(record) => {
                        debug!(batter = %batter_variant, bowler = %bowler_variant, "matchup found");
                        return Ok(Some(record));
                    }
                    Err(SourceError::TableNotFound(_)) => continue,
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(None)
    }

    async fn type_splits(
        &self,
        player_name: &str,
    ) -> Result<(BattingAggregate, BattingAggregate), SourceError> {
        let url = type_split_url(&self.matchup_base, player_name)?;
        let html = self.client.get_text(&url).await?;
        cricmetric::parse_type_split_table(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://stats.espncricinfo.com").unwrap()
    }

    #[test]
    fn test_innings_url() {
        let url = innings_url(&base(), 253802, Discipline::Batting).unwrap();
        assert_eq!(url.path(), "/ci/engine/player/253802.html");
        let query = url.query().unwrap();
        assert!(query.contains("class=6"));
        assert!(query.contains("type=batting"));
        assert!(query.contains("view=match"));
    }

    #[test]
    fn test_career_url_filters_are_exclusive() {
        let opp = career_url(&base(), 253802, Discipline::Bowling, CareerFilter::Opposition(4346))
            .unwrap();
        assert!(opp.query().unwrap().contains("opposition=4346"));
        assert!(!opp.query().unwrap().contains("ground"));

        let venue =
            career_url(&base(), 253802, Discipline::Bowling, CareerFilter::Venue(713)).unwrap();
        assert!(venue.query().unwrap().contains("ground=713"));
        assert!(!venue.query().unwrap().contains("opposition"));
    }

    #[test]
    fn test_matchup_url_encodes_names() {
        let base = Url::parse("https://www.cricmetric.com").unwrap();
        let url = matchup_url(&base, "Virat Kohli", "Mitchell Starc").unwrap();
        assert_eq!(url.path(), "/matchup.py");
        assert!(url.query().unwrap().contains("batsman=Virat+Kohli"));
        assert!(url.query().unwrap().contains("bowler=Mitchell+Starc"));
    }

    #[test]
    fn test_type_split_url() {
        let base = Url::parse("https://www.cricmetric.com").unwrap();
        let url = type_split_url(&base, "Virat Kohli").unwrap();
        assert!(url.query().unwrap().contains("groupby=opp_player_type"));
        assert!(url.query().unwrap().contains("format=All_T20"));
    }
}
