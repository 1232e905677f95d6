//! HTTP client for stat sources: bounded retries with a fixed delay, and
//! player-ID resolution from search-result pages.

use std::time::Duration;

use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{RetryPolicy, SourceError};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// HTTP fetcher shared by the concrete sources.
pub struct SourceClient {
    http: Client,
    retry: RetryPolicy,
}

impl SourceClient {
    /// Create a client with a request timeout and retry policy.
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, retry })
    }

    /// Fetch a page as text, retrying on transient failures. Retries are
    /// bounded and spaced by a fixed delay; the last error propagates.
    pub async fn get_text(&self, url: &Url) -> Result<String, SourceError> {
        let mut last_err: Option<SourceError> = None;

        for attempt in 1..=self.retry.max_attempts {
            match self.try_get(url).await {
                Ok(body) => {
                    debug!(%url, attempt, "fetched");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(%url, attempt, error = %e, "fetch failed");
                    last_err = Some(e);
                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| SourceError::InvalidUrl(url.to_string())))
    }

    async fn try_get(&self, url: &Url) -> Result<String, SourceError> {
        let response = self
            .http
            .get(url.clone())
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Resolve a player name to the stats site's numeric ID by scanning a
    /// search-results page for a cricketer profile URL.
    pub async fn resolve_player_id(
        &self,
        name: &str,
        search_url: &Url,
    ) -> Result<u32, SourceError> {
        for attempt in 1..=self.retry.max_attempts {
            match self.try_get(search_url).await {
                Ok(body) => {
                    if let Some(id) = extract_player_id(&body) {
                        return Ok(id);
                    }
                    // Result page loaded but held no profile link; the
                    // search index may lag, so this still retries.
                }
                Err(e) => warn!(name, attempt, error = %e, "id lookup failed"),
            }
            if attempt < self.retry.max_attempts {
                tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
            }
        }

        Err(SourceError::PlayerNotFound {
            name: name.to_string(),
            attempts: self.retry.max_attempts,
        })
    }
}

/// Pull the numeric player ID out of the first cricketer profile URL in a
/// page, e.g. ".../cricketers/virat-kohli-253802" -> 253802.
pub fn extract_player_id(html: &str) -> Option<u32> {
    let re = Regex::new(r"espncricinfo\.com/cricketers/[^/\s\x22']+-(\d+)").ok()?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_player_id() {
        let html = r#"<a href="https://www.espncricinfo.com/cricketers/virat-kohli-253802">Virat Kohli</a>"#;
        assert_eq!(extract_player_id(html), Some(253802));
    }

    #[test]
    fn test_extract_player_id_first_match_wins() {
        let html = concat!(
            r#"<a href="https://www.espncricinfo.com/cricketers/rohit-sharma-34102">R</a>"#,
            r#"<a href="https://www.espncricinfo.com/cricketers/virat-kohli-253802">V</a>"#,
        );
        assert_eq!(extract_player_id(html), Some(34102));
    }

    #[test]
    fn test_extract_player_id_absent() {
        assert_eq!(extract_player_id("<html><body>no players here</body></html>"), None);
        assert_eq!(
            extract_player_id("espncricinfo.com/series/ipl-2025-1449924"),
            None
        );
    }

    #[tokio::test]
    async fn test_client_bounded_retries_on_dead_endpoint() {
        // Unroutable address: every attempt fails, and the bounded policy
        // must give up rather than spin.
        let client = SourceClient::new(
            Duration::from_millis(50),
            RetryPolicy {
                max_attempts: 2,
                delay_ms: 1,
            },
        )
        .unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert!(client.get_text(&url).await.is_err());
    }
}
