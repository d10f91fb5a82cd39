use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Stats source request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the external season-average data source. The payload is
/// treated as an opaque structure and passed through untouched.
#[derive(Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl StatsClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// All-season averages for one player. Deployments without a configured
    /// source serve `null`.
    pub async fn season_averages(&self, player_name: &str) -> Result<Value, StatsError> {
        let Some(base) = &self.base_url else {
            return Ok(Value::Null);
        };

        let url = format!("{}/season_averages", base.trim_end_matches('/'));
        let value = self
            .http
            .get(url)
            .query(&[("player", player_name)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(value)
    }
}
