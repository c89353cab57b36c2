// The Odds API integration
// Game odds, final scores, and player prop markets

use crate::domain::{Game, Sport};
use crate::error::{LockboxError, Result};
use crate::services::OddsSource;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

const THE_ODDS_API_BASE: &str = "https://api.the-odds-api.com/v4";

/// The Odds API client
pub struct TheOddsApiClient {
    client: Client,
    api_key: String,
    region: String,
}

impl TheOddsApiClient {
    pub fn new(api_key: &str, region: &str, timeout_secs: u64) -> Result<Self> {
        if api_key.is_empty() {
            return Err(LockboxError::Validation(
                "THE_ODDS_API_KEY not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LockboxError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            region: region.to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!("Fetching odds from: {url}");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| LockboxError::Upstream(format!("odds request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LockboxError::Upstream(format!(
                "Odds API error {status}: {text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LockboxError::Upstream(format!("odds parse failed: {e}")))
    }
}

#[async_trait]
impl OddsSource for TheOddsApiClient {
    async fn fetch_odds(&self, sport: Sport) -> Result<Vec<Game>> {
        let url = format!("{}/sports/{}/odds", THE_ODDS_API_BASE, sport.api_key());
        let games: Vec<Game> = self
            .get_json(
                &url,
                &[
                    ("apiKey", self.api_key.as_str()),
                    ("regions", self.region.as_str()),
                    ("markets", "h2h,spreads,totals"),
                    ("oddsFormat", "american"),
                    ("dateFormat", "iso"),
                ],
            )
            .await?;

        info!("Fetched {} {} games with odds", games.len(), sport.display_name());
        Ok(games)
    }

    async fn fetch_scores(&self, sport: Sport, days_from: u8) -> Result<Vec<Game>> {
        let url = format!("{}/sports/{}/scores", THE_ODDS_API_BASE, sport.api_key());
        let days_from = days_from.to_string();
        let games: Vec<Game> = self
            .get_json(
                &url,
                &[
                    ("apiKey", self.api_key.as_str()),
                    ("daysFrom", days_from.as_str()),
                    ("dateFormat", "iso"),
                ],
            )
            .await?;

        info!("Fetched {} {} games with scores", games.len(), sport.display_name());
        Ok(games)
    }

    async fn fetch_event_props(&self, sport: Sport, event_id: &str) -> Result<Game> {
        let url = format!(
            "{}/sports/{}/events/{}/odds",
            THE_ODDS_API_BASE,
            sport.api_key(),
            event_id
        );
        self.get_json(
            &url,
            &[
                ("apiKey", self.api_key.as_str()),
                ("regions", self.region.as_str()),
                ("markets", sport.prop_markets()),
                ("oddsFormat", "american"),
                ("dateFormat", "iso"),
            ],
        )
        .await
    }
}
