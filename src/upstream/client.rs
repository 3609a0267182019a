//! Evaluation service REST client
//!
//! Handles HTTP communication with the exchange evaluation API. Every
//! request carries a bearer token drawn from the owned [`TokenCache`].

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::token::TokenCache;
use super::PriceHistorySource;
use crate::config::{AuthConfig, UpstreamConfig};
use crate::types::PricePoint;

/// REST client for the exchange evaluation API
pub struct EvaluationClient {
    client: Client,
    base_url: String,
    tokens: TokenCache,
}

impl EvaluationClient {
    /// Create a new client
    pub fn new(upstream: &UpstreamConfig, auth: &AuthConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(upstream.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        let tokens = TokenCache::new(client.clone(), auth.clone());

        Self {
            client,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn history_url(&self, ticker: &str, minutes: u32) -> String {
        format!("{}/stocks/{}?minutes={}", self.base_url, ticker, minutes)
    }
}

#[async_trait]
impl PriceHistorySource for EvaluationClient {
    async fn price_history(&self, ticker: &str, minutes: u32) -> Result<Vec<PricePoint>> {
        let token = self.tokens.bearer_token().await?;
        let url = self.history_url(ticker, minutes);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .context("Failed to fetch price history")?;

        if !response.status().is_success() {
            bail!(
                "Failed to get price history for {}: {}",
                ticker,
                response.status()
            );
        }

        let points: Vec<PricePoint> = response
            .json()
            .await
            .context("Failed to parse price history response")?;

        debug!(ticker, minutes, count = points.len(), "fetched price history");
        Ok(points)
    }
}
