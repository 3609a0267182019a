//! Access-token cache for the evaluation service
//!
//! The provider hands out short-lived bearer tokens through a credential
//! exchange. The cache reuses a token while its expiry lies beyond a
//! lookahead margin and refreshes it otherwise. Freshness check and store
//! are separate lock acquisitions, so two tasks may refresh concurrently;
//! both store valid tokens, which is harmless.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::AuthConfig;

/// Credential payload for the token exchange
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub name: String,
    #[serde(rename = "rollNo")]
    pub roll_no: String,
    #[serde(rename = "accessCode")]
    pub access_code: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl Credentials {
    /// Resolve credentials from config, falling back to the bare env names
    pub fn resolve(auth: &AuthConfig) -> Result<Self> {
        Ok(Self {
            email: value_or_env(&auth.email, &["EMAIL"])
                .context("EMAIL not configured for the token exchange")?,
            name: value_or_env(&auth.name, &["NAME"])
                .context("NAME not configured for the token exchange")?,
            roll_no: value_or_env(&auth.roll_no, &["ROLL_NO"])
                .context("ROLL_NO not configured for the token exchange")?,
            access_code: value_or_env(&auth.access_code, &["ACCESS_CODE"])
                .context("ACCESS_CODE not configured for the token exchange")?,
            client_id: value_or_env(&auth.client_id, &["CLIENT_ID"])
                .context("CLIENT_ID not configured for the token exchange")?,
            client_secret: value_or_env(&auth.client_secret, &["CLIENT_SECRET"])
                .context("CLIENT_SECRET not configured for the token exchange")?,
        })
    }
}

fn value_or_env(configured: &str, var_names: &[&str]) -> Option<String> {
    if !configured.trim().is_empty() {
        return Some(configured.to_string());
    }
    for var in var_names {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// A bearer token plus its absolute expiry
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Fresh while the expiry lies strictly beyond now + lookahead
    fn is_fresh(&self, now: DateTime<Utc>, lookahead: Duration) -> bool {
        self.expires_at > now + lookahead
    }
}

#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,
    /// Seconds until expiry
    expires_in: i64,
}

/// Cached bearer token for the evaluation service
pub struct TokenCache {
    client: Client,
    auth: AuthConfig,
    lookahead: Duration,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(client: Client, auth: AuthConfig) -> Self {
        let lookahead = Duration::milliseconds(auth.lookahead_ms);
        Self {
            client,
            auth,
            lookahead,
            cached: RwLock::new(None),
        }
    }

    /// Current bearer token, refreshed through the credential exchange when
    /// the cached one is missing or already inside the lookahead window
    pub async fn bearer_token(&self) -> Result<String> {
        let now = Utc::now();
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.is_fresh(now, self.lookahead) {
                return Ok(cached.token.clone());
            }
        }
        self.refresh(now).await
    }

    async fn refresh(&self, now: DateTime<Utc>) -> Result<String> {
        let credentials = Credentials::resolve(&self.auth)?;
        debug!(url = %self.auth.url, "refreshing evaluation service token");

        let response = self
            .client
            .post(&self.auth.url)
            .json(&credentials)
            .send()
            .await
            .context("Failed to reach the auth endpoint")?;

        if !response.status().is_success() {
            bail!("Auth endpoint returned {}", response.status());
        }

        let grant: TokenGrant = response
            .json()
            .await
            .context("Failed to parse auth response")?;

        let expires_at = now + Duration::seconds(grant.expires_in);
        let token = grant.access_token;
        *self.cached.write().await = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });

        debug!(%expires_at, "token refreshed");
        Ok(token)
    }
}
