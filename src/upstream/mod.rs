//! Upstream module - Evaluation service access
//!
//! Fetches windowed price histories from the exchange evaluation API and
//! manages the bearer token the provider requires.

mod client;
mod token;

pub use client::EvaluationClient;
pub use token::{Credentials, TokenCache};

use anyhow::Result;
use async_trait::async_trait;

use crate::types::PricePoint;

/// Source of windowed price histories
///
/// Implemented by the HTTP client; tests substitute a mock so handlers run
/// without the network.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Price history for `ticker` over the trailing `minutes` window
    async fn price_history(&self, ticker: &str, minutes: u32) -> Result<Vec<PricePoint>>;
}
