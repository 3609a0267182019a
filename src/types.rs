//! Core types used throughout StockLens
//!
//! Defines the price sample structure exchanged with the evaluation service
//! and passed through to API clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped price sample for a ticker
///
/// Deserialized straight from the evaluation service and serialized back out
/// to API clients unchanged, so the wire field names follow the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Traded price at the observation instant
    pub price: f64,
    /// When the provider last refreshed this price
    #[serde(rename = "lastUpdatedAt")]
    pub last_updated_at: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(price: f64, last_updated_at: DateTime<Utc>) -> Self {
        Self {
            price,
            last_updated_at,
        }
    }
}
