//! API Types
//!
//! DTOs for HTTP responses to browser clients. Field names stay camelCase
//! on the wire to match what chart frontends already consume.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::PricePoint;

/// Per-ticker payload: the averaged window plus the raw history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    /// Arithmetic mean of the window; NaN (empty history) serializes as null
    pub average_price: f64,
    pub price_history: Vec<PricePoint>,
}

/// Correlation endpoint payload: the coefficient plus both summaries keyed
/// by ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResponse {
    pub correlation: f64,
    pub stocks: HashMap<String, StockSummary>,
}
