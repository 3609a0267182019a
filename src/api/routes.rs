//! StockLens HTTP API
//!
//! REST endpoints for chart frontends: windowed average price per ticker
//! and Pearson correlation between two tickers.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tower_http::cors::{Any, CorsLayer};

use super::error::ApiError;
use super::types::{CorrelationResponse, StockSummary};
use super::SharedSource;
use crate::analytics::{average_price, pearson};
use crate::upstream::PriceHistorySource;

/// Create the API router with all endpoints
pub fn create_router(source: SharedSource) -> Router {
    Router::new()
        .route("/stocks/:ticker", get(get_average_stock_price))
        .route("/stockcorrelation", get(get_stock_correlation))
        .route("/health", get(get_health))
        .with_state(source)
        // CORS for browser clients
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[derive(Debug, Deserialize)]
struct AveragePriceQuery {
    minutes: Option<u32>,
    aggregation: Option<String>,
}

/// GET /stocks/:ticker?minutes=30&aggregation=average
async fn get_average_stock_price(
    Path(ticker): Path<String>,
    Query(query): Query<AveragePriceQuery>,
    State(source): State<SharedSource>,
) -> Result<Json<StockSummary>, ApiError> {
    let minutes = query.minutes.ok_or(ApiError::InvalidParams)?;
    if query.aggregation.as_deref() != Some("average") {
        return Err(ApiError::InvalidParams);
    }

    let summary = fetch_stock_summary(source.as_ref(), &ticker, minutes)
        .await
        .map_err(ApiError::UpstreamFetch)?;
    Ok(Json(summary))
}

/// GET /stockcorrelation?ticker=AAPL&ticker=MSFT&minutes=30
///
/// The ticker key repeats, so the query string is read as raw pairs; any
/// count other than exactly two is rejected.
async fn get_stock_correlation(
    Query(params): Query<Vec<(String, String)>>,
    State(source): State<SharedSource>,
) -> Result<Json<CorrelationResponse>, ApiError> {
    let mut tickers: Vec<String> = Vec::new();
    let mut minutes: Option<u32> = None;
    for (key, value) in &params {
        match key.as_str() {
            "ticker" => tickers.push(normalize_ticker(value)),
            "minutes" => minutes = value.parse().ok(),
            _ => {}
        }
    }

    let minutes = minutes.ok_or(ApiError::InvalidParams)?;
    let [ticker_a, ticker_b]: [String; 2] =
        tickers.try_into().map_err(|_| ApiError::InvalidParams)?;

    let (summary_a, summary_b) = tokio::try_join!(
        fetch_stock_summary(source.as_ref(), &ticker_a, minutes),
        fetch_stock_summary(source.as_ref(), &ticker_b, minutes),
    )
    .map_err(ApiError::CorrelationFailed)?;

    let prices_a: Vec<f64> = summary_a.price_history.iter().map(|p| p.price).collect();
    let prices_b: Vec<f64> = summary_b.price_history.iter().map(|p| p.price).collect();

    // Crude trim to the shorter series, cutting from the start of each.
    let shared_len = prices_a.len().min(prices_b.len());
    let correlation = pearson(&prices_a[..shared_len], &prices_b[..shared_len]);

    let stocks = HashMap::from([(ticker_a, summary_a), (ticker_b, summary_b)]);
    Ok(Json(CorrelationResponse {
        correlation,
        stocks,
    }))
}

/// GET /health - liveness probe
async fn get_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Fetch one ticker's window and bundle it with its average price
///
/// An empty history carries a NaN average, which serializes as null.
async fn fetch_stock_summary(
    source: &dyn PriceHistorySource,
    ticker: &str,
    minutes: u32,
) -> Result<StockSummary> {
    let price_history = source.price_history(ticker, minutes).await?;
    let average = average_price(&price_history).unwrap_or(f64::NAN);
    Ok(StockSummary {
        average_price: average,
        price_history,
    })
}

/// Clients following the provider's URL template send tickers as `{AAPL}`;
/// strip one pair of braces plus surrounding whitespace.
fn normalize_ticker(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('{').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('}').unwrap_or(trimmed);
    trimmed.to_string()
}
