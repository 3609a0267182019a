//! HTTP API for StockLens
//!
//! REST endpoints serving average-price and correlation queries to browser
//! clients, plus a liveness probe.

mod error;
mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::create_router;

use std::sync::Arc;

use crate::upstream::PriceHistorySource;

/// Shared handler state: the upstream source behind its seam
pub type SharedSource = Arc<dyn PriceHistorySource>;
