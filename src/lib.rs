//! StockLens Library
//!
//! Stock price aggregation and correlation service over the exchange
//! evaluation API

pub mod analytics;
pub mod api;
pub mod config;
pub mod types;
pub mod upstream;
