//! Analytics module - Price series statistics
//!
//! The statistical core of StockLens: average-price aggregation, sample
//! Pearson correlation, and latest-known-price alignment of two
//! asynchronously sampled series.

mod align;
mod average;
mod correlation;

pub use align::{align, AlignedPair};
pub use average::average_price;
pub use correlation::pearson;
