//! Average-price aggregation over a fetched window

use crate::types::PricePoint;

/// Arithmetic mean of the price field across all points
///
/// Returns `None` for an empty series so callers guard explicitly instead
/// of letting a 0/0 leak into downstream JSON.
pub fn average_price(series: &[PricePoint]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    let sum: f64 = series.iter().map(|p| p.price).sum();
    Some(sum / series.len() as f64)
}
