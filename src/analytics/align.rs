//! Timestamp alignment of two asynchronously sampled price series

use crate::types::PricePoint;

/// One paired observation produced by [`align`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    /// Price of the primary-series point the pair was emitted for
    pub primary: f64,
    /// Latest secondary price known at that point's timestamp
    pub secondary: f64,
}

/// Merge two price series into pairs using latest-known-price semantics
///
/// The series whose first observation is strictly earlier becomes the
/// primary; on a tie `series_b` is primary. Each primary point is paired
/// with the most recent secondary price observed at or before its
/// timestamp; primary points that precede every secondary observation are
/// dropped. Output preserves primary order and never exceeds the primary
/// length.
///
/// The secondary scan restarts from the front for every primary point and
/// stops at the first timestamp past it, so with out-of-order input
/// "latest" means last seen in iteration order, not newest by clock.
/// Callers depend on that exact behavior; do not replace the rescan with a
/// monotonic cursor.
pub fn align(series_a: &[PricePoint], series_b: &[PricePoint]) -> Vec<AlignedPair> {
    let (first_a, first_b) = match (series_a.first(), series_b.first()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Vec::new(),
    };

    let (primary, secondary) = if first_a.last_updated_at < first_b.last_updated_at {
        (series_a, series_b)
    } else {
        (series_b, series_a)
    };

    let mut pairs = Vec::with_capacity(primary.len());
    for point in primary {
        let mut latest = None;
        for candidate in secondary {
            if candidate.last_updated_at <= point.last_updated_at {
                latest = Some(candidate.price);
            } else {
                break;
            }
        }
        if let Some(secondary_price) = latest {
            pairs.push(AlignedPair {
                primary: point.price,
                secondary: secondary_price,
            });
        }
    }
    pairs
}
