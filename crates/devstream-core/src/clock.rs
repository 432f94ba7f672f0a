//! Uniform timestamp allocation.
//!
//! Every temporal relationship in the generated stream is built from
//! repeated calls to [`sample_between`].

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Sample an instant uniformly, at second granularity, in `[start, end]`
/// (inclusive on both ends).
///
/// Degenerate windows clamp: whenever `end <= start` the result is exactly
/// `start`, so interval arithmetic that collapses or inverts a window can
/// never drive a negative sampling range.
pub fn sample_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let width = end.signed_duration_since(start).num_seconds();
    if width <= 0 {
        return start;
    }
    start + Duration::seconds(rng.gen_range(0..=width))
}
