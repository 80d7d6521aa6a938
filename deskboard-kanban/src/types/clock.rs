//! Timestamp helpers

use chrono::{DateTime, Duration, Utc};

/// Current time, nudged forward so it is strictly after `previous`.
///
/// Two mutations inside the same clock tick still produce distinct,
/// increasing `updated_at` values. At the end of the representable range
/// the previous value is returned unchanged.
pub(crate) fn advance(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev
            .checked_add_signed(Duration::microseconds(1))
            .unwrap_or(prev),
        _ => now,
    }
}
