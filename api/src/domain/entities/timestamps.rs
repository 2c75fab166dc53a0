//! Timestamp helpers shared by the aggregates
//!
//! All timestamps are UTC truncated to microseconds, the resolution of a
//! PostgreSQL `timestamptz`, so a value and its stored round-trip compare equal.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Current time at storage resolution
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A fresh `updated_at` that is strictly later than `previous`
pub fn refreshed(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
