//! Time-window replay bound for signed login timestamps.
//! A signature stays valid for every request inside the window.

use chrono::{DateTime, Duration, Utc};
use profile_types::AuthError;

pub const DEFAULT_WINDOW_SECS: i64 = 86_400;

pub fn default_window() -> Duration {
    Duration::seconds(DEFAULT_WINDOW_SECS)
}

/// Returns `PayloadExpired` if `signed_at` is more than `window` before `now`.
/// Exactly `window` old is still fresh; future timestamps are accepted.
pub fn check_fresh(
    signed_at: DateTime<Utc>,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<(), AuthError> {
    if now - signed_at > window {
        return Err(AuthError::PayloadExpired);
    }
    Ok(())
}
