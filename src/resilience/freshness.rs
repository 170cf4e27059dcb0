use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

const OFFLINE_AFTER_FAILURES: u32 = 3;
const STALE_GRACE_SECS: i64 = 60;
const MAX_INTERVAL_SECS: i64 = 365 * 24 * 3600;

impl FreshnessState {
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Self::Fresh => None,
            Self::Stale => Some("⚠ stale"),
            Self::Offline => Some("⚠ offline"),
        }
    }
}

/// Data older than one refresh interval (plus a minute of grace) is stale;
/// older than three intervals, or after three failed fetches in a row, it is
/// offline.
#[must_use]
pub fn evaluate_freshness(
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    refresh_interval_secs: u64,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= OFFLINE_AFTER_FAILURES {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let interval = i64::try_from(refresh_interval_secs)
        .unwrap_or(MAX_INTERVAL_SECS)
        .min(MAX_INTERVAL_SECS);
    let age = Utc::now() - last_success;

    if age > Duration::seconds(interval.saturating_mul(3))
        || consecutive_failures >= OFFLINE_AFTER_FAILURES
    {
        FreshnessState::Offline
    } else if age > Duration::seconds(interval.saturating_add(STALE_GRACE_SECS))
        || consecutive_failures >= 1
    {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}
