use chrono::{DateTime, Duration, Utc};

const STALE_AFTER_MINUTES: i64 = 10;
const OFFLINE_AFTER_MINUTES: i64 = 30;
const OFFLINE_AFTER_FAILURES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

impl FreshnessState {
    #[must_use]
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Self::Fresh => None,
            Self::Stale => Some("stale"),
            Self::Offline => Some("offline"),
        }
    }
}

/// Bookkeeping for the last refresh attempts.
#[derive(Debug, Clone)]
pub struct RefreshMetadata {
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub state: FreshnessState,
    pub consecutive_failures: u32,
}

impl Default for RefreshMetadata {
    fn default() -> Self {
        Self {
            last_success: None,
            last_attempt: None,
            state: FreshnessState::Stale,
            consecutive_failures: 0,
        }
    }
}

impl RefreshMetadata {
    pub fn mark_attempt(&mut self, now: DateTime<Utc>) {
        self.last_attempt = Some(now);
    }

    pub fn mark_success(&mut self, now: DateTime<Utc>) {
        self.last_attempt = Some(now);
        self.last_success = Some(now);
        self.consecutive_failures = 0;
        self.state = FreshnessState::Fresh;
    }

    pub fn mark_failure(&mut self, now: DateTime<Utc>) {
        self.last_attempt = Some(now);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.reevaluate(now);
    }

    pub fn reevaluate(&mut self, now: DateTime<Utc>) {
        self.state = evaluate_freshness(self.last_success, self.consecutive_failures, now);
    }
}

#[must_use]
pub fn evaluate_freshness(
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    now: DateTime<Utc>,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= OFFLINE_AFTER_FAILURES {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let age = now - last_success;

    if age > Duration::minutes(OFFLINE_AFTER_MINUTES)
        || consecutive_failures >= OFFLINE_AFTER_FAILURES
    {
        FreshnessState::Offline
    } else if age > Duration::minutes(STALE_AFTER_MINUTES) || consecutive_failures >= 1 {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}
