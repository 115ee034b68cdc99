use chrono::{DateTime, Duration, Utc};

/// Cached solver data older than this is refetched.
pub const DEFAULT_TTL_DAYS: i64 = 3;

/// Decides when a cached entry must be fetched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    ttl: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        FreshnessPolicy {
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }
}

impl FreshnessPolicy {
    pub fn new(ttl: Duration) -> Self {
        FreshnessPolicy { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn should_refetch(
        &self,
        last_updated: Option<DateTime<Utc>>,
        forced: bool,
        now: DateTime<Utc>,
    ) -> bool {
        if forced {
            return true;
        }
        match last_updated {
            Some(last_updated) => now - last_updated >= self.ttl,
            None => true,
        }
    }
}
