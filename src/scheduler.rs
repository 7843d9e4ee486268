//! # Refresh Scheduling
//!
//! Decides, once per loop tick, whether a feed is due for a fetch. Each feed
//! has a fixed [`RefreshPolicy`]:
//!
//! | Feed    | First fetch | Then                                          |
//! |---------|-------------|-----------------------------------------------|
//! | Weather | immediately | every 600 s                                   |
//! | HF      | immediately | every 1800 s                                  |
//! | Time    | immediately | every 30 s until synced, then every 3600 s    |
//!
//! Intervals are measured from the last *attempt*, so a failing feed is
//! retried on the same cadence as a healthy one and never hammered.

use crate::cache::CachedEntry;
use crate::Timestamp;
use std::future::Future;

/// How often a feed may be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Fetch when at least `every` seconds have passed since the last attempt.
    Interval { every: u64 },
    /// Retry every `backoff` seconds while no value is cached, then resync
    /// every `resync` seconds once one is.
    Sync { resync: u64, backoff: u64 },
}

pub const WEATHER_POLICY: RefreshPolicy = RefreshPolicy::Interval { every: 600 };
pub const HF_POLICY: RefreshPolicy = RefreshPolicy::Interval { every: 1800 };
pub const TIME_POLICY: RefreshPolicy = RefreshPolicy::Sync {
    resync: 3600,
    backoff: 30,
};

impl RefreshPolicy {
    /// Whether `entry` should be fetched at `now`.
    pub fn is_due<T>(&self, entry: &CachedEntry<T>, now: Timestamp) -> bool {
        let Some(age) = entry.age(now) else {
            return true;
        };
        match *self {
            RefreshPolicy::Interval { every } => age >= every,
            RefreshPolicy::Sync { resync, backoff } => {
                if entry.has_value() {
                    age >= resync
                } else {
                    age >= backoff
                }
            }
        }
    }
}

/// Fetch into `entry` if `policy` says it is due.
///
/// `fetch` is called at most once and awaited to completion. Returns `true`
/// when a fetch was attempted.
pub async fn maybe_refresh<T, F, Fut>(
    entry: &mut CachedEntry<T>,
    policy: RefreshPolicy,
    now: Timestamp,
    fetch: F,
) -> bool
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    if !policy.is_due(entry, now) {
        return false;
    }
    let outcome = fetch().await;
    entry.record(outcome, now);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::future::ready;

    #[test]
    fn test_first_fetch_is_unconditional() {
        let entry: CachedEntry<u8> = CachedEntry::new();
        assert!(WEATHER_POLICY.is_due(&entry, 0));
        assert!(HF_POLICY.is_due(&entry, 0));
        assert!(TIME_POLICY.is_due(&entry, 0));
    }

    #[test]
    fn test_interval_gating() {
        let mut entry: CachedEntry<u8> = CachedEntry::new();
        entry.record(Some(1), 1000);
        assert!(!WEATHER_POLICY.is_due(&entry, 1599));
        assert!(WEATHER_POLICY.is_due(&entry, 1600));
        assert!(!HF_POLICY.is_due(&entry, 2799));
        assert!(HF_POLICY.is_due(&entry, 2800));
    }

    #[test]
    fn test_interval_applies_after_failure_too() {
        let mut entry: CachedEntry<u8> = CachedEntry::new();
        entry.record(None, 1000);
        assert!(!WEATHER_POLICY.is_due(&entry, 1300));
        assert!(WEATHER_POLICY.is_due(&entry, 1601));
    }

    #[test]
    fn test_time_backoff_while_unsynced() {
        let mut entry: CachedEntry<i64> = CachedEntry::new();
        for attempt in 0..5 {
            let t = 100 + attempt * 30;
            assert!(TIME_POLICY.is_due(&entry, t));
            entry.record(None, t);
            assert!(!TIME_POLICY.is_due(&entry, t + 29));
        }
    }

    #[test]
    fn test_time_resync_hourly_once_synced() {
        let mut entry: CachedEntry<i64> = CachedEntry::new();
        entry.record(Some(1_700_000_000), 500);
        assert!(!TIME_POLICY.is_due(&entry, 530));
        assert!(!TIME_POLICY.is_due(&entry, 4099));
        assert!(TIME_POLICY.is_due(&entry, 4100));

        // A failed resync keeps the old value and waits another hour
        entry.record(None, 4100);
        assert!(entry.has_value());
        assert!(!TIME_POLICY.is_due(&entry, 4130));
        assert!(TIME_POLICY.is_due(&entry, 7700));
    }

    #[test]
    fn test_clock_regression_is_not_due() {
        let mut entry: CachedEntry<u8> = CachedEntry::new();
        entry.record(Some(1), 1000);
        assert!(!WEATHER_POLICY.is_due(&entry, 10));
    }

    #[tokio::test]
    async fn test_maybe_refresh_calls_fetch_only_when_due() {
        let calls = Cell::new(0);
        let mut entry: CachedEntry<u32> = CachedEntry::new();

        let fetch = || {
            calls.set(calls.get() + 1);
            ready(Some(calls.get()))
        };
        assert!(maybe_refresh(&mut entry, WEATHER_POLICY, 10, fetch).await);
        assert_eq!(entry.value(), Some(&1));

        for now in [11, 300, 609] {
            let attempted = maybe_refresh(&mut entry, WEATHER_POLICY, now, || {
                calls.set(calls.get() + 1);
                ready(Some(99))
            })
            .await;
            assert!(!attempted);
        }
        assert_eq!(calls.get(), 1);

        assert!(maybe_refresh(&mut entry, WEATHER_POLICY, 610, || ready(None)).await);
        assert_eq!(entry.value(), Some(&1));
        assert_eq!(entry.last_fetch(), Some(610));
    }
}
