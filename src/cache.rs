//! Last-good value caching
//!
//! One [`CachedEntry`] per feed. A fetch outcome is recorded with
//! [`CachedEntry::record`]: success replaces the value, failure leaves it
//! alone, and either way the attempt time is remembered so the scheduler can
//! enforce its interval.

use crate::Timestamp;

#[derive(Clone, Debug, PartialEq)]
pub struct CachedEntry<T> {
    value: Option<T>,
    last_fetch: Option<Timestamp>,
}

impl<T> CachedEntry<T> {
    /// An entry that has never been fetched.
    pub fn new() -> Self {
        Self {
            value: None,
            last_fetch: None,
        }
    }

    /// Last successfully fetched value, if any.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Time of the most recent attempt, successful or not.
    pub fn last_fetch(&self) -> Option<Timestamp> {
        self.last_fetch
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Whether at least one fetch has been attempted.
    pub fn attempted(&self) -> bool {
        self.last_fetch.is_some()
    }

    /// Seconds since the last attempt, or `None` if there was none.
    /// A clock that went backwards reads as zero.
    pub fn age(&self, now: Timestamp) -> Option<u64> {
        self.last_fetch.map(|last| now.saturating_sub(last))
    }

    /// Record the outcome of a fetch attempted at `now`.
    ///
    /// Returns `true` if the value changed.
    pub fn record(&mut self, outcome: Option<T>, now: Timestamp) -> bool {
        self.last_fetch = Some(now);
        match outcome {
            Some(value) => {
                self.value = Some(value);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for CachedEntry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_empty() {
        let entry: CachedEntry<u32> = CachedEntry::new();
        assert!(!entry.has_value());
        assert!(!entry.attempted());
        assert_eq!(entry.age(100), None);
    }

    #[test]
    fn test_failure_marks_attempt_without_value() {
        let mut entry: CachedEntry<u32> = CachedEntry::new();
        assert!(!entry.record(None, 5));
        assert!(!entry.has_value());
        assert_eq!(entry.last_fetch(), Some(5));
    }

    #[test]
    fn test_value_never_regresses_on_failure() {
        // Every prefix of a mixed outcome sequence shows the latest success
        let outcomes = [None, Some(1), None, None, Some(2), None, Some(3), None];
        let mut entry = CachedEntry::new();
        let mut last_good = None;
        for (t, outcome) in outcomes.into_iter().enumerate() {
            if outcome.is_some() {
                last_good = outcome;
            }
            entry.record(outcome, t as Timestamp * 10);
            assert_eq!(entry.value().copied(), last_good);
            assert_eq!(entry.last_fetch(), Some(t as Timestamp * 10));
        }
    }

    #[test]
    fn test_age_saturates_on_clock_regression() {
        let mut entry: CachedEntry<u32> = CachedEntry::new();
        entry.record(Some(7), 100);
        assert_eq!(entry.age(160), Some(60));
        assert_eq!(entry.age(40), Some(0));
    }
}
