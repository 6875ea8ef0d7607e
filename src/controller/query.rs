//! Query sequencing: debounce slot and generation tracking

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Sequence number of an issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw sequence number
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out generations and remembers which one may still update the overlay
///
/// Only the most recently issued generation is current. Teardown clears the
/// current generation so results for a dead session are dropped too.
#[derive(Debug, Default)]
pub(crate) struct QueryTracker {
    issued: u64,
    current: Option<Generation>,
}

impl QueryTracker {
    /// Issue a new generation, superseding every earlier one
    pub(crate) fn next(&mut self) -> Generation {
        self.issued += 1;
        let generation = Generation(self.issued);
        self.current = Some(generation);
        generation
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        self.current == Some(generation)
    }

    pub(crate) fn invalidate(&mut self) {
        self.current = None;
    }
}

/// Single-slot debounce: the latest edit wins and restarts the wait
#[derive(Debug)]
pub(crate) struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub(crate) const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the wait from `now`
    pub(crate) fn schedule(&mut self, raw: String, now: Instant) {
        self.pending = Some((raw, now + self.delay));
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub(crate) fn take(&mut self) -> Option<String> {
        self.pending.take().map(|(raw, _)| raw)
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }

    pub(crate) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_increase() {
        let mut tracker = QueryTracker::default();
        let first = tracker.next();
        let second = tracker.next();
        assert!(second > first);
        assert_eq!(second.get(), 2);
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn test_only_latest_generation_is_current() {
        let mut tracker = QueryTracker::default();
        let first = tracker.next();
        assert!(tracker.is_current(first));

        let second = tracker.next();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));

        tracker.invalidate();
        assert!(!tracker.is_current(second));

        let third = tracker.next();
        assert!(third > second);
        assert!(tracker.is_current(third));
    }

    #[test]
    fn test_debouncer_keeps_latest_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.schedule("a".into(), start);
        debouncer.schedule("ab".into(), start + Duration::from_millis(50));

        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(250)));
        assert_eq!(debouncer.take().as_deref(), Some("ab"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.take(), None);
    }

    #[test]
    fn test_debouncer_cancel() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        debouncer.schedule("abc".into(), Instant::now());
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
    }
}
