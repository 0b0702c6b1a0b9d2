//! Debounced value propagation.
//!
//! A [`Debouncer`] holds at most one scheduled value. Scheduling a new value
//! cancels the previous one, so a burst of keystrokes inside the quiet period
//! produces a single update carrying the last value. Time is passed in by
//! the caller; nothing here reads a clock.

use std::time::{Duration, Instant};

/// Default quiet period for typed search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies one scheduled task. A handle goes stale once the task fires,
/// is rescheduled, or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Pending<V> {
    handle: TaskHandle,
    value: V,
    due: Instant,
}

/// A cancellable, single-slot scheduled task.
///
/// ```
/// use std::time::{Duration, Instant};
/// use listview::Debouncer;
///
/// let mut debouncer = Debouncer::new(Duration::from_millis(500));
/// let t0 = Instant::now();
///
/// debouncer.schedule("a", t0);
/// debouncer.schedule("al", t0 + Duration::from_millis(100));
/// debouncer.schedule("ali", t0 + Duration::from_millis(200));
///
/// assert_eq!(debouncer.poll(t0 + Duration::from_millis(600)), None);
/// assert_eq!(debouncer.poll(t0 + Duration::from_millis(700)), Some("ali"));
/// assert!(!debouncer.is_pending());
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<V> {
    delay: Duration,
    pending: Option<Pending<V>>,
    next_id: u64,
}

impl<V> Debouncer<V> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
            next_id: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` to fire one quiet period after `now`, replacing any
    /// outstanding task.
    pub fn schedule(&mut self, value: V, now: Instant) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(Pending {
            handle,
            value,
            due: now + self.delay,
        });
        handle
    }

    /// Returns the scheduled value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Fires the outstanding task immediately, if any.
    pub fn flush(&mut self) -> Option<V> {
        self.pending.take().map(|p| p.value)
    }

    /// Cancels the outstanding task. Cancelling twice is a no-op.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `handle` still names the outstanding task.
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.pending.as_ref().is_some_and(|p| p.handle == handle)
    }

    pub fn pending_value(&self) -> Option<&V> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Time left before the outstanding task fires.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}

impl<V> Default for Debouncer<V> {
    fn default() -> Self {
        Debouncer::new(DEFAULT_DEBOUNCE)
    }
}
