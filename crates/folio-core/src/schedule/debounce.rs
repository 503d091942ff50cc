use std::time::{Duration, Instant};

use super::timer::{TimerId, TimerQueue};

/// Runs the wrapped action once calls stop arriving for `wait`.
///
/// Each call cancels the pending timer and schedules a fresh one carrying the
/// new argument; the action fires from [`Debounce::poll`].
pub struct Debounce<T, F> {
    action: F,
    wait: Duration,
    timers: TimerQueue<T>,
    pending: Option<TimerId>,
}

impl<T, F: FnMut(T)> Debounce<T, F> {
    pub fn new(wait: Duration, action: F) -> Self {
        Self {
            action,
            wait,
            timers: TimerQueue::new(),
            pending: None,
        }
    }

    /// Restart the quiet-period timer with a new argument
    pub fn call(&mut self, now: Instant, arg: T) {
        self.cancel();
        self.pending = Some(self.timers.schedule(now + self.wait, arg));
    }

    /// Fire the action if the quiet period has elapsed. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(arg) = self.timers.pop_due(now).pop() else {
            return false;
        };
        self.pending = None;
        (self.action)(arg);
        true
    }

    /// Drop the pending invocation without running it
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some_and(|id| self.timers.is_pending(id))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}
