use std::collections::BTreeMap;
use std::time::Instant;

/// Handle returned by [`TimerQueue::schedule`], used to cancel the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Deadline-ordered one-shot timers carrying a task payload.
///
/// The queue never sleeps on its own; the host polls it with the current
/// time and sleeps until [`TimerQueue::next_deadline`].
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    timers: BTreeMap<TimerId, (Instant, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            timers: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Instant, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, (at, task));
        id
    }

    /// Cancel a pending timer. Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(&id).map(|(_, task)| task)
    }

    /// Remove and return every task due at `now`, earliest deadline first.
    /// Timers sharing a deadline fire in scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Vec<T> {
        let mut due: Vec<(Instant, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, (at, _))| *at <= now)
            .map(|(id, (at, _))| (*at, *id))
            .collect();
        due.sort();

        due.into_iter()
            .filter_map(|(_, id)| self.timers.remove(&id).map(|(_, task)| task))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|(at, _)| *at).min()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pop_due_in_deadline_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start + Duration::from_millis(300), "late");
        queue.schedule(start + Duration::from_millis(100), "early");
        queue.schedule(start + Duration::from_millis(100), "early-second");

        assert!(queue.pop_due(start).is_empty());
        assert_eq!(
            queue.pop_due(start + Duration::from_millis(150)),
            ["early", "early-second"]
        );
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.next_deadline(),
            Some(start + Duration::from_millis(300))
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        let id = queue.schedule(start, 1);
        assert!(queue.is_pending(id));
        assert_eq!(queue.cancel(id), Some(1));
        assert_eq!(queue.cancel(id), None);
        assert!(queue.pop_due(start).is_empty());
        assert!(queue.next_deadline().is_none());
    }
}
