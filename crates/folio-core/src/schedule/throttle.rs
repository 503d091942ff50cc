use std::time::{Duration, Instant};

/// Runs the wrapped action immediately, then ignores calls until `limit`
/// has elapsed.
pub struct Throttle<T, F> {
    action: F,
    limit: Duration,
    cooldown_until: Option<Instant>,
    _arg: std::marker::PhantomData<fn(T)>,
}

impl<T, F: FnMut(T)> Throttle<T, F> {
    pub fn new(limit: Duration, action: F) -> Self {
        Self {
            action,
            limit,
            cooldown_until: None,
            _arg: std::marker::PhantomData,
        }
    }

    /// Run the action unless cooling down. Returns whether it ran.
    pub fn call(&mut self, now: Instant, arg: T) -> bool {
        if self.cooldown_until.is_some_and(|until| now < until) {
            return false;
        }
        (self.action)(arg);
        self.cooldown_until = Some(now + self.limit);
        true
    }

    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_calls_during_cooldown() {
        let start = Instant::now();
        let mut seen = Vec::new();
        {
            let mut throttle = Throttle::new(Duration::from_millis(100), |v: u32| seen.push(v));
            assert!(throttle.call(start, 1));
            assert!(!throttle.call(start + Duration::from_millis(10), 2));
            assert!(throttle.is_cooling_down(start + Duration::from_millis(99)));
            assert!(throttle.call(start + Duration::from_millis(100), 3));
        }
        assert_eq!(seen, [1, 3]);
    }
}
