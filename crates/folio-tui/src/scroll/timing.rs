//! Time calculation helpers for scroll animations

use std::time::{Duration, Instant};

/// Fraction of `duration` elapsed between `start` and `now`, clamped to [0, 1]
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Frame interval for a target frame rate (~60fps when unset)
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_micros(1_000_000 / fps as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let d = Duration::from_millis(200);
        assert_eq!(progress(start, d, start), 0.0);
        assert!((progress(start, d, start + Duration::from_millis(50)) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, d, start + Duration::from_secs(5)), 1.0);
        assert_eq!(progress(start, Duration::ZERO, start), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(100.0, 300.0, 0.5), 200.0);
        assert_eq!(lerp(300.0, 100.0, 1.0), 100.0);
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(50), Duration::from_millis(20));
    }
}
