//! Scroll animation controller
//!
//! Requests made between two updates are batched: line and page scrolls
//! accumulate into a pending delta that is applied once, on the next
//! `update`, as a single animation toward the combined target.

use std::time::{Duration, Instant};

use folio_core::{EasingType, ScrollBehavior, ScrollConfig};

use super::easing::ease;
use super::timing::{lerp, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Viewport scroll position in document pixels
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current: f64,
    pending_delta: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.config.animation_duration_ms)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether the next `update` can move the viewport
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final position once the running animation completes
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Jump without animating, dropping pending work
    pub fn set_position(&mut self, position: f64) {
        self.animation = None;
        self.pending_delta = 0.0;
        self.current = position.max(0.0);
    }

    /// Scroll to an absolute position, clamped to `[0, max]`
    pub fn scroll_to(&mut self, target: f64, max: f64, behavior: ScrollBehavior, now: Instant) {
        let target = target.clamp(0.0, max.max(0.0));
        self.pending_delta = 0.0;

        if behavior == ScrollBehavior::Instant || !self.is_smooth() {
            self.set_position(target);
            return;
        }
        if (target - self.current).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll relative to the current target (positive = down)
    pub fn scroll_by(&mut self, delta: f64, max: f64) {
        if !self.is_smooth() {
            let position = (self.current + delta).clamp(0.0, max.max(0.0));
            self.set_position(position);
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance the animation and return the position to render
    pub fn update(&mut self, max: f64, now: Instant) -> f64 {
        let max = max.max(0.0);

        if self.pending_delta != 0.0 {
            let target = (self.target() + self.pending_delta).clamp(0.0, max);
            self.pending_delta = 0.0;
            if (target - self.current).abs() >= f64::EPSILON {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to: target,
                    duration: self.duration(),
                    easing: self.config.easing,
                });
            } else {
                // Scrolled back onto the current position
                self.animation = None;
            }
        }

        if let Some(anim) = &self.animation {
            let t = progress(anim.start, anim.duration, now);
            if t >= 1.0 {
                self.current = anim.to.min(max);
                self.animation = None;
            } else {
                self.current = lerp(anim.from, anim.to, ease(anim.easing, t)).min(max);
            }
        } else if self.current > max {
            // Content shrank (resize)
            self.current = max;
        }

        self.current
    }

    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64) -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing: EasingType::Linear,
            ..Default::default()
        }
    }

    #[test]
    fn test_instant_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        animator.scroll_to(480.0, 1000.0, ScrollBehavior::Smooth, Instant::now());
        assert_eq!(animator.current(), 480.0);
        assert!(!animator.is_animating());

        animator.scroll_by(-1000.0, 1000.0);
        assert_eq!(animator.current(), 0.0);
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let start = Instant::now();
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_to(400.0, 1000.0, ScrollBehavior::Smooth, start);
        assert!(animator.is_animating());
        assert_eq!(animator.target(), 400.0);

        let mid = animator.update(1000.0, start + Duration::from_millis(50));
        assert!((mid - 200.0).abs() < 1e-6);

        assert_eq!(animator.update(1000.0, start + Duration::from_millis(100)), 400.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_instant_behavior_skips_animation() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_to(300.0, 1000.0, ScrollBehavior::Instant, Instant::now());
        assert_eq!(animator.current(), 300.0);
        assert!(!animator.needs_update());
    }

    #[test]
    fn test_scroll_by_batches_until_update() {
        let start = Instant::now();
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_by(16.0, 1000.0);
        animator.scroll_by(16.0, 1000.0);
        animator.scroll_by(16.0, 1000.0);
        assert!(animator.needs_update());
        assert!(!animator.is_animating());

        animator.update(1000.0, start);
        assert_eq!(animator.target(), 48.0);
    }

    #[test]
    fn test_target_clamped_to_max() {
        let start = Instant::now();
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.scroll_to(5000.0, 640.0, ScrollBehavior::Smooth, start);
        assert_eq!(animator.target(), 640.0);

        animator.scroll_by(-9000.0, 640.0);
        assert_eq!(animator.update(640.0, start), 0.0);
        assert_eq!(animator.target(), 0.0);
        assert!(!animator.is_animating());
        assert_eq!(animator.update(640.0, start + Duration::from_millis(50)), 0.0);
    }

    #[test]
    fn test_shrinking_content_clamps_position() {
        let mut animator = ScrollAnimator::new(smooth(100));
        animator.set_position(900.0);
        assert_eq!(animator.update(500.0, Instant::now()), 500.0);
    }
}
