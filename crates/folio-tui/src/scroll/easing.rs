//! Easing curves for scroll animations

use folio_core::EasingType;

/// Apply an easing curve to a progress value; input is clamped to [0, 1]
#[inline]
pub fn ease(kind: EasingType, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match kind {
        EasingType::None => {
            if t < 1.0 {
                0.0
            } else {
                1.0
            }
        }
        EasingType::Linear => t,
        EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
        EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
        EasingType::EaseOut => {
            if t >= 1.0 {
                1.0
            } else {
                1.0 - 2.0_f64.powf(-10.0 * t)
            }
        }
    }
}
