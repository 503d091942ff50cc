//! Smooth scrolling for the page viewport
//!
//! - `easing` - pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `animation` - the animator that turns scroll requests into per-frame
//!   positions
//!
//! Positions are document pixels; the renderer converts them to rows.

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::ScrollAnimator;
pub use easing::ease;
