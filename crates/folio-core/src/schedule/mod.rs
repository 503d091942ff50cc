//! Scheduling policies: a timer queue with explicit handles, and the
//! debounce/throttle wrappers; debounce holds a handle into its own queue.

mod debounce;
mod throttle;
mod timer;

pub use debounce::Debounce;
pub use throttle::Throttle;
pub use timer::{TimerId, TimerQueue};
