//! Boundary behaviours: independent handlers that do not interact with the
//! scroll controller.

pub mod clicks;
pub mod hover;
pub mod keyboard;
pub mod loader;
pub mod press;
pub mod typing;

pub use clicks::{route_click, ClickAction, LinkKind};
pub use keyboard::{KeyInput, KeyPress, Shortcut, SECTION_SHORTCUTS};
pub use typing::Typewriter;
