pub mod app;
pub mod event;
pub mod host;
pub mod input;
pub mod keymap;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod visibility;
pub mod widgets;

pub use app::App;
pub use event::{AppEvent, EventHandler, FrameClock};
pub use theme::Theme;
