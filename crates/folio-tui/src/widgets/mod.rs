mod loader;
mod page;
mod status_bar;

pub use loader::LoaderWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;
