pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod navigation;
pub mod page;
pub mod presentation;
pub mod runtime;
pub mod schedule;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use controller::{FrameScheduler, IntersectionEvent, ScrollController, VisibilitySubscription};
pub use error::{Error, Result};
pub use navigation::{ScrollBehavior, ScrollBlock, ScrollHost};
pub use page::{ElementId, ElementKind, Page};
pub use presentation::{ElementStyle, Presentation};
pub use runtime::{LinkHost, PageEvent, PageHost, PageRuntime};
