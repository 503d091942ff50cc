//! Jump-scroll to named sections

use tracing::debug;

use crate::page::{ElementId, Page};

/// Animation used when scrolling an element into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Which edge of the viewport the element is aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    /// Element top aligned with the viewport top
    Start,
    /// Scroll only as far as needed to make the element visible
    Nearest,
}

/// Host facility that scrolls the viewport
pub trait ScrollHost {
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior, block: ScrollBlock);
}

/// Smoothly scroll so the named section's top meets the viewport top.
/// Unknown ids are ignored; returns whether a scroll was issued.
pub fn scroll_to_section<H>(page: &Page, section_id: &str, host: &mut H) -> bool
where
    H: ScrollHost + ?Sized,
{
    match page.section_anchor(section_id) {
        Some(anchor) => {
            debug!(section = section_id, "jump to section");
            host.scroll_into_view(anchor, ScrollBehavior::Smooth, ScrollBlock::Start);
            true
        }
        None => false,
    }
}
