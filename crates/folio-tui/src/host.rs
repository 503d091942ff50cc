//! Terminal implementation of the page host facilities
//!
//! Frame requests are latched and serviced by the frame ticker; scrolling
//! goes through the smooth-scroll animator in document pixels; links are
//! handed to the system opener.

use std::io;
use std::time::Instant;

use folio_core::config::UiConfig;
use folio_core::{
    ElementId, FrameScheduler, LinkHost, ScrollBehavior, ScrollBlock, ScrollHost,
};
use tracing::{debug, warn};

use crate::layout::DocumentLayout;
use crate::scroll::ScrollAnimator;

type Opener = fn(&str) -> io::Result<()>;

fn system_open(href: &str) -> io::Result<()> {
    open::that(href)
}

pub struct TerminalHost {
    animator: ScrollAnimator,
    layout: DocumentLayout,
    px_per_row: f64,
    px_per_col: f64,
    frame_requested: bool,
    /// Timestamp of the event being dispatched
    now: Instant,
    opener: Opener,
    status: Option<String>,
}

impl TerminalHost {
    pub fn new(config: &UiConfig, layout: DocumentLayout) -> Self {
        Self {
            animator: ScrollAnimator::new(config.scroll.clone()),
            layout,
            px_per_row: config.px_per_row.max(1) as f64,
            px_per_col: config.px_per_col.max(1) as f64,
            frame_requested: false,
            now: Instant::now(),
            opener: system_open,
            status: None,
        }
    }

    /// Replace how links are opened
    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn set_now(&mut self, now: Instant) {
        self.now = now;
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Swap in a new layout, keeping the scroll position within range
    pub fn set_layout(&mut self, layout: DocumentLayout) {
        self.layout = layout;
        let max = self.max_scroll_px();
        if self.animator.current() > max {
            self.animator.set_position(max);
        }
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut ScrollAnimator {
        &mut self.animator
    }

    #[inline]
    pub fn px_per_row(&self) -> f64 {
        self.px_per_row
    }

    #[inline]
    pub fn px_per_col(&self) -> f64 {
        self.px_per_col
    }

    pub fn scroll_top_px(&self) -> f64 {
        self.animator.current()
    }

    /// First document row shown at the top of the viewport
    pub fn scroll_top_rows(&self) -> u32 {
        (self.animator.current() / self.px_per_row).round() as u32
    }

    pub fn max_scroll_px(&self) -> f64 {
        self.layout.max_scroll_rows() as f64 * self.px_per_row
    }

    pub fn viewport_height_px(&self) -> f64 {
        self.layout.viewport_rows() as f64 * self.px_per_row
    }

    pub fn viewport_width_px(&self) -> f64 {
        self.layout.width() as f64 * self.px_per_col
    }

    /// Scroll by a number of document rows (negative = up)
    pub fn scroll_rows(&mut self, rows: i64) {
        let max = self.max_scroll_px();
        self.animator.scroll_by(rows as f64 * self.px_per_row, max);
    }

    pub fn scroll_to_px(&mut self, target: f64, behavior: ScrollBehavior) {
        let max = self.max_scroll_px();
        self.animator.scroll_to(target, max, behavior, self.now);
    }

    /// Advance the animator and return the scroll offset to render
    pub fn advance(&mut self, now: Instant) -> f64 {
        let max = self.max_scroll_px();
        self.animator.update(max, now)
    }

    /// Consume the pending frame request, if any
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    #[inline]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

impl FrameScheduler for TerminalHost {
    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

impl ScrollHost for TerminalHost {
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior, block: ScrollBlock) {
        let Some(rect) = self.layout.rect(element) else {
            debug!(element = element.0, "scroll target has no layout");
            return;
        };
        let top = rect.y as f64 * self.px_per_row;
        let bottom = rect.bottom() as f64 * self.px_per_row;

        let target = match block {
            ScrollBlock::Start => top,
            ScrollBlock::Nearest => {
                let view_top = self.animator.target();
                let view_bottom = view_top + self.viewport_height_px();
                if top < view_top {
                    top
                } else if bottom > view_bottom {
                    bottom - self.viewport_height_px()
                } else {
                    return;
                }
            }
        };

        self.scroll_to_px(target, behavior);
    }
}

impl LinkHost for TerminalHost {
    fn follow_link(&mut self, href: &str) {
        match (self.opener)(href) {
            Ok(()) => self.set_status(format!("Opening: {}", href)),
            Err(e) => {
                warn!("Failed to open link {}: {}", href, e);
                self.set_status(format!("Failed to open link: {}", e));
            }
        }
    }
}
