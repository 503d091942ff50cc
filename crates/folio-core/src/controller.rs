//! Scroll/visibility controller
//!
//! Applies one-shot reveal transforms when observed elements first become
//! visible and recomputes scroll-derived transforms (hero parallax, scroll
//! indicator fade). Scroll events are coalesced: the controller requests at
//! most one frame at a time and recomputes only when that frame runs.

use std::collections::HashSet;

use tracing::debug;

use crate::config::EffectsConfig;
use crate::page::{ElementId, ElementKind, Page};
use crate::presentation::Presentation;

/// Visibility change delivered by the host for an observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    pub element: ElementId,
    pub is_intersecting: bool,
}

/// Host facility that delivers a callback once before the next repaint
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Host facility that reports visibility changes for observed elements
pub trait VisibilitySubscription {
    fn observe(&mut self, element: ElementId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Visible,
    Hidden,
}

impl IndicatorState {
    pub fn opacity(self) -> f64 {
        match self {
            IndicatorState::Visible => 1.0,
            IndicatorState::Hidden => 0.0,
        }
    }

    pub fn interactive(self) -> bool {
        self == IndicatorState::Visible
    }
}

/// Vertical translation of the parallax layer for a scroll offset
#[inline]
pub fn parallax_offset(scroll_top: f64, rate: f64) -> f64 {
    scroll_top * rate
}

/// Scroll indicator state; hidden strictly past `hide_after`
#[inline]
pub fn indicator_state(scroll_top: f64, hide_after: f64) -> IndicatorState {
    if scroll_top > hide_after {
        IndicatorState::Hidden
    } else {
        IndicatorState::Visible
    }
}

#[derive(Debug, Clone)]
pub struct ScrollController {
    observed: HashSet<ElementId>,
    revealed: HashSet<ElementId>,
    parallax_target: Option<ElementId>,
    indicator: Option<ElementId>,
    parallax_rate: f64,
    indicator_hide_after: f64,
    /// Latest offset seen by `on_scroll`
    last_scroll_top: f64,
    /// A frame has been requested and has not run yet
    frame_pending: bool,
}

impl ScrollController {
    pub fn new(effects: &EffectsConfig) -> Self {
        Self {
            observed: HashSet::new(),
            revealed: HashSet::new(),
            parallax_target: None,
            indicator: None,
            parallax_rate: effects.parallax_rate,
            indicator_hide_after: effects.indicator_hide_after_px,
            last_scroll_top: 0.0,
            frame_pending: false,
        }
    }

    /// Controller bound to the page's hero background and scroll indicator,
    /// either of which may be absent
    pub fn for_page(page: &Page, effects: &EffectsConfig) -> Self {
        Self::new(effects).with_targets(
            page.first_of_kind(ElementKind::HeroBackground),
            page.first_of_kind(ElementKind::ScrollIndicator),
        )
    }

    pub fn with_targets(
        mut self,
        parallax_target: Option<ElementId>,
        indicator: Option<ElementId>,
    ) -> Self {
        self.parallax_target = parallax_target;
        self.indicator = indicator;
        self
    }

    /// Subscribe elements to visibility tracking. Already-observed elements
    /// are not subscribed twice.
    pub fn register_for_reveal<I, V>(&mut self, elements: I, visibility: &mut V)
    where
        I: IntoIterator<Item = ElementId>,
        V: VisibilitySubscription + ?Sized,
    {
        for element in elements {
            if self.observed.insert(element) {
                visibility.observe(element);
            }
        }
    }

    /// Apply the reveal transform the first time an observed element
    /// intersects. Returns whether a reveal was applied by this call.
    pub fn on_intersection(
        &mut self,
        event: IntersectionEvent,
        presentation: &mut Presentation,
    ) -> bool {
        if !event.is_intersecting || !self.observed.contains(&event.element) {
            return false;
        }
        if !self.revealed.insert(event.element) {
            return false;
        }

        presentation.style_mut(event.element).revealed = true;
        debug!(element = event.element.0, "revealed");
        true
    }

    /// Record the latest scroll offset and request a frame unless one is
    /// already pending
    pub fn on_scroll<S>(&mut self, scroll_top: f64, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        self.last_scroll_top = scroll_top;
        if !self.frame_pending {
            self.frame_pending = true;
            scheduler.request_frame();
        }
    }

    /// Run the pending recomputation, if any. Returns whether work was done.
    pub fn on_frame(&mut self, presentation: &mut Presentation) -> bool {
        if !self.frame_pending {
            return false;
        }
        self.frame_pending = false;
        self.apply_scroll_effects(self.last_scroll_top, presentation);
        true
    }

    /// Recompute every scroll-derived transform for `scroll_top`
    pub fn apply_scroll_effects(&self, scroll_top: f64, presentation: &mut Presentation) {
        if let Some(background) = self.parallax_target {
            presentation.style_mut(background).translate_y =
                parallax_offset(scroll_top, self.parallax_rate);
        }

        if let Some(indicator) = self.indicator {
            let state = indicator_state(scroll_top, self.indicator_hide_after);
            let style = presentation.style_mut(indicator);
            style.opacity = state.opacity();
            style.interactive = state.interactive();
        }
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains(&element)
    }

    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    #[inline]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    #[inline]
    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }
}
