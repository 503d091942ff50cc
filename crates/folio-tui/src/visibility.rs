//! Geometric visibility tracking for observed elements
//!
//! The root is the viewport shrunk by a bottom margin, so elements report as
//! visible slightly after they cross the bottom edge. Events are emitted on
//! the first evaluation of an element and whenever its state flips.

use std::collections::HashMap;

use folio_core::config::RevealConfig;
use folio_core::{ElementId, IntersectionEvent, VisibilitySubscription};

use crate::layout::DocumentLayout;

/// Fraction of an element's height inside `[root_top, root_bottom]`
pub fn intersection_ratio(top: f64, height: f64, root_top: f64, root_bottom: f64) -> f64 {
    if height <= 0.0 {
        return if top >= root_top && top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = (top + height).min(root_bottom) - top.max(root_top);
    (overlap / height).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    bottom_margin: f64,
    observed: Vec<ElementId>,
    last: HashMap<ElementId, bool>,
}

impl VisibilityObserver {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            bottom_margin: config.bottom_margin_px,
            observed: Vec::new(),
            last: HashMap::new(),
        }
    }

    fn is_intersecting(&self, ratio: f64) -> bool {
        if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }

    /// Evaluate every observed element against the viewport, in pixels.
    /// Elements missing from the layout are skipped.
    pub fn evaluate(
        &mut self,
        layout: &DocumentLayout,
        px_per_row: f64,
        scroll_top: f64,
        viewport_height: f64,
    ) -> Vec<IntersectionEvent> {
        let root_top = scroll_top;
        let root_bottom = scroll_top + (viewport_height - self.bottom_margin).max(0.0);
        let mut events = Vec::new();

        for &element in &self.observed {
            let Some(rect) = layout.rect(element) else {
                continue;
            };
            let top = rect.y as f64 * px_per_row;
            let height = rect.height as f64 * px_per_row;
            let ratio = intersection_ratio(top, height, root_top, root_bottom);
            let is_intersecting = self.is_intersecting(ratio);

            if self.last.insert(element, is_intersecting) != Some(is_intersecting) {
                events.push(IntersectionEvent {
                    element,
                    is_intersecting,
                });
            }
        }

        events
    }

    pub fn observed(&self) -> &[ElementId] {
        &self.observed
    }
}

impl VisibilitySubscription for VisibilityObserver {
    fn observe(&mut self, element: ElementId) {
        if !self.observed.contains(&element) {
            self.observed.push(element);
        }
    }
}
