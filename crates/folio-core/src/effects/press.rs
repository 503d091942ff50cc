//! Transient "pressed" affordance for buttons

use crate::page::{ElementId, ElementKind, Page};
use crate::presentation::Presentation;

/// Whether clicking the element shows the pressed affordance
pub fn has_press_affordance(page: &Page, element: ElementId) -> bool {
    page.element(element)
        .is_some_and(|e| e.kind == ElementKind::Button)
}

/// Scale the button down; the caller schedules [`release`]
pub fn press(presentation: &mut Presentation, button: ElementId, scale: f64) {
    presentation.style_mut(button).scale = scale;
}

/// Restore the button's scale after the press duration
pub fn release(presentation: &mut Presentation, button: ElementId) {
    presentation.style_mut(button).scale = 1.0;
}
