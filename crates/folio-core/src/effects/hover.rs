//! Portfolio card hover swap

use crate::config::EffectsConfig;
use crate::page::{ElementId, ElementKind, Page};
use crate::presentation::Presentation;

/// Apply the enter (`hovered = true`) or leave styling to a portfolio card's
/// image, overlay and action row. Missing children are skipped; non-card
/// elements are ignored. Returns whether `card` is a portfolio card.
pub fn apply_hover(
    page: &Page,
    presentation: &mut Presentation,
    card: ElementId,
    hovered: bool,
    effects: &EffectsConfig,
) -> bool {
    match page.element(card) {
        Some(element) if element.kind == ElementKind::PortfolioCard => {}
        _ => return false,
    }

    if let Some(image) = page.child_of_kind(card, ElementKind::PortfolioImage) {
        presentation.style_mut(image).scale = if hovered { effects.hover_scale } else { 1.0 };
    }
    if let Some(overlay) = page.child_of_kind(card, ElementKind::PortfolioOverlay) {
        presentation.style_mut(overlay).opacity = if hovered { 1.0 } else { 0.0 };
    }
    if let Some(actions) = page.child_of_kind(card, ElementKind::PortfolioActions) {
        presentation.style_mut(actions).translate_y =
            if hovered { 0.0 } else { effects.actions_offset_px };
    }
    true
}
