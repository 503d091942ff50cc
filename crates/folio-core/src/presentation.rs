//! Presentational state of the page: the transform, opacity and class-like
//! flags handlers write and the renderer reads.

use std::collections::HashMap;

use crate::config::EffectsConfig;
use crate::page::{ElementId, ElementKind, Page};

#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    /// One-shot "fade-in-up" class; never cleared once set
    pub revealed: bool,
    /// Vertical translation in pixels
    pub translate_y: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Whether the element accepts pointer input
    pub interactive: bool,
    /// Replacement text content (typing effect)
    pub text: Option<String>,
    /// Element was detached from the document
    pub removed: bool,
}

static DEFAULT_STYLE: ElementStyle = ElementStyle {
    revealed: false,
    translate_y: 0.0,
    scale: 1.0,
    opacity: 1.0,
    interactive: true,
    text: None,
    removed: false,
};

impl Default for ElementStyle {
    fn default() -> Self {
        DEFAULT_STYLE.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Presentation {
    styles: HashMap<ElementId, ElementStyle>,
    /// Document-level "loaded" class
    pub loaded: bool,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a page: portfolio overlays hidden and action rows
    /// pushed down until hovered
    pub fn for_page(page: &Page, effects: &EffectsConfig) -> Self {
        let mut presentation = Self::new();
        for element in page.elements() {
            match element.kind {
                ElementKind::PortfolioOverlay => {
                    presentation.style_mut(element.id).opacity = 0.0;
                }
                ElementKind::PortfolioActions => {
                    presentation.style_mut(element.id).translate_y = effects.actions_offset_px;
                }
                _ => {}
            }
        }
        presentation
    }

    /// Current style, or the default style for untouched elements
    pub fn style(&self, id: ElementId) -> &ElementStyle {
        self.styles.get(&id).unwrap_or(&DEFAULT_STYLE)
    }

    pub fn style_mut(&mut self, id: ElementId) -> &mut ElementStyle {
        self.styles.entry(id).or_default()
    }

    #[inline]
    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.style(id).revealed
    }

    /// Text to display for an element, honouring any override
    pub fn text<'a>(&'a self, id: ElementId, full: &'a str) -> &'a str {
        self.style(id).text.as_deref().unwrap_or(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_element_has_default_style() {
        let presentation = Presentation::new();
        let style = presentation.style(ElementId(42));
        assert_eq!(style, &ElementStyle::default());
        assert!(!presentation.is_revealed(ElementId(42)));
    }

    #[test]
    fn test_for_page_seeds_portfolio_rest_state() {
        let page = Page::builtin();
        let effects = EffectsConfig::default();
        let presentation = Presentation::for_page(&page, &effects);

        let card = page.first_of_kind(ElementKind::PortfolioCard).unwrap();
        let overlay = page.child_of_kind(card, ElementKind::PortfolioOverlay).unwrap();
        let actions = page.child_of_kind(card, ElementKind::PortfolioActions).unwrap();
        assert_eq!(presentation.style(overlay).opacity, 0.0);
        assert_eq!(presentation.style(actions).translate_y, 16.0);
    }

    #[test]
    fn test_text_override() {
        let mut presentation = Presentation::new();
        assert_eq!(presentation.text(ElementId(1), "Hello"), "Hello");
        presentation.style_mut(ElementId(1)).text = Some("He".to_string());
        assert_eq!(presentation.text(ElementId(1), "Hello"), "He");
    }
}
