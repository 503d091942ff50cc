//! Typing effect for the hero title

use crate::config::TypingConfig;
use crate::page::{ElementId, ElementKind, Page};
use crate::presentation::Presentation;

#[derive(Debug, Clone)]
pub struct Typewriter {
    element: ElementId,
    text: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Clear the hero title and prepare to retype it. Returns `None` when the
    /// effect is disabled, the title is absent or the viewport is too narrow.
    pub fn start(
        page: &Page,
        presentation: &mut Presentation,
        viewport_width_px: f64,
        config: &TypingConfig,
    ) -> Option<Self> {
        if !config.enabled || viewport_width_px <= config.min_viewport_width_px {
            return None;
        }
        let element = page.first_of_kind(ElementKind::HeroTitle)?;
        let text = page.element(element)?.text.chars().collect();

        presentation.style_mut(element).text = Some(String::new());
        Some(Self {
            element,
            text,
            typed: 0,
        })
    }

    /// Append the next character. Returns whether more characters remain.
    pub fn step(&mut self, presentation: &mut Presentation) -> bool {
        if let Some(c) = self.text.get(self.typed) {
            presentation
                .style_mut(self.element)
                .text
                .get_or_insert_with(String::new)
                .push(*c);
            self.typed += 1;
        }
        !self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.typed >= self.text.len()
    }

    pub fn element(&self) -> ElementId {
        self.element
    }
}
