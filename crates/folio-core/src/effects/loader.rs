//! Page-load handling: mark the document loaded and fade out the loader

use crate::page::ElementId;
use crate::presentation::Presentation;

/// Set the document's loaded flag and start fading `loader`, if present.
/// Returns the loader that must be removed once the fade completes.
pub fn on_loaded(presentation: &mut Presentation, loader: Option<ElementId>) -> Option<ElementId> {
    presentation.loaded = true;
    let loader = loader?;
    presentation.style_mut(loader).opacity = 0.0;
    Some(loader)
}

/// Detach the loader after its fade
pub fn remove(presentation: &mut Presentation, loader: ElementId) {
    presentation.style_mut(loader).removed = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_without_loader() {
        let mut presentation = Presentation::new();
        assert!(on_loaded(&mut presentation, None).is_none());
        assert!(presentation.loaded);
    }

    #[test]
    fn test_loader_fades_then_is_removed() {
        let mut presentation = Presentation::new();
        let loader = ElementId(7);
        assert_eq!(on_loaded(&mut presentation, Some(loader)), Some(loader));
        assert_eq!(presentation.style(loader).opacity, 0.0);
        assert!(!presentation.style(loader).removed);

        remove(&mut presentation, loader);
        assert!(presentation.style(loader).removed);
    }
}
